//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y los criterios tipados
//! de búsqueda dimensional y de peso.

use serde::{Deserialize, Serialize};

/// Vehicle principal - registro completo del inventario de flota
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub registration: String,
    pub color: String,
    pub fabrication_year: i32,
    pub capacity: i32,
    pub max_speed: f64,
    pub fuel_type: String,
    pub transmission: String,
    pub weight: f64,
    pub height: f64,
    pub length: f64,
    pub width: f64,
}

/// Criterios de búsqueda por dimensiones
///
/// Los cuatro límites son obligatorios en cuanto se pide algún filtrado;
/// sin criterios la búsqueda devuelve el inventario completo.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DimensionQuery {
    pub min_length: Option<f64>,
    pub max_length: Option<f64>,
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
}

impl DimensionQuery {
    pub fn is_empty(&self) -> bool {
        self.min_length.is_none()
            && self.max_length.is_none()
            && self.min_width.is_none()
            && self.max_width.is_none()
    }
}

/// Criterios de filtrado por peso
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeightQuery {
    pub weight_min: Option<f64>,
    pub weight_max: Option<f64>,
}

impl WeightQuery {
    pub fn is_empty(&self) -> bool {
        self.weight_min.is_none() && self.weight_max.is_none()
    }
}
