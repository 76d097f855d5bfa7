use crate::models::vehicle::Vehicle;
use serde::{Deserialize, Serialize};

// Request para crear un vehículo
//
// Los campos ausentes entran como vacío/cero y los atrapa la validación
// de campos requeridos, no el decodificador.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct CreateVehicleRequest {
    pub brand: String,
    pub model: String,
    pub registration: String,
    pub color: String,
    pub year: i32,
    pub passengers: i32,
    pub max_speed: f64,
    pub fuel_type: String,
    pub transmission: String,
    pub weight: f64,
    pub height: f64,
    pub length: f64,
    pub width: f64,
}

impl CreateVehicleRequest {
    pub fn into_vehicle(self) -> Vehicle {
        Vehicle {
            id: 0,
            brand: self.brand,
            model: self.model,
            registration: self.registration,
            color: self.color,
            fabrication_year: self.year,
            capacity: self.passengers,
            max_speed: self.max_speed,
            fuel_type: self.fuel_type,
            transmission: self.transmission,
            weight: self.weight,
            height: self.height,
            length: self.length,
            width: self.width,
        }
    }
}

// Request para reemplazar un vehículo completo (el id viene de la ruta)
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct UpdateVehicleRequest {
    pub brand: String,
    pub model: String,
    pub registration: String,
    pub color: String,
    pub year: i32,
    pub passengers: i32,
    pub max_speed: f64,
    pub fuel_type: String,
    pub transmission: String,
    pub weight: f64,
    pub height: f64,
    pub length: f64,
    pub width: f64,
}

impl UpdateVehicleRequest {
    pub fn into_vehicle(self, id: i32) -> Vehicle {
        Vehicle {
            id,
            brand: self.brand,
            model: self.model,
            registration: self.registration,
            color: self.color,
            fabrication_year: self.year,
            capacity: self.passengers,
            max_speed: self.max_speed,
            fuel_type: self.fuel_type,
            transmission: self.transmission,
            weight: self.weight,
            height: self.height,
            length: self.length,
            width: self.width,
        }
    }
}

// Request de actualización parcial: los campos presentes pisan al registro
// almacenado, los ausentes conservan su valor
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct MergeVehicleRequest {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub registration: Option<String>,
    pub color: Option<String>,
    pub year: Option<i32>,
    pub passengers: Option<i32>,
    pub max_speed: Option<f64>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub length: Option<f64>,
    pub width: Option<f64>,
}

impl MergeVehicleRequest {
    pub fn apply_to(self, current: Vehicle) -> Vehicle {
        Vehicle {
            id: current.id,
            brand: self.brand.unwrap_or(current.brand),
            model: self.model.unwrap_or(current.model),
            registration: self.registration.unwrap_or(current.registration),
            color: self.color.unwrap_or(current.color),
            fabrication_year: self.year.unwrap_or(current.fabrication_year),
            capacity: self.passengers.unwrap_or(current.capacity),
            max_speed: self.max_speed.unwrap_or(current.max_speed),
            fuel_type: self.fuel_type.unwrap_or(current.fuel_type),
            transmission: self.transmission.unwrap_or(current.transmission),
            weight: self.weight.unwrap_or(current.weight),
            height: self.height.unwrap_or(current.height),
            length: self.length.unwrap_or(current.length),
            width: self.width.unwrap_or(current.width),
        }
    }
}

// Response de vehículo
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub registration: String,
    pub color: String,
    pub year: i32,
    pub passengers: i32,
    pub max_speed: f64,
    pub fuel_type: String,
    pub transmission: String,
    pub weight: f64,
    pub height: f64,
    pub length: f64,
    pub width: f64,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            brand: vehicle.brand,
            model: vehicle.model,
            registration: vehicle.registration,
            color: vehicle.color,
            year: vehicle.fabrication_year,
            passengers: vehicle.capacity,
            max_speed: vehicle.max_speed,
            fuel_type: vehicle.fuel_type,
            transmission: vehicle.transmission,
            weight: vehicle.weight,
            height: vehicle.height,
            length: vehicle.length,
            width: vehicle.width,
        }
    }
}
