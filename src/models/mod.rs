//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos del inventario de flota.

pub mod vehicle;
