//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::vehicle_repository::VehicleRepository;

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<VehicleRepository>,
    pub config: EnvironmentConfig,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig) -> Self {
        Self {
            repository: Arc::new(VehicleRepository::new()),
            config,
            started_at: chrono::Utc::now(),
        }
    }
}
