use crate::dto::vehicle_dto::{
    CreateVehicleRequest, MergeVehicleRequest, UpdateVehicleRequest, VehicleResponse,
};
use crate::models::vehicle::{DimensionQuery, Vehicle, WeightQuery};
use crate::repositories::vehicle_repository::{RepositoryError, VehicleRepository};
use crate::utils::errors::AppError;
use crate::utils::validation::{validate_non_zero, validate_not_empty};
use std::collections::HashMap;
use std::sync::Arc;

pub struct VehicleController {
    repository: Arc<VehicleRepository>,
}

impl VehicleController {
    pub fn new(repository: Arc<VehicleRepository>) -> Self {
        Self { repository }
    }

    /// Validar los campos requeridos de un vehículo
    ///
    /// El orden de los chequeos es fijo y se reporta solo la primera
    /// violación encontrada.
    pub fn validate_vehicle(vehicle: &Vehicle) -> Result<(), AppError> {
        if validate_not_empty(&vehicle.brand).is_err() {
            return Err(AppError::FieldRequired("Brand".to_string()));
        }
        if validate_not_empty(&vehicle.model).is_err() {
            return Err(AppError::FieldRequired("Model".to_string()));
        }
        if validate_not_empty(&vehicle.color).is_err() {
            return Err(AppError::FieldRequired("Color".to_string()));
        }
        if validate_non_zero(vehicle.fabrication_year).is_err() {
            return Err(AppError::FieldRequired("Year".to_string()));
        }
        if validate_non_zero(vehicle.capacity).is_err() {
            return Err(AppError::FieldRequired("Passengers".to_string()));
        }
        if validate_not_empty(&vehicle.transmission).is_err() {
            return Err(AppError::FieldRequired("Transmission".to_string()));
        }
        if validate_non_zero(vehicle.max_speed).is_err() {
            return Err(AppError::FieldRequired("Max Speed".to_string()));
        }
        Ok(())
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> Result<VehicleResponse, AppError> {
        let mut vehicle = request.into_vehicle();
        Self::validate_vehicle(&vehicle)?;

        self.repository.save(&mut vehicle).await.map_err(|e| match e {
            RepositoryError::AlreadyExists => {
                AppError::Conflict(format!("vehicle already exists: {}", e))
            }
            other => AppError::Internal(other.to_string()),
        })?;

        Ok(VehicleResponse::from(vehicle))
    }

    /// Crear varios vehículos en orden, cortando en el primer error
    ///
    /// Los vehículos anteriores al fallo quedan guardados; no hay rollback.
    pub async fn create_many(
        &self,
        requests: Vec<CreateVehicleRequest>,
    ) -> Result<Vec<VehicleResponse>, AppError> {
        let mut saved = Vec::with_capacity(requests.len());
        for request in requests {
            let mut vehicle = request.into_vehicle();
            Self::validate_vehicle(&vehicle)?;

            self.repository.save(&mut vehicle).await.map_err(|e| match e {
                RepositoryError::AlreadyExists => {
                    AppError::Conflict(format!("vehicle already exists: {}", e))
                }
                other => AppError::Internal(other.to_string()),
            })?;
            saved.push(VehicleResponse::from(vehicle));
        }
        Ok(saved)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .get_by_id(id)
            .await
            .map_err(|e| AppError::NotFound(e.to_string()))?;
        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn find_all(&self) -> Result<HashMap<i32, VehicleResponse>, AppError> {
        let vehicles = self.repository.find_all().await;
        Ok(Self::to_response_map(vehicles))
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdateVehicleRequest,
    ) -> Result<VehicleResponse, AppError> {
        let vehicle = request.into_vehicle(id);
        Self::validate_vehicle(&vehicle)?;

        self.repository
            .update_vehicle(&vehicle)
            .await
            .map_err(|e| AppError::NotFound(e.to_string()))?;

        Ok(VehicleResponse::from(vehicle))
    }

    /// Actualización parcial: lee el registro actual, pisa los campos
    /// presentes en el request, revalida y reemplaza
    pub async fn merge_update(
        &self,
        id: i32,
        request: MergeVehicleRequest,
    ) -> Result<VehicleResponse, AppError> {
        let current = self
            .repository
            .get_by_id(id)
            .await
            .map_err(|e| AppError::NotFound(e.to_string()))?;

        let vehicle = request.apply_to(current);
        Self::validate_vehicle(&vehicle)?;

        self.repository
            .update_vehicle(&vehicle)
            .await
            .map_err(|e| AppError::NotFound(e.to_string()))?;

        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        self.repository
            .delete(id)
            .await
            .map_err(|e| AppError::NotFound(e.to_string()))
    }

    pub async fn find_by_color_and_year(
        &self,
        color: &str,
        year: i32,
    ) -> Result<HashMap<i32, VehicleResponse>, AppError> {
        let vehicles = self
            .repository
            .find_by_color_and_year(color, year)
            .await
            .map_err(|e| AppError::NotFound(e.to_string()))?;
        Ok(Self::to_response_map(vehicles))
    }

    pub async fn find_by_brand_and_year_range(
        &self,
        brand: &str,
        start_year: i32,
        end_year: i32,
    ) -> Result<HashMap<i32, VehicleResponse>, AppError> {
        let vehicles = self
            .repository
            .find_by_brand_and_year_range(brand, start_year, end_year)
            .await
            .map_err(|e| AppError::NotFound(e.to_string()))?;
        Ok(Self::to_response_map(vehicles))
    }

    pub async fn find_by_fuel_type(
        &self,
        fuel_type: &str,
    ) -> Result<HashMap<i32, VehicleResponse>, AppError> {
        let vehicles = self
            .repository
            .find_by_fuel_type(fuel_type)
            .await
            .map_err(|e| AppError::NotFound(e.to_string()))?;
        Ok(Self::to_response_map(vehicles))
    }

    pub async fn find_by_transmission(
        &self,
        transmission: &str,
    ) -> Result<HashMap<i32, VehicleResponse>, AppError> {
        let vehicles = self
            .repository
            .find_by_transmission(transmission)
            .await
            .map_err(|e| AppError::NotFound(e.to_string()))?;
        Ok(Self::to_response_map(vehicles))
    }

    pub async fn velocity_average_by_brand(&self, brand: &str) -> Result<f64, AppError> {
        self.repository
            .velocity_average_by_brand(brand)
            .await
            .map_err(|e| AppError::NotFound(e.to_string()))
    }

    pub async fn capacity_average_by_brand(&self, brand: &str) -> Result<f64, AppError> {
        self.repository
            .capacity_average_by_brand(brand)
            .await
            .map_err(|e| AppError::NotFound(e.to_string()))
    }

    // Las queries inválidas se reportan como NotFound hacia afuera; los
    // clientes nunca distinguieron entre criterio incompleto y resultado
    // vacío y dependen de ese plegado.
    pub async fn find_query(
        &self,
        query: &DimensionQuery,
    ) -> Result<HashMap<i32, VehicleResponse>, AppError> {
        let vehicles = self
            .repository
            .find_query(query)
            .await
            .map_err(|e| AppError::NotFound(e.to_string()))?;
        Ok(Self::to_response_map(vehicles))
    }

    pub async fn filter_by_weight(
        &self,
        query: &WeightQuery,
    ) -> Result<HashMap<i32, VehicleResponse>, AppError> {
        let vehicles = self
            .repository
            .filter_by_weight(query)
            .await
            .map_err(|e| AppError::NotFound(e.to_string()))?;
        Ok(Self::to_response_map(vehicles))
    }

    fn to_response_map(vehicles: HashMap<i32, Vehicle>) -> HashMap<i32, VehicleResponse> {
        vehicles
            .into_iter()
            .map(|(id, v)| (id, VehicleResponse::from(v)))
            .collect()
    }
}
