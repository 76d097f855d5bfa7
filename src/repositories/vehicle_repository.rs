//! Repositorio en memoria de vehículos
//!
//! La tabla vive en un HashMap protegido por RwLock; el contador de ids
//! comparte el mismo lock para que incrementar y insertar sea una sola
//! unidad atómica bajo accesos concurrentes.

use crate::models::vehicle::{DimensionQuery, Vehicle, WeightQuery};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errores a nivel de repositorio
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("there is no vehicle with these characteristics")]
    NotFound,

    #[error("vehicle already exists")]
    AlreadyExists,

    #[error("repository: invalid query")]
    InvalidQuery,
}

/// Tabla interna: filas + último id asignado, bajo un único lock
#[derive(Debug, Default)]
struct VehicleTable {
    rows: HashMap<i32, Vehicle>,
    last_id: i32,
}

pub struct VehicleRepository {
    table: Arc<RwLock<VehicleTable>>,
}

impl VehicleRepository {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(VehicleTable::default())),
        }
    }

    /// Devolver una copia de todos los vehículos
    pub async fn find_all(&self) -> HashMap<i32, Vehicle> {
        let table = self.table.read().await;
        table.rows.clone()
    }

    /// Buscar un vehículo por id
    pub async fn get_by_id(&self, id: i32) -> Result<Vehicle, RepositoryError> {
        let table = self.table.read().await;
        table.rows.get(&id).cloned().ok_or(RepositoryError::NotFound)
    }

    /// Guardar un vehículo nuevo
    ///
    /// El id asignado se escribe en el vehículo del llamador. La tripleta
    /// (brand, model, fabrication_year) debe ser única entre los registros
    /// vivos; los ids borrados nunca se reutilizan.
    pub async fn save(&self, vehicle: &mut Vehicle) -> Result<(), RepositoryError> {
        let mut table = self.table.write().await;

        let duplicated = table.rows.values().any(|v| {
            v.brand == vehicle.brand
                && v.model == vehicle.model
                && v.fabrication_year == vehicle.fabrication_year
        });
        if duplicated {
            return Err(RepositoryError::AlreadyExists);
        }

        table.last_id += 1;
        vehicle.id = table.last_id;
        table.rows.insert(vehicle.id, vehicle.clone());
        Ok(())
    }

    /// Guardar varios vehículos en orden, cortando en el primer error
    ///
    /// Los vehículos anteriores al fallo quedan confirmados.
    pub async fn save_many(&self, vehicles: &mut [Vehicle]) -> Result<(), RepositoryError> {
        for vehicle in vehicles.iter_mut() {
            self.save(vehicle).await?;
        }
        Ok(())
    }

    /// Reemplazar por completo un vehículo existente
    ///
    /// La unicidad de (brand, model, fabrication_year) solo se exige al crear.
    pub async fn update_vehicle(&self, vehicle: &Vehicle) -> Result<(), RepositoryError> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&vehicle.id) {
            return Err(RepositoryError::NotFound);
        }
        table.rows.insert(vehicle.id, vehicle.clone());
        Ok(())
    }

    /// Borrar un vehículo por id
    pub async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let mut table = self.table.write().await;
        if table.rows.remove(&id).is_none() {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Buscar por color y año exactos
    pub async fn find_by_color_and_year(
        &self,
        color: &str,
        year: i32,
    ) -> Result<HashMap<i32, Vehicle>, RepositoryError> {
        let table = self.table.read().await;
        let matches: HashMap<i32, Vehicle> = table
            .rows
            .iter()
            .filter(|(_, v)| v.color == color && v.fabrication_year == year)
            .map(|(id, v)| (*id, v.clone()))
            .collect();

        if matches.is_empty() {
            return Err(RepositoryError::NotFound);
        }
        Ok(matches)
    }

    /// Buscar por marca dentro de un rango de años inclusivo
    pub async fn find_by_brand_and_year_range(
        &self,
        brand: &str,
        start_year: i32,
        end_year: i32,
    ) -> Result<HashMap<i32, Vehicle>, RepositoryError> {
        let table = self.table.read().await;
        let matches: HashMap<i32, Vehicle> = table
            .rows
            .iter()
            .filter(|(_, v)| {
                v.brand == brand
                    && v.fabrication_year >= start_year
                    && v.fabrication_year <= end_year
            })
            .map(|(id, v)| (*id, v.clone()))
            .collect();

        if matches.is_empty() {
            return Err(RepositoryError::NotFound);
        }
        Ok(matches)
    }

    /// Buscar por tipo de combustible exacto
    pub async fn find_by_fuel_type(
        &self,
        fuel_type: &str,
    ) -> Result<HashMap<i32, Vehicle>, RepositoryError> {
        let table = self.table.read().await;
        let matches: HashMap<i32, Vehicle> = table
            .rows
            .iter()
            .filter(|(_, v)| v.fuel_type == fuel_type)
            .map(|(id, v)| (*id, v.clone()))
            .collect();

        if matches.is_empty() {
            return Err(RepositoryError::NotFound);
        }
        Ok(matches)
    }

    /// Buscar por tipo de transmisión exacto
    pub async fn find_by_transmission(
        &self,
        transmission: &str,
    ) -> Result<HashMap<i32, Vehicle>, RepositoryError> {
        let table = self.table.read().await;
        let matches: HashMap<i32, Vehicle> = table
            .rows
            .iter()
            .filter(|(_, v)| v.transmission == transmission)
            .map(|(id, v)| (*id, v.clone()))
            .collect();

        if matches.is_empty() {
            return Err(RepositoryError::NotFound);
        }
        Ok(matches)
    }

    /// Velocidad máxima promedio de una marca
    ///
    /// Acumulación suma/cuenta en una sola pasada. Sin coincidencias el
    /// promedio no está definido y se devuelve NotFound, nunca cero.
    pub async fn velocity_average_by_brand(&self, brand: &str) -> Result<f64, RepositoryError> {
        let table = self.table.read().await;
        let (sum, count) = table
            .rows
            .values()
            .filter(|v| v.brand == brand)
            .fold((0.0, 0u32), |(sum, count), v| (sum + v.max_speed, count + 1));

        if count == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(sum / count as f64)
    }

    /// Capacidad de pasajeros promedio de una marca
    pub async fn capacity_average_by_brand(&self, brand: &str) -> Result<f64, RepositoryError> {
        let table = self.table.read().await;
        let (sum, count) = table
            .rows
            .values()
            .filter(|v| v.brand == brand)
            .fold((0.0, 0u32), |(sum, count), v| (sum + v.capacity as f64, count + 1));

        if count == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(sum / count as f64)
    }

    /// Buscar por límites dimensionales inclusivos
    ///
    /// Sin criterios devuelve el inventario completo. Con algún criterio los
    /// cuatro límites son obligatorios; si falta alguno la query es inválida.
    /// Los límites de largo se comparan contra el alto del vehículo; los
    /// clientes desplegados dependen de ese comportamiento.
    pub async fn find_query(
        &self,
        query: &DimensionQuery,
    ) -> Result<HashMap<i32, Vehicle>, RepositoryError> {
        let table = self.table.read().await;

        if query.is_empty() {
            return Ok(table.rows.clone());
        }

        let (Some(min_length), Some(max_length), Some(min_width), Some(max_width)) =
            (query.min_length, query.max_length, query.min_width, query.max_width)
        else {
            return Err(RepositoryError::InvalidQuery);
        };

        let matches: HashMap<i32, Vehicle> = table
            .rows
            .iter()
            .filter(|(_, v)| {
                v.height >= min_length
                    && v.height <= max_length
                    && v.width >= min_width
                    && v.width <= max_width
            })
            .map(|(id, v)| (*id, v.clone()))
            .collect();

        Ok(matches)
    }

    /// Filtrar por límites de peso inclusivos
    ///
    /// Misma política que la búsqueda dimensional: sin criterios no se
    /// filtra, con criterios ambos límites son obligatorios.
    pub async fn filter_by_weight(
        &self,
        query: &WeightQuery,
    ) -> Result<HashMap<i32, Vehicle>, RepositoryError> {
        let table = self.table.read().await;

        if query.is_empty() {
            return Ok(table.rows.clone());
        }

        let (Some(weight_min), Some(weight_max)) = (query.weight_min, query.weight_max) else {
            return Err(RepositoryError::InvalidQuery);
        };

        let matches: HashMap<i32, Vehicle> = table
            .rows
            .iter()
            .filter(|(_, v)| v.weight >= weight_min && v.weight <= weight_max)
            .map(|(id, v)| (*id, v.clone()))
            .collect();

        Ok(matches)
    }
}

impl Default for VehicleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vehicle(brand: &str, model: &str, year: i32) -> Vehicle {
        Vehicle {
            id: 0,
            brand: brand.to_string(),
            model: model.to_string(),
            registration: "AB-123-CD".to_string(),
            color: "red".to_string(),
            fabrication_year: year,
            capacity: 5,
            max_speed: 180.0,
            fuel_type: "gasoline".to_string(),
            transmission: "manual".to_string(),
            weight: 1200.0,
            height: 1.5,
            length: 4.2,
            width: 1.8,
        }
    }

    #[tokio::test]
    async fn save_assigns_increasing_ids() {
        let repo = VehicleRepository::new();

        let mut first = sample_vehicle("Toyota", "Corolla", 2020);
        repo.save(&mut first).await.unwrap();
        assert_eq!(first.id, 1);

        let mut second = sample_vehicle("Renault", "Clio", 2019);
        repo.save(&mut second).await.unwrap();
        assert_eq!(second.id, 2);

        let stored = repo.get_by_id(1).await.unwrap();
        assert_eq!(stored, first);
    }

    #[tokio::test]
    async fn save_rejects_duplicated_brand_model_year() {
        let repo = VehicleRepository::new();

        let mut first = sample_vehicle("Toyota", "Corolla", 2020);
        repo.save(&mut first).await.unwrap();

        let mut duplicate = sample_vehicle("Toyota", "Corolla", 2020);
        duplicate.color = "blue".to_string();
        let err = repo.save(&mut duplicate).await.unwrap_err();
        assert_eq!(err, RepositoryError::AlreadyExists);

        assert_eq!(repo.find_all().await.len(), 1);
    }

    #[tokio::test]
    async fn deleted_ids_are_never_reassigned() {
        let repo = VehicleRepository::new();

        let mut first = sample_vehicle("Toyota", "Corolla", 2020);
        repo.save(&mut first).await.unwrap();
        repo.delete(first.id).await.unwrap();

        let mut second = sample_vehicle("Renault", "Clio", 2019);
        repo.save(&mut second).await.unwrap();
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let repo = VehicleRepository::new();

        let mut vehicle = sample_vehicle("Toyota", "Corolla", 2020);
        repo.save(&mut vehicle).await.unwrap();

        repo.delete(vehicle.id).await.unwrap();
        let err = repo.get_by_id(vehicle.id).await.unwrap_err();
        assert_eq!(err, RepositoryError::NotFound);

        let err = repo.delete(vehicle.id).await.unwrap_err();
        assert_eq!(err, RepositoryError::NotFound);
    }

    #[tokio::test]
    async fn find_all_returns_a_snapshot_copy() {
        let repo = VehicleRepository::new();

        let mut vehicle = sample_vehicle("Toyota", "Corolla", 2020);
        repo.save(&mut vehicle).await.unwrap();

        let mut snapshot = repo.find_all().await;
        snapshot.clear();

        assert_eq!(repo.find_all().await.len(), 1);
    }

    #[tokio::test]
    async fn save_many_stops_at_first_error_keeping_previous() {
        let repo = VehicleRepository::new();

        let mut batch = vec![
            sample_vehicle("Toyota", "Corolla", 2020),
            sample_vehicle("Renault", "Clio", 2019),
            sample_vehicle("Toyota", "Corolla", 2020),
            sample_vehicle("Fiat", "Punto", 2015),
        ];

        let err = repo.save_many(&mut batch).await.unwrap_err();
        assert_eq!(err, RepositoryError::AlreadyExists);

        // los dos primeros quedan confirmados, el cuarto nunca se intenta
        let all = repo.find_all().await;
        assert_eq!(all.len(), 2);
        assert!(all.values().all(|v| v.brand != "Fiat"));
    }

    #[tokio::test]
    async fn update_replaces_the_whole_record() {
        let repo = VehicleRepository::new();

        let mut vehicle = sample_vehicle("Toyota", "Corolla", 2020);
        repo.save(&mut vehicle).await.unwrap();

        vehicle.color = "black".to_string();
        vehicle.max_speed = 200.0;
        repo.update_vehicle(&vehicle).await.unwrap();

        let stored = repo.get_by_id(vehicle.id).await.unwrap();
        assert_eq!(stored.color, "black");
        assert_eq!(stored.max_speed, 200.0);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let repo = VehicleRepository::new();

        let mut vehicle = sample_vehicle("Toyota", "Corolla", 2020);
        vehicle.id = 99;
        let err = repo.update_vehicle(&vehicle).await.unwrap_err();
        assert_eq!(err, RepositoryError::NotFound);
    }

    #[tokio::test]
    async fn find_by_color_and_year_matches_exactly() {
        let repo = VehicleRepository::new();

        let mut red = sample_vehicle("Toyota", "Corolla", 2020);
        repo.save(&mut red).await.unwrap();
        let mut blue = sample_vehicle("Toyota", "Yaris", 2020);
        blue.color = "blue".to_string();
        repo.save(&mut blue).await.unwrap();

        let matches = repo.find_by_color_and_year("red", 2020).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert!(matches.contains_key(&red.id));

        let err = repo.find_by_color_and_year("red", 1999).await.unwrap_err();
        assert_eq!(err, RepositoryError::NotFound);
    }

    #[tokio::test]
    async fn find_by_brand_and_year_range_is_inclusive() {
        let repo = VehicleRepository::new();

        let mut old = sample_vehicle("Toyota", "Corolla", 2019);
        repo.save(&mut old).await.unwrap();
        let mut new = sample_vehicle("Toyota", "Yaris", 2021);
        repo.save(&mut new).await.unwrap();
        let mut other = sample_vehicle("Renault", "Clio", 2020);
        repo.save(&mut other).await.unwrap();

        let matches = repo
            .find_by_brand_and_year_range("Toyota", 2019, 2021)
            .await
            .unwrap();
        assert_eq!(matches.len(), 2);

        // rango invertido: ningún año cae dentro, se reporta como no encontrado
        let err = repo
            .find_by_brand_and_year_range("Toyota", 2021, 2019)
            .await
            .unwrap_err();
        assert_eq!(err, RepositoryError::NotFound);
    }

    #[tokio::test]
    async fn find_by_fuel_type_and_transmission() {
        let repo = VehicleRepository::new();

        let mut gasoline = sample_vehicle("Toyota", "Corolla", 2020);
        repo.save(&mut gasoline).await.unwrap();
        let mut diesel = sample_vehicle("Renault", "Clio", 2019);
        diesel.fuel_type = "diesel".to_string();
        diesel.transmission = "automatic".to_string();
        repo.save(&mut diesel).await.unwrap();

        let matches = repo.find_by_fuel_type("diesel").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert!(matches.contains_key(&diesel.id));

        let matches = repo.find_by_transmission("manual").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert!(matches.contains_key(&gasoline.id));

        let err = repo.find_by_fuel_type("hydrogen").await.unwrap_err();
        assert_eq!(err, RepositoryError::NotFound);
        let err = repo.find_by_transmission("cvt").await.unwrap_err();
        assert_eq!(err, RepositoryError::NotFound);
    }

    #[tokio::test]
    async fn velocity_average_is_the_mean_over_the_brand() {
        let repo = VehicleRepository::new();

        let mut slow = sample_vehicle("Toyota", "Corolla", 2020);
        slow.max_speed = 160.0;
        repo.save(&mut slow).await.unwrap();
        let mut fast = sample_vehicle("Toyota", "Supra", 2021);
        fast.max_speed = 250.0;
        repo.save(&mut fast).await.unwrap();
        let mut other = sample_vehicle("Renault", "Clio", 2019);
        other.max_speed = 999.0;
        repo.save(&mut other).await.unwrap();

        let average = repo.velocity_average_by_brand("Toyota").await.unwrap();
        assert_eq!(average, 205.0);
    }

    #[tokio::test]
    async fn averages_over_unknown_brand_are_not_found() {
        let repo = VehicleRepository::new();

        let err = repo.velocity_average_by_brand("Toyota").await.unwrap_err();
        assert_eq!(err, RepositoryError::NotFound);
        let err = repo.capacity_average_by_brand("Toyota").await.unwrap_err();
        assert_eq!(err, RepositoryError::NotFound);
    }

    #[tokio::test]
    async fn capacity_average_counts_passengers() {
        let repo = VehicleRepository::new();

        let mut small = sample_vehicle("Toyota", "Corolla", 2020);
        small.capacity = 4;
        repo.save(&mut small).await.unwrap();
        let mut big = sample_vehicle("Toyota", "Hiace", 2018);
        big.capacity = 9;
        repo.save(&mut big).await.unwrap();

        let average = repo.capacity_average_by_brand("Toyota").await.unwrap();
        assert_eq!(average, 6.5);
    }

    #[tokio::test]
    async fn find_query_without_criteria_returns_everything() {
        let repo = VehicleRepository::new();

        let mut vehicle = sample_vehicle("Toyota", "Corolla", 2020);
        repo.save(&mut vehicle).await.unwrap();

        let all = repo.find_query(&DimensionQuery::default()).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn find_query_with_partial_bounds_is_invalid() {
        let repo = VehicleRepository::new();

        let query = DimensionQuery {
            min_length: Some(1.0),
            ..Default::default()
        };
        let err = repo.find_query(&query).await.unwrap_err();
        assert_eq!(err, RepositoryError::InvalidQuery);
    }

    // los límites de largo filtran sobre el alto; los clientes dependen de esto
    #[tokio::test]
    async fn find_query_length_bounds_apply_to_height() {
        let repo = VehicleRepository::new();

        let mut tall = sample_vehicle("Toyota", "Hiace", 2018);
        tall.height = 2.3;
        tall.length = 5.3;
        tall.width = 1.9;
        repo.save(&mut tall).await.unwrap();

        let mut low = sample_vehicle("Toyota", "Supra", 2021);
        low.height = 1.3;
        low.length = 4.4;
        low.width = 1.9;
        repo.save(&mut low).await.unwrap();

        // ambos largos (4.4 y 5.3) caen fuera de [1.0, 2.0]; el filtro
        // selecciona por alto, por eso el Supra (1.3) sí aparece
        let query = DimensionQuery {
            min_length: Some(1.0),
            max_length: Some(2.0),
            min_width: Some(1.0),
            max_width: Some(2.0),
        };
        let matches = repo.find_query(&query).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert!(matches.contains_key(&low.id));
    }

    #[tokio::test]
    async fn find_query_can_return_an_empty_set() {
        let repo = VehicleRepository::new();

        let mut vehicle = sample_vehicle("Toyota", "Corolla", 2020);
        repo.save(&mut vehicle).await.unwrap();

        let query = DimensionQuery {
            min_length: Some(10.0),
            max_length: Some(20.0),
            min_width: Some(10.0),
            max_width: Some(20.0),
        };
        let matches = repo.find_query(&query).await.unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn filter_by_weight_uses_inclusive_bounds() {
        let repo = VehicleRepository::new();

        let mut light = sample_vehicle("Toyota", "Corolla", 2020);
        light.weight = 1000.0;
        repo.save(&mut light).await.unwrap();
        let mut heavy = sample_vehicle("Toyota", "Hiace", 2018);
        heavy.weight = 2200.0;
        repo.save(&mut heavy).await.unwrap();

        let query = WeightQuery {
            weight_min: Some(1000.0),
            weight_max: Some(1500.0),
        };
        let matches = repo.filter_by_weight(&query).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert!(matches.contains_key(&light.id));

        let incomplete = WeightQuery {
            weight_min: Some(1000.0),
            weight_max: None,
        };
        let err = repo.filter_by_weight(&incomplete).await.unwrap_err();
        assert_eq!(err, RepositoryError::InvalidQuery);

        let all = repo.filter_by_weight(&WeightQuery::default()).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn concurrent_saves_never_duplicate_ids() {
        let repo = Arc::new(VehicleRepository::new());

        let mut handles = Vec::new();
        for i in 0..16 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                let mut vehicle = sample_vehicle("Toyota", &format!("Model{}", i), 2020);
                repo.save(&mut vehicle).await.unwrap();
                vehicle.id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }
}
