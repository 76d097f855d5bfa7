use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use std::collections::HashMap;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::api_response::ApiResponse;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, MergeVehicleRequest, UpdateVehicleRequest, VehicleResponse,
};
use crate::models::vehicle::{DimensionQuery, WeightQuery};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/", get(list_vehicles))
        .route("/many", post(create_vehicles))
        .route("/search", get(search_vehicles))
        .route("/weight", get(filter_by_weight))
        .route("/:id", get(get_vehicle))
        .route("/:id", put(update_vehicle))
        .route("/:id", delete(delete_vehicle))
        .route("/:id/max-speed", put(update_max_speed))
        .route("/:id/fuel-type", put(update_fuel_type))
        .route("/color/:color/year/:year", get(find_by_color_and_year))
        .route("/brand/:brand/between/:start/:end", get(find_by_brand_and_year_range))
        .route("/fuel-type/:type", get(find_by_fuel_type))
        .route("/transmission/:type", get(find_by_transmission))
        .route("/average-speed/brand/:brand", get(velocity_average_by_brand))
        .route("/average-capacity/brand/:brand", get(capacity_average_by_brand))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<(http::StatusCode, Json<ApiResponse<VehicleResponse>>), AppError> {
    let controller = VehicleController::new(state.repository.clone());
    let response = controller.create(request).await?;
    Ok((
        http::StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            response,
            "Vehículo creado exitosamente".to_string(),
        )),
    ))
}

async fn create_vehicles(
    State(state): State<AppState>,
    Json(requests): Json<Vec<CreateVehicleRequest>>,
) -> Result<(http::StatusCode, Json<ApiResponse<Vec<VehicleResponse>>>), AppError> {
    let controller = VehicleController::new(state.repository.clone());
    let responses = controller.create_many(requests).await?;
    Ok((
        http::StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            responses,
            "Vehículos creados exitosamente".to_string(),
        )),
    ))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<HashMap<i32, VehicleResponse>>>, AppError> {
    let controller = VehicleController::new(state.repository.clone());
    let response = controller.find_all().await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn search_vehicles(
    State(state): State<AppState>,
    Query(query): Query<DimensionQuery>,
) -> Result<Json<ApiResponse<HashMap<i32, VehicleResponse>>>, AppError> {
    let controller = VehicleController::new(state.repository.clone());
    let response = controller.find_query(&query).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn filter_by_weight(
    State(state): State<AppState>,
    Query(query): Query<WeightQuery>,
) -> Result<Json<ApiResponse<HashMap<i32, VehicleResponse>>>, AppError> {
    let controller = VehicleController::new(state.repository.clone());
    let response = controller.filter_by_weight(&query).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.repository.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.repository.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Vehículo actualizado exitosamente".to_string(),
    )))
}

async fn update_max_speed(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<MergeVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.repository.clone());
    let response = controller.merge_update(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Velocidad máxima actualizada exitosamente".to_string(),
    )))
}

async fn update_fuel_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<MergeVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.repository.clone());
    let response = controller.merge_update(id, request).await?;
    Ok(Json(ApiResponse::success_with_message(
        response,
        "Tipo de combustible actualizado exitosamente".to_string(),
    )))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = VehicleController::new(state.repository.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message_only(
        "Vehículo eliminado exitosamente".to_string(),
    )))
}

async fn find_by_color_and_year(
    State(state): State<AppState>,
    Path((color, year)): Path<(String, i32)>,
) -> Result<Json<ApiResponse<HashMap<i32, VehicleResponse>>>, AppError> {
    let controller = VehicleController::new(state.repository.clone());
    let response = controller.find_by_color_and_year(&color, year).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn find_by_brand_and_year_range(
    State(state): State<AppState>,
    Path((brand, start, end)): Path<(String, i32, i32)>,
) -> Result<Json<ApiResponse<HashMap<i32, VehicleResponse>>>, AppError> {
    let controller = VehicleController::new(state.repository.clone());
    let response = controller
        .find_by_brand_and_year_range(&brand, start, end)
        .await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn find_by_fuel_type(
    State(state): State<AppState>,
    Path(fuel_type): Path<String>,
) -> Result<Json<ApiResponse<HashMap<i32, VehicleResponse>>>, AppError> {
    let controller = VehicleController::new(state.repository.clone());
    let response = controller.find_by_fuel_type(&fuel_type).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn find_by_transmission(
    State(state): State<AppState>,
    Path(transmission): Path<String>,
) -> Result<Json<ApiResponse<HashMap<i32, VehicleResponse>>>, AppError> {
    let controller = VehicleController::new(state.repository.clone());
    let response = controller.find_by_transmission(&transmission).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn velocity_average_by_brand(
    State(state): State<AppState>,
    Path(brand): Path<String>,
) -> Result<Json<ApiResponse<f64>>, AppError> {
    let controller = VehicleController::new(state.repository.clone());
    let average = controller.velocity_average_by_brand(&brand).await?;
    Ok(Json(ApiResponse::success(average)))
}

async fn capacity_average_by_brand(
    State(state): State<AppState>,
    Path(brand): Path<String>,
) -> Result<Json<ApiResponse<f64>>, AppError> {
    let controller = VehicleController::new(state.repository.clone());
    let average = controller.capacity_average_by_brand(&brand).await?;
    Ok(Json(ApiResponse::success(average)))
}
