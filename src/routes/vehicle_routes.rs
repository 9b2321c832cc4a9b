//! Rutas de vehículos

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, UpdateVehicleStatusRequest, VehicleListing,
};
use crate::models::vehicle::{InventoryStats, Vehicle};
use crate::services::upload_service::UploadService;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/featured", get(featured_vehicles))
        .route("/category/:category", get(vehicles_by_category))
        .route("/search", get(search_vehicles))
        .route("/filter", get(filter_vehicles))
        .route("/stats", get(inventory_stats))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route("/:id/related", get(related_vehicles))
        .route("/:id/status", put(update_vehicle_status))
}

/// El id viaja como path param textual; "abc" es 400, no 404
fn parse_vehicle_id(raw: &str) -> AppResult<i32> {
    raw.parse()
        .map_err(|_| AppError::BadRequest("Invalid vehicle ID".to_string()))
}

/// Límite opcional: valores no numéricos o menores a 1 se ignoran
fn parse_limit(params: &HashMap<String, String>) -> Option<i64> {
    params
        .get("limit")
        .and_then(|value| value.parse::<i64>().ok())
        .filter(|limit| *limit >= 1)
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<VehicleListing>> {
    let controller = VehicleController::new(state.storage.clone());
    let listing = controller.list(&params).await?;
    Ok(Json(listing))
}

async fn featured_vehicles(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Vec<Vehicle>>> {
    let include_all = params.get("includeAll").map(String::as_str) == Some("true");
    let controller = VehicleController::new(state.storage.clone());
    let vehicles = controller.featured(parse_limit(&params), include_all).await?;
    Ok(Json(vehicles))
}

async fn vehicles_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<Vehicle>>> {
    let controller = VehicleController::new(state.storage.clone());
    let vehicles = controller.by_category(&category).await?;
    Ok(Json(vehicles))
}

async fn search_vehicles(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Vec<Vehicle>>> {
    let Some(query) = params.get("q").filter(|q| !q.is_empty()) else {
        return Err(AppError::BadRequest("Search query is required".to_string()));
    };
    let controller = VehicleController::new(state.storage.clone());
    let vehicles = controller.search(query).await?;
    Ok(Json(vehicles))
}

async fn filter_vehicles(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Vec<Vehicle>>> {
    let controller = VehicleController::new(state.storage.clone());
    let vehicles = controller.filter(&params).await?;
    Ok(Json(vehicles))
}

async fn inventory_stats(State(state): State<AppState>) -> AppResult<Json<InventoryStats>> {
    let controller = VehicleController::new(state.storage.clone());
    let stats = controller.stats().await?;
    Ok(Json(stats))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vehicle>> {
    let id = parse_vehicle_id(&id)?;
    let controller = VehicleController::new(state.storage.clone());
    let vehicle = controller.get(id).await?;
    Ok(Json(vehicle))
}

async fn related_vehicles(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<Vec<Vehicle>>> {
    let id = parse_vehicle_id(&id)?;
    let controller = VehicleController::new(state.storage.clone());
    let vehicles = controller.related(id, parse_limit(&params)).await?;
    Ok(Json(vehicles))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> AppResult<(StatusCode, Json<Vehicle>)> {
    let controller = VehicleController::new(state.storage.clone());
    let vehicle = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateVehicleRequest>,
) -> AppResult<Json<Vehicle>> {
    let id = parse_vehicle_id(&id)?;
    let controller = VehicleController::new(state.storage.clone());
    let vehicle = controller.update(id, request).await?;
    Ok(Json(vehicle))
}

async fn update_vehicle_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateVehicleStatusRequest>,
) -> AppResult<Json<Vehicle>> {
    let id = parse_vehicle_id(&id)?;
    let controller = VehicleController::new(state.storage.clone());
    let vehicle = controller.update_status(id, &request.status).await?;
    Ok(Json(vehicle))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_vehicle_id(&id)?;
    let controller = VehicleController::new(state.storage.clone());
    let vehicle = controller.delete(id).await?;

    // Limpieza best-effort de las imágenes locales del vehículo
    let uploads = UploadService::new(state.config.upload_dir.clone());
    tokio::spawn(async move {
        for image in &vehicle.images {
            if image.starts_with("/uploads/") {
                uploads.delete_image(image).await;
            }
        }
    });

    Ok(StatusCode::NO_CONTENT)
}
