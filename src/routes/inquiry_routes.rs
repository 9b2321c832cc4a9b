//! Rutas de consultas

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::controllers::inquiry_controller::InquiryController;
use crate::dto::inquiry_dto::{CreateInquiryRequest, UpdateInquiryStatusRequest};
use crate::models::inquiry::Inquiry;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub fn create_inquiry_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_inquiries).post(create_inquiry))
        .route("/:id", get(get_inquiry))
        .route("/:id/status", put(update_inquiry_status))
}

fn parse_inquiry_id(raw: &str) -> AppResult<i32> {
    raw.parse()
        .map_err(|_| AppError::BadRequest("Invalid inquiry ID".to_string()))
}

async fn create_inquiry(
    State(state): State<AppState>,
    Json(request): Json<CreateInquiryRequest>,
) -> AppResult<(StatusCode, Json<Inquiry>)> {
    let controller = InquiryController::new(state.storage.clone(), state.mailer.clone());
    let inquiry = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(inquiry)))
}

async fn list_inquiries(State(state): State<AppState>) -> AppResult<Json<Vec<Inquiry>>> {
    let controller = InquiryController::new(state.storage.clone(), state.mailer.clone());
    let inquiries = controller.list().await?;
    Ok(Json(inquiries))
}

async fn get_inquiry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Inquiry>> {
    let id = parse_inquiry_id(&id)?;
    let controller = InquiryController::new(state.storage.clone(), state.mailer.clone());
    let inquiry = controller.get(id).await?;
    Ok(Json(inquiry))
}

async fn update_inquiry_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateInquiryStatusRequest>,
) -> AppResult<Json<Inquiry>> {
    let id = parse_inquiry_id(&id)?;
    let controller = InquiryController::new(state.storage.clone(), state.mailer.clone());
    let inquiry = controller.update_status(id, &request.status).await?;
    Ok(Json(inquiry))
}
