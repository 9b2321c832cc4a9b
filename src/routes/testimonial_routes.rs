//! Rutas de testimonios

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};

use crate::controllers::testimonial_controller::TestimonialController;
use crate::dto::testimonial_dto::CreateTestimonialRequest;
use crate::models::testimonial::Testimonial;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub fn create_testimonial_router() -> Router<AppState> {
    Router::new()
        .route("/", get(approved_testimonials).post(create_testimonial))
        .route("/all", get(all_testimonials))
        .route("/:id", delete(delete_testimonial))
        .route("/:id/approve", put(approve_testimonial))
}

fn parse_testimonial_id(raw: &str) -> AppResult<i32> {
    raw.parse()
        .map_err(|_| AppError::BadRequest("Invalid testimonial ID".to_string()))
}

async fn approved_testimonials(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Testimonial>>> {
    let controller = TestimonialController::new(state.storage.clone());
    let testimonials = controller.approved().await?;
    Ok(Json(testimonials))
}

async fn all_testimonials(State(state): State<AppState>) -> AppResult<Json<Vec<Testimonial>>> {
    let controller = TestimonialController::new(state.storage.clone());
    let testimonials = controller.all().await?;
    Ok(Json(testimonials))
}

async fn create_testimonial(
    State(state): State<AppState>,
    Json(request): Json<CreateTestimonialRequest>,
) -> AppResult<(StatusCode, Json<Testimonial>)> {
    let controller = TestimonialController::new(state.storage.clone());
    let testimonial = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(testimonial)))
}

async fn approve_testimonial(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Testimonial>> {
    let id = parse_testimonial_id(&id)?;
    let controller = TestimonialController::new(state.storage.clone());
    let testimonial = controller.approve(id).await?;
    Ok(Json(testimonial))
}

async fn delete_testimonial(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_testimonial_id(&id)?;
    let controller = TestimonialController::new(state.storage.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
