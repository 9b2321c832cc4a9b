pub mod auth_routes;
pub mod financing_routes;
pub mod inquiry_routes;
pub mod testimonial_routes;
pub mod upload_routes;
pub mod vehicle_routes;

use axum::{routing::get, Json, Router};
use serde_json::json;

use crate::state::AppState;

/// Router único con todos los recursos del API
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/inquiries", inquiry_routes::create_inquiry_router())
        .nest("/testimonials", testimonial_routes::create_testimonial_router())
        .nest("/auth", auth_routes::create_auth_router())
        .nest("/financing", financing_routes::create_financing_router())
        .nest("/upload", upload_routes::create_upload_router())
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "service": "rpm-auto-backend",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
