//! Rutas del estimador de financiamiento

use axum::{extract::Query, routing::get, Json, Router};

use crate::dto::financing_dto::{FinancingEstimate, FinancingEstimateParams};
use crate::services::financing_service;
use crate::state::AppState;

pub fn create_financing_router() -> Router<AppState> {
    Router::new().route("/estimate", get(estimate))
}

/// Cálculo puro; no toca el almacenamiento
async fn estimate(Query(params): Query<FinancingEstimateParams>) -> Json<FinancingEstimate> {
    Json(financing_service::estimate(&params))
}
