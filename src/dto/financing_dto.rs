//! DTOs del estimador de financiamiento

use serde::{Deserialize, Serialize};

// Parámetros del estimador (query params); solo el precio es obligatorio
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancingEstimateParams {
    pub price: i64,
    pub down_payment: Option<i64>,
    pub interest_rate: Option<f64>,
    pub term_years: Option<u32>,
}

// Estimación calculada
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancingEstimate {
    pub price: i64,
    pub down_payment: i64,
    pub loan_amount: i64,
    pub interest_rate: f64,
    pub term_years: u32,
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_cost: f64,
}
