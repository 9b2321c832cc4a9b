//! Servicio de estimación de financiamiento
//!
//! Cálculo de cuota mensual con la fórmula estándar de amortización y los
//! defaults del showroom: 20% de entrada, 4.5% APR, 5 años.

use crate::dto::financing_dto::{FinancingEstimate, FinancingEstimateParams};

const DEFAULT_INTEREST_RATE: f64 = 4.5;
const DEFAULT_TERM_YEARS: u32 = 5;
const DEFAULT_DOWN_PAYMENT_RATIO: f64 = 0.2;

/// Cuota mensual de un préstamo (tasa anual en %, plazo en años)
pub fn calculate_loan_payment(principal: f64, annual_rate: f64, term_years: u32) -> f64 {
    if principal <= 0.0 {
        return 0.0;
    }
    let term_months = f64::from(term_years * 12);
    if term_months == 0.0 {
        return 0.0;
    }
    let monthly_rate = annual_rate / 100.0 / 12.0;
    if monthly_rate == 0.0 {
        // Sin interés la cuota es el principal repartido
        return principal / term_months;
    }
    let factor = (1.0 + monthly_rate).powf(term_months);
    principal * monthly_rate * factor / (factor - 1.0)
}

/// Arma la estimación completa aplicando los defaults a lo no especificado
pub fn estimate(params: &FinancingEstimateParams) -> FinancingEstimate {
    let price = params.price.max(0);
    let down_payment = params
        .down_payment
        .unwrap_or_else(|| (price as f64 * DEFAULT_DOWN_PAYMENT_RATIO).round() as i64)
        .clamp(0, price);
    let interest_rate = params.interest_rate.unwrap_or(DEFAULT_INTEREST_RATE);
    let term_years = params.term_years.unwrap_or(DEFAULT_TERM_YEARS);

    let loan_amount = price - down_payment;
    let monthly_payment = round_cents(calculate_loan_payment(
        loan_amount as f64,
        interest_rate,
        term_years,
    ));
    let total_paid = monthly_payment * f64::from(term_years * 12);

    FinancingEstimate {
        price,
        down_payment,
        loan_amount,
        interest_rate,
        term_years,
        monthly_payment,
        total_interest: round_cents(total_paid - loan_amount as f64),
        total_cost: round_cents(down_payment as f64 + total_paid),
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
