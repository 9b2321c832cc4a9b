//! Modelo de Testimonial
//!
//! Testimonios de clientes con moderación: solo los aprobados se publican.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Testimonio de un cliente
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: i32,
    pub name: String,
    pub vehicle: String,
    pub rating: i32,
    pub comment: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Datos para registrar un testimonio nuevo
#[derive(Debug, Clone)]
pub struct NewTestimonial {
    pub name: String,
    pub vehicle: String,
    pub rating: i32,
    pub comment: String,
}
