//! Modelo de Inquiry
//!
//! Consultas enviadas desde los formularios de contacto del sitio.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Estado de seguimiento de una consulta
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    New,
    Contacted,
    Closed,
}

impl InquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::New => "new",
            InquiryStatus::Contacted => "contacted",
            InquiryStatus::Closed => "closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(InquiryStatus::New),
            "contacted" => Some(InquiryStatus::Contacted),
            "closed" => Some(InquiryStatus::Closed),
            _ => None,
        }
    }
}

impl Default for InquiryStatus {
    fn default() -> Self {
        InquiryStatus::New
    }
}

/// Consulta de un visitante
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub vehicle_id: Option<i32>,
    pub status: InquiryStatus,
    pub created_at: DateTime<Utc>,
}

/// Datos para registrar una consulta nueva
#[derive(Debug, Clone)]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub vehicle_id: Option<i32>,
}
