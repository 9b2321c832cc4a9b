//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle del inventario y sus variantes
//! para operaciones CRUD.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Estado de stock del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Available,
    Sold,
    Reserved,
    Pending,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Sold => "sold",
            VehicleStatus::Reserved => "reserved",
            VehicleStatus::Pending => "pending",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "available" => Some(VehicleStatus::Available),
            "sold" => Some(VehicleStatus::Sold),
            "reserved" => Some(VehicleStatus::Reserved),
            "pending" => Some(VehicleStatus::Pending),
            _ => None,
        }
    }
}

impl Default for VehicleStatus {
    fn default() -> Self {
        VehicleStatus::Available
    }
}

/// Vehículo del inventario
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i32,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: i32,
    pub mileage: i32,
    pub fuel_type: String,
    pub transmission: String,
    pub color: String,
    pub description: String,
    pub category: String,
    pub condition: String,
    pub is_featured: bool,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub vin: String,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
}

/// Datos para insertar un vehículo nuevo
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: i32,
    pub mileage: i32,
    pub fuel_type: String,
    pub transmission: String,
    pub color: String,
    pub description: String,
    pub category: String,
    pub condition: String,
    pub is_featured: bool,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub vin: String,
    pub status: VehicleStatus,
}

/// Campos parciales para actualizar un vehículo existente
#[derive(Debug, Clone, Default)]
pub struct VehicleUpdate {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub price: Option<i32>,
    pub mileage: Option<i32>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub is_featured: Option<bool>,
    pub features: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub vin: Option<String>,
}

/// Envelope de listados paginados
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedVehicles {
    pub items: Vec<Vehicle>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// Resumen del inventario
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total: i64,
    pub available: i64,
    pub sold: i64,
    pub reserved: i64,
    pub pending: i64,
    pub featured: i64,
}
