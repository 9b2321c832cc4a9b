//! DTOs de vehículos

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::vehicle::{NewVehicle, PaginatedVehicles, Vehicle, VehicleStatus, VehicleUpdate};
use crate::utils::validation::{validate_not_empty, validate_vin};

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(custom = "validate_not_empty")]
    pub make: String,

    #[validate(custom = "validate_not_empty")]
    pub model: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    #[validate(range(min = 0))]
    pub price: i32,

    #[validate(range(min = 0))]
    pub mileage: i32,

    #[validate(length(min = 1))]
    pub fuel_type: String,

    #[validate(length(min = 1))]
    pub transmission: String,

    #[validate(length(min = 1))]
    pub color: String,

    #[validate(length(min = 1))]
    pub description: String,

    #[validate(length(min = 1))]
    pub category: String,

    #[serde(default = "default_condition")]
    pub condition: String,

    #[serde(default)]
    pub is_featured: bool,

    #[serde(default)]
    pub features: Vec<String>,

    #[serde(default)]
    pub images: Vec<String>,

    #[validate(custom = "validate_vin")]
    pub vin: String,

    #[serde(default)]
    pub status: VehicleStatus,
}

fn default_condition() -> String {
    "Used".to_string()
}

impl From<CreateVehicleRequest> for NewVehicle {
    fn from(request: CreateVehicleRequest) -> Self {
        Self {
            make: request.make,
            model: request.model,
            year: request.year,
            price: request.price,
            mileage: request.mileage,
            fuel_type: request.fuel_type,
            transmission: request.transmission,
            color: request.color,
            description: request.description,
            category: request.category,
            condition: request.condition,
            is_featured: request.is_featured,
            features: request.features,
            images: request.images,
            vin: request.vin,
            status: request.status,
        }
    }
}

// Request de actualización parcial; el estado tiene endpoint propio
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[validate(custom = "validate_not_empty")]
    pub make: Option<String>,

    #[validate(custom = "validate_not_empty")]
    pub model: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,

    #[validate(range(min = 0))]
    pub price: Option<i32>,

    #[validate(range(min = 0))]
    pub mileage: Option<i32>,

    #[validate(length(min = 1))]
    pub fuel_type: Option<String>,

    #[validate(length(min = 1))]
    pub transmission: Option<String>,

    #[validate(length(min = 1))]
    pub color: Option<String>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    #[validate(length(min = 1))]
    pub category: Option<String>,

    #[validate(length(min = 1))]
    pub condition: Option<String>,

    pub is_featured: Option<bool>,

    pub features: Option<Vec<String>>,

    pub images: Option<Vec<String>>,

    #[validate(custom = "validate_vin")]
    pub vin: Option<String>,
}

impl From<UpdateVehicleRequest> for VehicleUpdate {
    fn from(request: UpdateVehicleRequest) -> Self {
        Self {
            make: request.make,
            model: request.model,
            year: request.year,
            price: request.price,
            mileage: request.mileage,
            fuel_type: request.fuel_type,
            transmission: request.transmission,
            color: request.color,
            description: request.description,
            category: request.category,
            condition: request.condition,
            is_featured: request.is_featured,
            features: request.features,
            images: request.images,
            vin: request.vin,
        }
    }
}

// Request de cambio de estado
#[derive(Debug, Deserialize)]
pub struct UpdateVehicleStatusRequest {
    pub status: String,
}

// Listado plano o paginado según la consulta
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum VehicleListing {
    Paginated(PaginatedVehicles),
    Flat(Vec<Vehicle>),
}
