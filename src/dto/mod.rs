//! DTOs de la API
//!
//! Requests y responses del contrato HTTP. Los recursos viajan en camelCase
//! tal como los serializan los modelos.

pub mod auth_dto;
pub mod financing_dto;
pub mod inquiry_dto;
pub mod testimonial_dto;
pub mod upload_dto;
pub mod vehicle_dto;
