//! Capa de almacenamiento
//!
//! Este módulo define la interfaz de persistencia del concesionario y sus
//! dos backends: PostgreSQL (producción) y memoria (demo y tests).

pub mod memory;
pub mod postgres;

pub use memory::MemStorage;
pub use postgres::PgStorage;

use crate::models::inquiry::{Inquiry, InquiryStatus, NewInquiry};
use crate::models::query::VehicleQueryOptions;
use crate::models::testimonial::{NewTestimonial, Testimonial};
use crate::models::user::{NewUser, User};
use crate::models::vehicle::{
    InventoryStats, NewVehicle, PaginatedVehicles, Vehicle, VehicleStatus, VehicleUpdate,
};
use crate::utils::errors::AppResult;

/// Operaciones de persistencia del concesionario
///
/// Ambos backends comparten la misma semántica de consulta: filtros en AND,
/// categorías normalizadas, orden estable con desempate por id ascendente.
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    // ===== Vehículos =====

    /// Listado plano según las opciones de consulta
    async fn get_vehicles(&self, options: &VehicleQueryOptions) -> AppResult<Vec<Vehicle>>;

    /// Listado paginado con total de coincidencias
    async fn get_paginated_vehicles(
        &self,
        options: &VehicleQueryOptions,
    ) -> AppResult<PaginatedVehicles>;

    async fn get_vehicle_by_id(&self, id: i32) -> AppResult<Option<Vehicle>>;

    /// Vehículos destacados, con límite opcional
    async fn get_featured_vehicles(&self, limit: Option<i64>) -> AppResult<Vec<Vehicle>>;

    /// Vehículos de una categoría (tolerante a slugs y mayúsculas)
    async fn get_vehicles_by_category(&self, category: &str) -> AppResult<Vec<Vehicle>>;

    /// Búsqueda por subcadena en marca, modelo y descripción
    async fn search_vehicles(&self, query: &str) -> AppResult<Vec<Vehicle>>;

    /// Vehículos de la misma categoría, excluyendo al propio
    async fn get_related_vehicles(&self, id: i32, limit: i64) -> AppResult<Vec<Vehicle>>;

    /// Conteos del inventario por estado
    async fn get_inventory_stats(&self) -> AppResult<InventoryStats>;

    async fn create_vehicle(&self, vehicle: NewVehicle) -> AppResult<Vehicle>;

    async fn update_vehicle(&self, id: i32, update: VehicleUpdate) -> AppResult<Option<Vehicle>>;

    async fn update_vehicle_status(
        &self,
        id: i32,
        status: VehicleStatus,
    ) -> AppResult<Option<Vehicle>>;

    /// Elimina un vehículo; las consultas asociadas quedan con referencia nula
    async fn delete_vehicle(&self, id: i32) -> AppResult<bool>;

    async fn vin_exists(&self, vin: &str) -> AppResult<bool>;

    // ===== Consultas =====

    async fn get_inquiries(&self) -> AppResult<Vec<Inquiry>>;

    async fn get_inquiry_by_id(&self, id: i32) -> AppResult<Option<Inquiry>>;

    async fn create_inquiry(&self, inquiry: NewInquiry) -> AppResult<Inquiry>;

    async fn update_inquiry_status(
        &self,
        id: i32,
        status: InquiryStatus,
    ) -> AppResult<Option<Inquiry>>;

    // ===== Testimonios =====

    /// Solo los testimonios ya moderados
    async fn get_approved_testimonials(&self) -> AppResult<Vec<Testimonial>>;

    /// Cola completa de moderación
    async fn get_all_testimonials(&self) -> AppResult<Vec<Testimonial>>;

    async fn create_testimonial(&self, testimonial: NewTestimonial) -> AppResult<Testimonial>;

    async fn approve_testimonial(&self, id: i32) -> AppResult<Option<Testimonial>>;

    async fn delete_testimonial(&self, id: i32) -> AppResult<bool>;

    // ===== Usuarios =====

    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn create_user(&self, user: NewUser) -> AppResult<User>;
}
