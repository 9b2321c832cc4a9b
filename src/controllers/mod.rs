//! Controllers de la aplicación
//!
//! Este módulo contiene la lógica de negocio de cada recurso. Los handlers
//! de las rutas construyen el controller con las dependencias del estado
//! compartido y delegan aquí.

pub mod auth_controller;
pub mod inquiry_controller;
pub mod testimonial_controller;
pub mod vehicle_controller;
