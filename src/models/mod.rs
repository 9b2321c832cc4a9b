//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema PostgreSQL
//! más la lógica de consulta del inventario y de filtros del catálogo.

pub mod filter_state;
pub mod inquiry;
pub mod query;
pub mod testimonial;
pub mod user;
pub mod vehicle;
