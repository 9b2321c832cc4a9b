//! RPM Auto - Backend del concesionario
//!
//! Catálogo de vehículos de lujo con búsqueda, filtros y paginación,
//! consultas de clientes con relevo de correo, testimonios moderados,
//! administración de inventario con subida de imágenes, estimador de
//! financiamiento y utilidades de seguimiento con consentimiento.

pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
