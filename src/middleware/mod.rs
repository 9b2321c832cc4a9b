//! Middleware del sistema
//!
//! Este módulo contiene el middleware de CORS y utilidades
//! compartidas entre las rutas.

pub mod cors;

pub use cors::*;
