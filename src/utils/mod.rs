//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! y parseo de query strings.

pub mod errors;
pub mod query_string;
pub mod validation;
