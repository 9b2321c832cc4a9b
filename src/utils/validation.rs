//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! del inventario.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    // VIN estándar: 17 caracteres, sin I, O ni Q
    static ref VIN_REGEX: Regex = Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").unwrap();
}

/// Validar formato de VIN
pub fn validate_vin(value: &str) -> Result<(), ValidationError> {
    if !VIN_REGEX.is_match(&value.to_uppercase()) {
        let mut error = ValidationError::new("vin");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"17 alphanumeric characters (no I, O, Q)".to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_vin() {
        assert!(validate_vin("WP0AC2A99JS175960").is_ok());
        assert!(validate_vin("wp0ac2a99js175960").is_ok());

        // Demasiado corto
        assert!(validate_vin("WP0AC2A99").is_err());
        // Contiene letras prohibidas
        assert!(validate_vin("WP0AC2A99JS17596O").is_err());
        assert!(validate_vin("IIIIIIIIIIIIIIIII").is_err());
        assert!(validate_vin("").is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Porsche").is_ok());
        assert!(validate_not_empty("").is_err());
        assert!(validate_not_empty("   ").is_err());
    }
}
