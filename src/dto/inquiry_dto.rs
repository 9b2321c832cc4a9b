//! DTOs de consultas

use serde::Deserialize;
use validator::Validate;

use crate::models::inquiry::NewInquiry;
use crate::utils::validation::validate_not_empty;

// Request de una consulta desde el formulario de contacto
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInquiryRequest {
    #[validate(custom = "validate_not_empty")]
    pub name: String,

    #[validate(email)]
    pub email: String,

    pub phone: Option<String>,

    #[validate(length(min = 1))]
    pub subject: String,

    #[validate(length(min = 1))]
    pub message: String,

    pub vehicle_id: Option<i32>,
}

impl From<CreateInquiryRequest> for NewInquiry {
    fn from(request: CreateInquiryRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            phone: request.phone,
            subject: request.subject,
            message: request.message,
            vehicle_id: request.vehicle_id,
        }
    }
}

// Request de cambio de estado de seguimiento
#[derive(Debug, Deserialize)]
pub struct UpdateInquiryStatusRequest {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_email() {
        let request: CreateInquiryRequest = serde_json::from_value(serde_json::json!({
            "name": "Jane",
            "email": "not-an-email",
            "subject": "Hi",
            "message": "Hello"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_accepts_camel_case_vehicle_id() {
        let request: CreateInquiryRequest = serde_json::from_value(serde_json::json!({
            "name": "Jane",
            "email": "jane@example.com",
            "subject": "Test drive",
            "message": "Interested in the GT3",
            "vehicleId": 3
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.vehicle_id, Some(3));
    }
}
