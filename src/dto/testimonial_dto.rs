//! DTOs de testimonios

use serde::Deserialize;
use validator::Validate;

use crate::models::testimonial::NewTestimonial;
use crate::utils::validation::validate_not_empty;

// Request de un testimonio nuevo (entra sin aprobar)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestimonialRequest {
    #[validate(custom = "validate_not_empty")]
    pub name: String,

    #[validate(length(min = 1))]
    pub vehicle: String,

    #[validate(range(min = 1, max = 5))]
    pub rating: i32,

    #[validate(length(min = 1))]
    pub comment: String,
}

impl From<CreateTestimonialRequest> for NewTestimonial {
    fn from(request: CreateTestimonialRequest) -> Self {
        Self {
            name: request.name,
            vehicle: request.vehicle,
            rating: request.rating,
            comment: request.comment,
        }
    }
}
