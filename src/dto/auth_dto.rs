//! DTOs de autenticación

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::UserResponse;

// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,

    #[validate(length(min = 1))]
    pub password: String,
}

// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserResponse,
}

impl LoginResponse {
    pub fn success(user: UserResponse) -> Self {
        Self {
            success: true,
            user,
        }
    }
}
