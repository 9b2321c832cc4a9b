//! Controller de autenticación
//!
//! Login del panel de administración. El usuario desconocido y la
//! contraseña incorrecta responden con el mismo mensaje.

use std::sync::Arc;

use bcrypt::{hash, verify, DEFAULT_COST};
use validator::Validate;

use crate::config::environment::EnvironmentConfig;
use crate::dto::auth_dto::LoginRequest;
use crate::models::user::{NewUser, UserResponse};
use crate::repositories::Storage;
use crate::utils::errors::{AppError, AppResult};

pub struct AuthController {
    storage: Arc<dyn Storage>,
}

impl AuthController {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<UserResponse> {
        request.validate()?;

        let user = self
            .storage
            .get_user_by_username(&request.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

        let valid = verify(&request.password, &user.password)
            .map_err(|e| AppError::Internal(format!("Error verificando el hash: {}", e)))?;
        if !valid {
            return Err(AppError::Unauthorized(
                "Invalid username or password".to_string(),
            ));
        }

        log::info!("🔐 Login correcto: {}", user.username);
        Ok(user.into())
    }
}

/// Siembra el usuario administrador en el primer arranque
pub async fn ensure_admin_user(
    storage: &dyn Storage,
    config: &EnvironmentConfig,
) -> AppResult<()> {
    if storage
        .get_user_by_username(&config.admin_username)
        .await?
        .is_some()
    {
        return Ok(());
    }

    let password_hash = hash(&config.admin_password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Error hasheando la contraseña: {}", e)))?;

    storage
        .create_user(NewUser {
            username: config.admin_username.clone(),
            password: password_hash,
            email: None,
            role: "admin".to_string(),
            name: None,
            phone: None,
        })
        .await?;

    log::info!("👤 Usuario administrador '{}' creado", config.admin_username);
    Ok(())
}
