//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::Storage;
use crate::services::Mailer;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub mailer: Arc<dyn Mailer>,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn Storage>,
        mailer: Arc<dyn Mailer>,
        config: EnvironmentConfig,
    ) -> Self {
        Self {
            storage,
            mailer,
            config,
        }
    }
}
