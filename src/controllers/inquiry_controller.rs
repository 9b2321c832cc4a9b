//! Controller de consultas
//!
//! Registro de consultas del formulario de contacto y su seguimiento.
//! La notificación por correo corre en segundo plano: un fallo del canal
//! nunca afecta la respuesta HTTP.

use std::sync::Arc;

use validator::Validate;

use crate::dto::inquiry_dto::CreateInquiryRequest;
use crate::models::inquiry::{Inquiry, InquiryStatus};
use crate::repositories::Storage;
use crate::services::email_service::{format_inquiry_email, Mailer};
use crate::utils::errors::{AppError, AppResult};

pub struct InquiryController {
    storage: Arc<dyn Storage>,
    mailer: Arc<dyn Mailer>,
}

impl InquiryController {
    pub fn new(storage: Arc<dyn Storage>, mailer: Arc<dyn Mailer>) -> Self {
        Self { storage, mailer }
    }

    pub async fn create(&self, request: CreateInquiryRequest) -> AppResult<Inquiry> {
        request.validate()?;

        let inquiry = self.storage.create_inquiry(request.into()).await?;

        // Notificación en segundo plano
        let mailer = self.mailer.clone();
        let message = format_inquiry_email(&inquiry);
        let inquiry_id = inquiry.id;
        tokio::spawn(async move {
            match mailer.send(&message).await {
                Ok(()) => {
                    log::info!("📧 Notificación de la consulta #{} enviada", inquiry_id)
                }
                Err(e) => {
                    log::error!(
                        "❌ Error enviando la notificación de la consulta #{}: {}",
                        inquiry_id,
                        e
                    )
                }
            }
        });

        Ok(inquiry)
    }

    pub async fn list(&self) -> AppResult<Vec<Inquiry>> {
        self.storage.get_inquiries().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Inquiry> {
        self.storage
            .get_inquiry_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Inquiry not found".to_string()))
    }

    pub async fn update_status(&self, id: i32, status_value: &str) -> AppResult<Inquiry> {
        let Some(status) = InquiryStatus::parse(status_value) else {
            return Err(AppError::BadRequest(
                "Invalid status. Must be one of: new, contacted, closed".to_string(),
            ));
        };
        self.storage
            .update_inquiry_status(id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Inquiry not found".to_string()))
    }
}
