//! Servicio de correo
//!
//! Notificaciones de consultas nuevas. El backend real entrega via Formspree;
//! sin endpoint configurado las notificaciones solo quedan en el log.

use anyhow::Result;
use serde_json::json;

use crate::models::inquiry::Inquiry;

/// Mensaje de notificación ya compuesto
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub subject: String,
    pub text: String,
    pub reply_to: Option<String>,
}

/// Canal de salida de notificaciones
#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Relay HTTP de formularios (Formspree)
pub struct FormspreeMailer {
    endpoint: String,
    client: reqwest::Client,
}

impl FormspreeMailer {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl Mailer for FormspreeMailer {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({
                "_subject": message.subject,
                "message": message.text,
                "_replyto": message.reply_to,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Formspree respondió {}", response.status());
        }
        log::info!("📧 Notificación entregada via Formspree");
        Ok(())
    }
}

/// Backend de desarrollo: deja constancia en el log y nada más
pub struct LogMailer;

#[async_trait::async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        log::info!("📧 [correo simulado] {}", message.subject);
        log::debug!("📧 Cuerpo: {}", message.text);
        Ok(())
    }
}

/// Compone la notificación de una consulta nueva
pub fn format_inquiry_email(inquiry: &Inquiry) -> EmailMessage {
    let mut text = format!(
        "Name: {}\nEmail: {}\nPhone: {}\nSubject: {}\n\nMessage:\n{}\n",
        inquiry.name,
        inquiry.email,
        inquiry.phone.as_deref().unwrap_or("Not provided"),
        inquiry.subject,
        inquiry.message,
    );
    if let Some(vehicle_id) = inquiry.vehicle_id {
        text.push_str(&format!("\nRelated Vehicle ID: {}\n", vehicle_id));
    }

    EmailMessage {
        subject: format!("New RPM Auto Website Inquiry: {}", inquiry.subject),
        text,
        reply_to: Some(inquiry.email.clone()),
    }
}
