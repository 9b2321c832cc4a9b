//! Controller de testimonios
//!
//! Moderación de testimonios: entran sin aprobar, el sitio público solo
//! muestra los aprobados.

use std::sync::Arc;

use validator::Validate;

use crate::dto::testimonial_dto::CreateTestimonialRequest;
use crate::models::testimonial::Testimonial;
use crate::repositories::Storage;
use crate::utils::errors::{AppError, AppResult};

pub struct TestimonialController {
    storage: Arc<dyn Storage>,
}

impl TestimonialController {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Vista pública: solo aprobados
    pub async fn approved(&self) -> AppResult<Vec<Testimonial>> {
        self.storage.get_approved_testimonials().await
    }

    /// Cola de moderación completa
    pub async fn all(&self) -> AppResult<Vec<Testimonial>> {
        self.storage.get_all_testimonials().await
    }

    pub async fn create(&self, request: CreateTestimonialRequest) -> AppResult<Testimonial> {
        request.validate()?;
        self.storage.create_testimonial(request.into()).await
    }

    pub async fn approve(&self, id: i32) -> AppResult<Testimonial> {
        self.storage
            .approve_testimonial(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Testimonial not found".to_string()))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.storage.delete_testimonial(id).await? {
            return Err(AppError::NotFound("Testimonial not found".to_string()));
        }
        Ok(())
    }
}
