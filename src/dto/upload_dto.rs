//! DTOs de subida de imágenes

use serde::Serialize;

// Response de subida individual
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub url: String,
    pub filename: String,
}

// Imagen dentro de una subida múltiple
#[derive(Debug, Serialize)]
pub struct UploadedImage {
    pub url: String,
    pub filename: String,
}

// Response de subida múltiple
#[derive(Debug, Serialize)]
pub struct MultiUploadResponse {
    pub message: String,
    pub files: Vec<UploadedImage>,
}
