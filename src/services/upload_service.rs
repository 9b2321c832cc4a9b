//! Servicio de subida de imágenes
//!
//! Persistencia en disco de las fotos del inventario bajo el directorio
//! público de uploads, con nombres únicos que conservan la extensión.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

/// Tipos MIME de imagen aceptados
pub const ALLOWED_IMAGE_TYPES: [&str; 4] =
    ["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// Tamaño máximo por archivo: 5MB
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Escritura y borrado de imágenes del inventario
pub struct UploadService {
    upload_dir: PathBuf,
}

impl UploadService {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
        }
    }

    pub fn is_allowed_type(content_type: &str) -> bool {
        ALLOWED_IMAGE_TYPES.contains(&content_type)
    }

    /// Nombre único: timestamp-uuid con la extensión original en minúsculas
    fn unique_filename(original_name: Option<&str>) -> String {
        let extension = original_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_else(|| "jpg".to_string());
        format!(
            "{}-{}.{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4(),
            extension
        )
    }

    /// Guarda una imagen bajo uploads/vehicles y devuelve (url pública, nombre)
    pub async fn save_image(
        &self,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<(String, String)> {
        let directory = self.upload_dir.join("vehicles");
        tokio::fs::create_dir_all(&directory).await?;

        let filename = Self::unique_filename(original_name);
        tokio::fs::write(directory.join(&filename), bytes).await?;
        log::debug!("🖼️ Imagen guardada: {} ({} bytes)", filename, bytes.len());

        Ok((format!("/uploads/vehicles/{}", filename), filename))
    }

    /// Borrado best-effort de una imagen subida localmente.
    /// Solo acepta URLs bajo /uploads/ sin componentes de escape.
    pub async fn delete_image(&self, public_url: &str) -> bool {
        let Some(relative) = public_url.strip_prefix("/uploads/") else {
            return false;
        };
        if relative.contains("..") {
            return false;
        }
        match tokio::fs::remove_file(self.upload_dir.join(relative)).await {
            Ok(()) => {
                log::debug!("🗑️ Imagen eliminada: {}", public_url);
                true
            }
            Err(e) => {
                log::warn!("⚠️ No se pudo borrar {}: {}", public_url, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_service() -> UploadService {
        let dir = std::env::temp_dir().join(format!("rpm-auto-uploads-{}", Uuid::new_v4()));
        UploadService::new(dir)
    }

    #[test]
    fn test_allowed_types() {
        assert!(UploadService::is_allowed_type("image/jpeg"));
        assert!(UploadService::is_allowed_type("image/webp"));
        assert!(!UploadService::is_allowed_type("image/gif"));
        assert!(!UploadService::is_allowed_type("application/pdf"));
    }

    #[test]
    fn test_unique_filename_keeps_extension() {
        let name = UploadService::unique_filename(Some("Photo.PNG"));
        assert!(name.ends_with(".png"));
        let name = UploadService::unique_filename(None);
        assert!(name.ends_with(".jpg"));
        let name = UploadService::unique_filename(Some("noextension"));
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn test_unique_filenames_differ() {
        let a = UploadService::unique_filename(Some("a.jpg"));
        let b = UploadService::unique_filename(Some("a.jpg"));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_save_and_delete_round_trip() {
        let service = temp_service();
        let (url, filename) = service
            .save_image(Some("gt3.jpg"), b"fake-jpeg-bytes")
            .await
            .unwrap();
        assert!(url.starts_with("/uploads/vehicles/"));
        assert!(url.ends_with(&filename));

        assert!(service.delete_image(&url).await);
        // segundo borrado: el archivo ya no existe
        assert!(!service.delete_image(&url).await);
    }

    #[tokio::test]
    async fn test_delete_rejects_foreign_urls() {
        let service = temp_service();
        assert!(!service.delete_image("https://images.unsplash.com/photo").await);
        assert!(!service.delete_image("/uploads/../etc/passwd").await);
    }
}
