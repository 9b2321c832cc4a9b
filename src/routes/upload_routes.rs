//! Rutas de subida de imágenes de vehículos

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};

use crate::dto::upload_dto::{MultiUploadResponse, UploadResponse, UploadedImage};
use crate::services::upload_service::{UploadService, MAX_IMAGE_BYTES};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

const MAX_FILES_PER_REQUEST: usize = 10;

pub fn create_upload_router() -> Router<AppState> {
    Router::new()
        .route("/image", post(upload_image))
        .route("/images", post(upload_images))
        // Margen por encima de 10 archivos de 5MB más el overhead multipart
        .layer(DefaultBodyLimit::max(55 * 1024 * 1024))
}

fn validate_image(content_type: Option<&str>, size: usize) -> AppResult<()> {
    match content_type {
        Some(ct) if UploadService::is_allowed_type(ct) => {}
        _ => {
            return Err(AppError::BadRequest(
                "Only image files are allowed (jpeg, png, webp)".to_string(),
            ))
        }
    }
    if size > MAX_IMAGE_BYTES {
        return Err(AppError::BadRequest(
            "File too large. Maximum size is 5MB".to_string(),
        ));
    }
    Ok(())
}

async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    let service = UploadService::new(&state.config.upload_dir);

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Invalid multipart payload: {}", e))
    })? {
        if field.name() != Some("image") {
            continue;
        }

        let original_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(|e| {
            AppError::BadRequest(format!("Invalid multipart payload: {}", e))
        })?;

        validate_image(content_type.as_deref(), data.len())?;

        let (url, filename) = service.save_image(original_name.as_deref(), &data).await?;

        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                message: "Image uploaded successfully".to_string(),
                url,
                filename,
            }),
        ));
    }

    Err(AppError::BadRequest("No file uploaded".to_string()))
}

async fn upload_images(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<MultiUploadResponse>)> {
    let service = UploadService::new(&state.config.upload_dir);
    let mut files: Vec<UploadedImage> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Invalid multipart payload: {}", e))
    })? {
        if field.name() != Some("images") {
            continue;
        }

        if files.len() >= MAX_FILES_PER_REQUEST {
            return Err(AppError::BadRequest(
                "Too many files. Maximum is 10".to_string(),
            ));
        }

        let original_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(|e| {
            AppError::BadRequest(format!("Invalid multipart payload: {}", e))
        })?;

        validate_image(content_type.as_deref(), data.len())?;

        let (url, filename) = service.save_image(original_name.as_deref(), &data).await?;
        files.push(UploadedImage { url, filename });
    }

    if files.is_empty() {
        return Err(AppError::BadRequest("No files uploaded".to_string()));
    }

    Ok((
        StatusCode::CREATED,
        Json(MultiUploadResponse {
            message: "Images uploaded successfully".to_string(),
            files,
        }),
    ))
}
