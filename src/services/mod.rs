//! Services module
//!
//! Este módulo contiene la lógica de negocio y servicios de la aplicación.
//! Los servicios encapsulan operaciones que involucran integraciones externas
//! (correo, disco) o cálculos independientes del almacenamiento.

pub mod email_service;
pub mod financing_service;
pub mod tracking_service;
pub mod upload_service;

pub use email_service::{format_inquiry_email, FormspreeMailer, LogMailer, Mailer};
pub use tracking_service::TrackingService;
pub use upload_service::UploadService;
