//! Almacenamiento clave-valor
//!
//! Este módulo contiene la interfaz de persistencia con TTL que usan las
//! utilidades de tracking del visitante, y su implementación en memoria
//! con semántica de cookies.

pub mod cookie_store;

pub use cookie_store::CookieStore;

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Operaciones de un almacén clave-valor con expiración
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Obtener un valor deserializado; una clave vencida o ausente devuelve None
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>>;

    /// Guardar un valor serializado con TTL en segundos
    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: u64) -> Result<()>;

    /// Eliminar una clave
    async fn delete(&self, key: &str) -> Result<()>;

    /// Verificar si una clave existe y sigue vigente
    async fn exists(&self, key: &str) -> Result<bool>;
}
