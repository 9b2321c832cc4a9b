//! Cookie store en memoria
//!
//! Implementación del almacén con la semántica de cookies del navegador:
//! valores JSON, expiración absoluta por clave y último write gana.

use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::KeyValueStore;

struct CookieEntry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Almacén clave-valor en memoria con TTL
pub struct CookieStore {
    entries: RwLock<HashMap<String, CookieEntry>>,
}

impl CookieStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for CookieStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl KeyValueStore for CookieStore {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) if entry.expires_at > Utc::now() => {
                match serde_json::from_str(&entry.value) {
                    Ok(value) => Ok(Some(value)),
                    Err(e) => {
                        warn!("⚠️ Valor ilegible en la clave {}: {}", key, e);
                        Ok(None)
                    }
                }
            }
            _ => Ok(None),
        }
    }

    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: u64) -> Result<()> {
        let serialized = serde_json::to_string(value)?;
        let expires_at = Utc::now() + Duration::seconds(ttl as i64);
        let mut entries = self.entries.write().await;
        // Purga oportunista de entradas vencidas
        let now = Utc::now();
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.to_string(),
            CookieEntry {
                value: serialized,
                expires_at,
            },
        );
        debug!("💾 Cookie SET: {} (TTL: {}s)", key, ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        debug!("🗑️ Cookie DELETE: {}", key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .map_or(false, |entry| entry.expires_at > Utc::now()))
    }
}
