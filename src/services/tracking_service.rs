//! Servicio de tracking del visitante
//!
//! Analítica con consentimiento sobre el almacén clave-valor: vehículos
//! vistos, preferencias de filtros, sesión con atribución UTM, popularidad
//! por vehículo y pruebas A/B con variante fija.
//!
//! Toda escritura de analítica exige consentimiento previo; la única
//! excepción es la decisión de consentimiento misma. Las lecturas de
//! vistos-recientemente y del contador de vistas no se bloquean, para que
//! datos guardados antes de retirar el consentimiento sigan legibles.

use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::cache::KeyValueStore;
use crate::utils::query_string::parse_query_string;

const CONSENT_COOKIE: &str = "cookie_consent";
const RECENTLY_VIEWED_COOKIE: &str = "recently_viewed_vehicles";
const FILTER_PREFERENCES_COOKIE: &str = "filter_preferences";
const VIEWED_COUNT_COOKIE: &str = "viewed_vehicles_count";
const POPULARITY_COOKIE: &str = "vehicle_popularity";
const SESSION_COOKIE: &str = "session_data";
const AB_TEST_PREFIX: &str = "ab_test_";

const DAY_SECONDS: u64 = 24 * 60 * 60;
const CONSENT_TTL: u64 = 365 * DAY_SECONDS;
const PREFERENCES_TTL: u64 = 30 * DAY_SECONDS;
const SESSION_TTL: u64 = DAY_SECONDS;
const AB_TEST_TTL: u64 = 90 * DAY_SECONDS;

const RECENTLY_VIEWED_LIMIT: usize = 5;

/// Etiquetas fijas de variantes A/B
pub const AB_VARIANT_A: &str = "variant_a";
pub const AB_VARIANT_B: &str = "variant_b";

/// Evento registrado dentro de una sesión
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionEventKind {
    PageView,
    VehicleInterest,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionEvent {
    pub kind: SessionEventKind,
    pub value: String,
    pub at: DateTime<Utc>,
}

/// Sesión del visitante con atribución de llegada
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    pub referrer: Option<String>,
    pub utm: HashMap<String, String>,
    pub events: Vec<SessionEvent>,
}

/// Conversión registrada de una prueba A/B
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AbConversion {
    pub action: String,
    pub at: DateTime<Utc>,
}

/// Tracking del visitante sobre un almacén clave-valor
pub struct TrackingService<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> TrackingService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ===== Consentimiento =====

    /// Guarda la decisión de consentimiento (la única escritura sin gate)
    pub async fn save_consent(&self, accepted: bool) -> Result<()> {
        self.store.set(CONSENT_COOKIE, &accepted, CONSENT_TTL).await
    }

    pub async fn has_consent(&self) -> Result<bool> {
        Ok(self
            .store
            .get::<bool>(CONSENT_COOKIE)
            .await?
            .unwrap_or(false))
    }

    // ===== Vehículos vistos =====

    /// Registra un vehículo visto: más reciente primero, sin duplicados,
    /// máximo cinco entradas
    pub async fn save_recently_viewed(&self, vehicle_id: i32) -> Result<()> {
        if !self.has_consent().await? {
            return Ok(());
        }
        let mut viewed: Vec<i32> = self
            .store
            .get(RECENTLY_VIEWED_COOKIE)
            .await?
            .unwrap_or_default();
        viewed.retain(|id| *id != vehicle_id);
        viewed.insert(0, vehicle_id);
        viewed.truncate(RECENTLY_VIEWED_LIMIT);
        self.store
            .set(RECENTLY_VIEWED_COOKIE, &viewed, PREFERENCES_TTL)
            .await
    }

    /// Lectura sin gate; un valor ausente o ilegible cae a lista vacía
    pub async fn recently_viewed(&self) -> Result<Vec<i32>> {
        Ok(self
            .store
            .get(RECENTLY_VIEWED_COOKIE)
            .await?
            .unwrap_or_default())
    }

    // ===== Preferencias de filtros =====

    pub async fn save_filter_preferences(
        &self,
        filters: &HashMap<String, String>,
    ) -> Result<()> {
        if !self.has_consent().await? {
            return Ok(());
        }
        self.store
            .set(FILTER_PREFERENCES_COOKIE, filters, PREFERENCES_TTL)
            .await
    }

    /// A diferencia de vistos-recientemente, esta lectura sí exige consentimiento
    pub async fn filter_preferences(&self) -> Result<Option<HashMap<String, String>>> {
        if !self.has_consent().await? {
            return Ok(None);
        }
        self.store.get(FILTER_PREFERENCES_COOKIE).await
    }

    // ===== Contador de vistas =====

    pub async fn increment_viewed_count(&self) -> Result<()> {
        if !self.has_consent().await? {
            return Ok(());
        }
        let count: u32 = self
            .store
            .get(VIEWED_COUNT_COOKIE)
            .await?
            .unwrap_or_default();
        self.store
            .set(VIEWED_COUNT_COOKIE, &(count + 1), PREFERENCES_TTL)
            .await
    }

    /// Lectura sin gate
    pub async fn viewed_count(&self) -> Result<u32> {
        Ok(self
            .store
            .get(VIEWED_COUNT_COOKIE)
            .await?
            .unwrap_or_default())
    }

    // ===== Popularidad por vehículo =====

    pub async fn record_vehicle_view(&self, vehicle_id: i32) -> Result<()> {
        if !self.has_consent().await? {
            return Ok(());
        }
        let mut counts: Vec<(i32, u32)> = self
            .store
            .get(POPULARITY_COOKIE)
            .await?
            .unwrap_or_default();
        match counts.iter_mut().find(|(id, _)| *id == vehicle_id) {
            Some(entry) => entry.1 += 1,
            None => counts.push((vehicle_id, 1)),
        }
        self.store
            .set(POPULARITY_COOKIE, &counts, PREFERENCES_TTL)
            .await
    }

    /// Pares (vehículo, vistas) ordenados de más a menos visto
    pub async fn vehicle_popularity(&self) -> Result<Vec<(i32, u32)>> {
        let mut counts: Vec<(i32, u32)> = self
            .store
            .get(POPULARITY_COOKIE)
            .await?
            .unwrap_or_default();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(counts)
    }

    // ===== Sesión =====

    /// Asegura una sesión activa, capturando UTM y referrer de la llegada.
    /// Devuelve None sin consentimiento.
    pub async fn ensure_session(
        &self,
        landing_query: &str,
        referrer: Option<&str>,
    ) -> Result<Option<SessionData>> {
        if !self.has_consent().await? {
            return Ok(None);
        }
        if let Some(session) = self.store.get::<SessionData>(SESSION_COOKIE).await? {
            return Ok(Some(session));
        }
        let session = SessionData {
            session_id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            referrer: referrer.map(|r| r.to_string()),
            utm: extract_utm_params(landing_query),
            events: Vec::new(),
        };
        self.store.set(SESSION_COOKIE, &session, SESSION_TTL).await?;
        debug!("🧭 Sesión nueva: {}", session.session_id);
        Ok(Some(session))
    }

    pub async fn track_page_view(&self, path: &str) -> Result<()> {
        self.append_event(SessionEventKind::PageView, path).await
    }

    pub async fn track_vehicle_interest(&self, vehicle_id: i32) -> Result<()> {
        self.append_event(SessionEventKind::VehicleInterest, &vehicle_id.to_string())
            .await
    }

    async fn append_event(&self, kind: SessionEventKind, value: &str) -> Result<()> {
        // ensure_session ya aplica el gate de consentimiento
        let Some(mut session) = self.ensure_session("", None).await? else {
            return Ok(());
        };
        session.events.push(SessionEvent {
            kind,
            value: value.to_string(),
            at: Utc::now(),
        });
        // Re-escribir renueva la ventana de un día de la sesión
        self.store.set(SESSION_COOKIE, &session, SESSION_TTL).await
    }

    pub async fn current_session(&self) -> Result<Option<SessionData>> {
        if !self.has_consent().await? {
            return Ok(None);
        }
        self.store.get(SESSION_COOKIE).await
    }

    // ===== Pruebas A/B =====

    /// Variante asignada de una prueba: se sortea una vez y queda fija 90 días.
    /// Sin consentimiento no hay asignación.
    pub async fn ab_test_variant(&self, test_name: &str) -> Result<Option<String>> {
        if !self.has_consent().await? {
            return Ok(None);
        }
        let key = format!("{}{}", AB_TEST_PREFIX, test_name);
        if let Some(variant) = self.store.get::<String>(&key).await? {
            return Ok(Some(variant));
        }
        let variant = if rand::thread_rng().gen_bool(0.5) {
            AB_VARIANT_A
        } else {
            AB_VARIANT_B
        };
        self.store.set(&key, &variant.to_string(), AB_TEST_TTL).await?;
        debug!("🎲 Prueba {}: asignada {}", test_name, variant);
        Ok(Some(variant.to_string()))
    }

    /// Registra una conversión de la prueba indicada
    pub async fn track_ab_conversion(&self, test_name: &str, action: &str) -> Result<()> {
        if !self.has_consent().await? {
            return Ok(());
        }
        let key = format!("{}{}_conversions", AB_TEST_PREFIX, test_name);
        let mut conversions: Vec<AbConversion> =
            self.store.get(&key).await?.unwrap_or_default();
        conversions.push(AbConversion {
            action: action.to_string(),
            at: Utc::now(),
        });
        self.store.set(&key, &conversions, AB_TEST_TTL).await
    }

    pub async fn ab_conversions(&self, test_name: &str) -> Result<Vec<AbConversion>> {
        let key = format!("{}{}_conversions", AB_TEST_PREFIX, test_name);
        Ok(self.store.get(&key).await?.unwrap_or_default())
    }
}

/// Extrae los parámetros utm_* ya decodificados de un query string
fn extract_utm_params(query: &str) -> HashMap<String, String> {
    parse_query_string(query)
        .into_iter()
        .filter(|(key, _)| key.starts_with("utm_"))
        .collect()
}
