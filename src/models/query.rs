//! Opciones de consulta del inventario
//!
//! Traducción de los query params HTTP a opciones tipadas: paginación,
//! ordenamiento y filtros. Los parámetros desconocidos o mal formados se
//! descartan en silencio; la consulta nunca falla por un param inválido.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::vehicle::VehicleStatus;

/// Paginación solicitada
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

/// Dirección de ordenamiento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Ordenamiento solicitado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

/// Filtros del inventario; todos los presentes componen con AND
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFilters {
    pub make: Option<String>,
    pub model: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub color: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub status: Option<String>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub min_price: Option<i32>,
    pub max_price: Option<i32>,
    pub min_mileage: Option<i32>,
    pub max_mileage: Option<i32>,
    pub is_featured: Option<bool>,
}

impl VehicleFilters {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Opciones completas de una consulta de inventario
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleQueryOptions {
    pub pagination: Pagination,
    pub sort: Option<SortSpec>,
    pub filters: Option<VehicleFilters>,
}

impl VehicleQueryOptions {
    /// Construye las opciones a partir de los query params de la request
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let pagination = Pagination {
            page: parse_page_param(params.get("page")).unwrap_or(1),
            limit: parse_page_param(params.get("limit")).unwrap_or(10),
        };

        let sort = params.get("sort").map(|field| SortSpec {
            field: field.clone(),
            direction: match params.get("direction").map(String::as_str) {
                Some("desc") => SortDirection::Desc,
                _ => SortDirection::Asc,
            },
        });

        let mut filters = VehicleFilters {
            make: params.get("make").cloned(),
            model: params.get("model").cloned(),
            fuel_type: params.get("fuelType").cloned(),
            transmission: params.get("transmission").cloned(),
            color: params.get("color").cloned(),
            category: params.get("category").cloned(),
            condition: params.get("condition").cloned(),
            status: params.get("status").cloned(),
            min_year: parse_int_param(params.get("minYear")),
            max_year: parse_int_param(params.get("maxYear")),
            min_price: parse_int_param(params.get("minPrice")),
            max_price: parse_int_param(params.get("maxPrice")),
            min_mileage: parse_int_param(params.get("minMileage")),
            max_mileage: parse_int_param(params.get("maxMileage")),
            is_featured: None,
        };
        filters.is_featured = match params.get("featured").map(String::as_str) {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => None,
        };

        Self {
            pagination,
            sort,
            filters: if filters.is_empty() { None } else { Some(filters) },
        }
    }

    /// Inyecta status=available salvo que la consulta ya filtre por estado
    /// o pida el inventario completo
    pub fn apply_default_status(&mut self, include_all: bool) {
        if include_all {
            return;
        }
        let filters = self.filters.get_or_insert_with(VehicleFilters::default);
        if filters.status.is_none() {
            filters.status = Some(VehicleStatus::Available.as_str().to_string());
        }
    }
}

/// Categorías con slug o mayúsculas distintas se comparan normalizadas
pub fn normalize_category(value: &str) -> String {
    value.replace('-', " ").to_lowercase()
}

fn parse_int_param(value: Option<&String>) -> Option<i32> {
    value.and_then(|v| v.parse().ok())
}

fn parse_page_param(value: Option<&String>) -> Option<i64> {
    value.and_then(|v| v.parse::<i64>().ok()).filter(|n| *n >= 1)
}
