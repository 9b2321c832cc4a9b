//! Estado de filtros del catálogo
//!
//! Réplica del panel de filtros del frontend: estado inmutable por campo,
//! reducer de acciones y predicado de coincidencia sobre una lista ya
//! cargada en memoria.

use serde::{Deserialize, Serialize};

use super::query::normalize_category;
use super::vehicle::Vehicle;
use crate::utils::query_string::parse_query_string;

/// Campos editables del panel de filtros
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Make,
    Model,
    Year,
    PriceMin,
    PriceMax,
    Category,
    Search,
}

/// Acciones del reducer de filtros
#[derive(Debug, Clone)]
pub enum FilterAction {
    Set(FilterField, String),
    ClearAll,
}

/// Estado del panel; cadena vacía = filtro inactivo
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub make: String,
    pub model: String,
    pub year: String,
    pub price_min: String,
    pub price_max: String,
    pub category: String,
    pub search: String,
}

impl FilterState {
    /// Estado inicial sembrado desde el query string de la URL de llegada
    pub fn from_url_query(query: &str) -> Self {
        let params = parse_query_string(query);
        let mut state = Self::default();
        if let Some(category) = params.get("category") {
            state.category = category.clone();
        }
        if let Some(search) = params.get("search") {
            state.search = search.clone();
        }
        state
    }

    /// Aplica una acción y devuelve el estado siguiente
    pub fn reduce(&self, action: FilterAction) -> Self {
        match action {
            FilterAction::Set(field, value) => {
                let mut next = self.clone();
                match field {
                    FilterField::Make => next.make = value,
                    FilterField::Model => next.model = value,
                    FilterField::Year => next.year = value,
                    FilterField::PriceMin => next.price_min = value,
                    FilterField::PriceMax => next.price_max = value,
                    FilterField::Category => next.category = value,
                    FilterField::Search => next.search = value,
                }
                next
            }
            FilterAction::ClearAll => Self::default(),
        }
    }

    /// Evalúa si un vehículo pasa los filtros activos
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        if !self.make.is_empty() && vehicle.make.to_lowercase() != self.make.to_lowercase() {
            return false;
        }
        if !self.model.is_empty()
            && !vehicle
                .model
                .to_lowercase()
                .contains(&self.model.to_lowercase())
        {
            return false;
        }
        if !self.year.is_empty() && vehicle.year.to_string() != self.year {
            return false;
        }
        if !self.price_min.is_empty() {
            if let Ok(min) = self.price_min.parse::<i32>() {
                if vehicle.price < min {
                    return false;
                }
            }
        }
        if !self.price_max.is_empty() {
            if let Ok(max) = self.price_max.parse::<i32>() {
                if vehicle.price > max {
                    return false;
                }
            }
        }
        if !self.category.is_empty()
            && normalize_category(&vehicle.category) != normalize_category(&self.category)
        {
            return false;
        }
        // La búsqueda libre decide al final: OR sobre marca, modelo, año y descripción
        if !self.search.is_empty() {
            let term = self.search.to_lowercase();
            return vehicle.make.to_lowercase().contains(&term)
                || vehicle.model.to_lowercase().contains(&term)
                || vehicle.year.to_string().contains(&term)
                || vehicle.description.to_lowercase().contains(&term);
        }
        true
    }

    /// Vista filtrada de una lista, sin mutarla
    pub fn apply<'a>(&self, vehicles: &'a [Vehicle]) -> Vec<&'a Vehicle> {
        vehicles.iter().filter(|v| self.matches(v)).collect()
    }
}

/// Marcas distintas presentes en una lista, ordenadas alfabéticamente
pub fn unique_makes(vehicles: &[Vehicle]) -> Vec<String> {
    let mut makes: Vec<String> = vehicles.iter().map(|v| v.make.clone()).collect();
    makes.sort();
    makes.dedup();
    makes
}
