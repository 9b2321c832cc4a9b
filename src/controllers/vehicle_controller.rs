//! Controller de vehículos
//!
//! Lógica de negocio del inventario: listados con estado por defecto,
//! escaparate de destacados, búsqueda, relacionados y CRUD con guarda
//! de VIN duplicado.

use std::collections::HashMap;
use std::sync::Arc;

use validator::Validate;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleListing};
use crate::models::query::VehicleQueryOptions;
use crate::models::vehicle::{InventoryStats, Vehicle, VehicleStatus};
use crate::repositories::Storage;
use crate::utils::errors::{AppError, AppResult};

/// Límite por defecto de vehículos relacionados
const DEFAULT_RELATED_LIMIT: i64 = 4;

pub struct VehicleController {
    storage: Arc<dyn Storage>,
}

impl VehicleController {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// GET /api/vehicles: listado plano o paginado.
    /// Sin includeAll ni status explícito solo se listan los disponibles.
    pub async fn list(&self, params: &HashMap<String, String>) -> AppResult<VehicleListing> {
        let include_all = params.get("includeAll").map(String::as_str) == Some("true");
        let paginated = params.get("paginated").map(String::as_str) == Some("true");

        let mut options = VehicleQueryOptions::from_query(params);
        options.apply_default_status(include_all);

        if paginated {
            let page = self.storage.get_paginated_vehicles(&options).await?;
            Ok(VehicleListing::Paginated(page))
        } else {
            let vehicles = self.storage.get_vehicles(&options).await?;
            Ok(VehicleListing::Flat(vehicles))
        }
    }

    /// Destacados del escaparate; los vendidos no se muestran salvo includeAll
    pub async fn featured(
        &self,
        limit: Option<i64>,
        include_all: bool,
    ) -> AppResult<Vec<Vehicle>> {
        let vehicles = self.storage.get_featured_vehicles(limit).await?;
        if include_all {
            return Ok(vehicles);
        }
        Ok(vehicles
            .into_iter()
            .filter(|vehicle| vehicle.status != VehicleStatus::Sold)
            .collect())
    }

    pub async fn by_category(&self, category: &str) -> AppResult<Vec<Vehicle>> {
        self.storage.get_vehicles_by_category(category).await
    }

    pub async fn search(&self, query: &str) -> AppResult<Vec<Vehicle>> {
        self.storage.search_vehicles(query).await
    }

    /// GET /api/vehicles/filter: exige al menos un filtro reconocido
    pub async fn filter(&self, params: &HashMap<String, String>) -> AppResult<Vec<Vehicle>> {
        let options = VehicleQueryOptions::from_query(params);
        if options.filters.is_none() {
            return Err(AppError::BadRequest(
                "At least one filter parameter is required".to_string(),
            ));
        }
        self.storage.get_vehicles(&options).await
    }

    pub async fn stats(&self) -> AppResult<InventoryStats> {
        self.storage.get_inventory_stats().await
    }

    pub async fn get(&self, id: i32) -> AppResult<Vehicle> {
        self.storage
            .get_vehicle_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))
    }

    pub async fn related(&self, id: i32, limit: Option<i64>) -> AppResult<Vec<Vehicle>> {
        self.storage
            .get_related_vehicles(id, limit.unwrap_or(DEFAULT_RELATED_LIMIT))
            .await
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<Vehicle> {
        request.validate()?;

        // Verificar que el VIN no exista
        if self.storage.vin_exists(&request.vin).await? {
            return Err(AppError::Conflict(format!(
                "A vehicle with VIN '{}' already exists",
                request.vin
            )));
        }

        self.storage.create_vehicle(request.into()).await
    }

    pub async fn update(&self, id: i32, request: UpdateVehicleRequest) -> AppResult<Vehicle> {
        request.validate()?;

        let current = self.get(id).await?;

        // Un cambio de VIN también pasa por la guarda de duplicados
        if let Some(vin) = &request.vin {
            if *vin != current.vin && self.storage.vin_exists(vin).await? {
                return Err(AppError::Conflict(format!(
                    "A vehicle with VIN '{}' already exists",
                    vin
                )));
            }
        }

        self.storage
            .update_vehicle(id, request.into())
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))
    }

    pub async fn update_status(&self, id: i32, status_value: &str) -> AppResult<Vehicle> {
        let Some(status) = VehicleStatus::parse(status_value) else {
            return Err(AppError::BadRequest(
                "Invalid status. Must be one of: available, sold, reserved, pending".to_string(),
            ));
        };
        self.storage
            .update_vehicle_status(id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))
    }

    /// Elimina un vehículo y devuelve sus datos para la limpieza de imágenes
    pub async fn delete(&self, id: i32) -> AppResult<Vehicle> {
        let vehicle = self.get(id).await?;
        self.storage.delete_vehicle(id).await?;
        log::info!("🚗 Vehículo {} eliminado del inventario", id);
        Ok(vehicle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::NewVehicle;
    use crate::repositories::MemStorage;

    fn new_vehicle(vin: &str, status: VehicleStatus, is_featured: bool) -> NewVehicle {
        NewVehicle {
            make: "Porsche".to_string(),
            model: "911".to_string(),
            year: 2023,
            price: 179900,
            mileage: 3500,
            fuel_type: "Gasoline".to_string(),
            transmission: "Manual".to_string(),
            color: "Silver".to_string(),
            description: "Test".to_string(),
            category: "Sports Cars".to_string(),
            condition: "Used".to_string(),
            is_featured,
            features: vec![],
            images: vec![],
            vin: vin.to_string(),
            status,
        }
    }

    async fn controller_with(vehicles: Vec<NewVehicle>) -> VehicleController {
        let storage = Arc::new(MemStorage::new());
        for vehicle in vehicles {
            storage.create_vehicle(vehicle).await.unwrap();
        }
        VehicleController::new(storage)
    }

    #[tokio::test]
    async fn test_list_hides_non_available_by_default() {
        let controller = controller_with(vec![
            new_vehicle("VIN00000000000001", VehicleStatus::Available, false),
            new_vehicle("VIN00000000000002", VehicleStatus::Sold, false),
        ])
        .await;

        let listing = controller.list(&HashMap::new()).await.unwrap();
        let VehicleListing::Flat(vehicles) = listing else {
            panic!("se esperaba listado plano");
        };
        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles[0].status, VehicleStatus::Available);

        let all = controller
            .list(&HashMap::from([(
                "includeAll".to_string(),
                "true".to_string(),
            )]))
            .await
            .unwrap();
        let VehicleListing::Flat(vehicles) = all else {
            panic!("se esperaba listado plano");
        };
        assert_eq!(vehicles.len(), 2);
    }

    #[tokio::test]
    async fn test_featured_excludes_sold() {
        let controller = controller_with(vec![
            new_vehicle("VIN00000000000001", VehicleStatus::Available, true),
            new_vehicle("VIN00000000000002", VehicleStatus::Sold, true),
            new_vehicle("VIN00000000000003", VehicleStatus::Reserved, true),
        ])
        .await;

        let featured = controller.featured(None, false).await.unwrap();
        assert_eq!(featured.len(), 2);
        assert!(featured.iter().all(|v| v.status != VehicleStatus::Sold));

        let all = controller.featured(None, true).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_filter_requires_recognized_params() {
        let controller = controller_with(vec![]).await;
        let err = controller
            .filter(&HashMap::from([("foo".to_string(), "bar".to_string())]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_duplicate_vin_is_conflict() {
        let controller = controller_with(vec![new_vehicle(
            "WP0AC2A95PS270155",
            VehicleStatus::Available,
            false,
        )])
        .await;

        let request: CreateVehicleRequest = serde_json::from_value(serde_json::json!({
            "make": "Porsche",
            "model": "911 Turbo S",
            "year": 2022,
            "price": 229900,
            "mileage": 8000,
            "fuelType": "Gasoline",
            "transmission": "Automatic",
            "color": "Black",
            "description": "Twin turbo",
            "category": "Sports Cars",
            "vin": "WP0AC2A95PS270155"
        }))
        .unwrap();

        let err = controller.create(request).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_status_validates_value() {
        let controller = controller_with(vec![new_vehicle(
            "VIN00000000000001",
            VehicleStatus::Available,
            false,
        )])
        .await;

        let vehicle = controller.update_status(1, "sold").await.unwrap();
        assert_eq!(vehicle.status, VehicleStatus::Sold);

        let err = controller.update_status(1, "vanished").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = controller.update_status(99, "sold").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
