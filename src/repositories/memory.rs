//! Backend de almacenamiento en memoria
//!
//! Réplica exacta de la semántica del backend SQL sobre mapas ordenados por
//! id. Es el backend de los tests y del modo demostración sin DATABASE_URL.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::RwLock;

use super::Storage;
use crate::models::inquiry::{Inquiry, InquiryStatus, NewInquiry};
use crate::models::query::{
    normalize_category, SortDirection, SortSpec, VehicleFilters, VehicleQueryOptions,
};
use crate::models::testimonial::{NewTestimonial, Testimonial};
use crate::models::user::{NewUser, User};
use crate::models::vehicle::{
    InventoryStats, NewVehicle, PaginatedVehicles, Vehicle, VehicleStatus, VehicleUpdate,
};
use crate::utils::errors::AppResult;

#[derive(Default)]
struct MemState {
    vehicles: BTreeMap<i32, Vehicle>,
    inquiries: BTreeMap<i32, Inquiry>,
    testimonials: BTreeMap<i32, Testimonial>,
    users: BTreeMap<i32, User>,
    vehicle_seq: i32,
    inquiry_seq: i32,
    testimonial_seq: i32,
    user_seq: i32,
}

/// Almacenamiento en memoria
pub struct MemStorage {
    state: RwLock<MemState>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemState::default()),
        }
    }

    /// Inventario de demostración del showroom
    pub fn with_sample_data() -> Self {
        let mut state = MemState::default();
        for vehicle in sample_vehicles() {
            insert_vehicle(&mut state, vehicle);
        }
        for (name, vehicle, rating, comment) in sample_testimonials() {
            let id = next_id(&mut state.testimonial_seq);
            state.testimonials.insert(
                id,
                Testimonial {
                    id,
                    name: name.to_string(),
                    vehicle: vehicle.to_string(),
                    rating,
                    comment: comment.to_string(),
                    is_approved: true,
                    created_at: Utc::now(),
                },
            );
        }
        Self {
            state: RwLock::new(state),
        }
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn next_id(seq: &mut i32) -> i32 {
    *seq += 1;
    *seq
}

fn insert_vehicle(state: &mut MemState, vehicle: NewVehicle) -> Vehicle {
    let id = next_id(&mut state.vehicle_seq);
    let stored = Vehicle {
        id,
        make: vehicle.make,
        model: vehicle.model,
        year: vehicle.year,
        price: vehicle.price,
        mileage: vehicle.mileage,
        fuel_type: vehicle.fuel_type,
        transmission: vehicle.transmission,
        color: vehicle.color,
        description: vehicle.description,
        category: vehicle.category,
        condition: vehicle.condition,
        is_featured: vehicle.is_featured,
        features: vehicle.features,
        images: vehicle.images,
        vin: vehicle.vin,
        status: vehicle.status,
        created_at: Utc::now(),
    };
    state.vehicles.insert(id, stored.clone());
    stored
}

fn matches_filters(vehicle: &Vehicle, filters: &VehicleFilters) -> bool {
    if let Some(make) = &filters.make {
        if vehicle.make != *make {
            return false;
        }
    }
    if let Some(model) = &filters.model {
        if vehicle.model != *model {
            return false;
        }
    }
    if let Some(fuel_type) = &filters.fuel_type {
        if vehicle.fuel_type != *fuel_type {
            return false;
        }
    }
    if let Some(transmission) = &filters.transmission {
        if vehicle.transmission != *transmission {
            return false;
        }
    }
    if let Some(color) = &filters.color {
        if vehicle.color != *color {
            return false;
        }
    }
    if let Some(condition) = &filters.condition {
        if vehicle.condition != *condition {
            return false;
        }
    }
    if let Some(category) = &filters.category {
        if normalize_category(&vehicle.category) != normalize_category(category) {
            return false;
        }
    }
    if let Some(status) = &filters.status {
        if vehicle.status.as_str() != status {
            return false;
        }
    }
    if let Some(min) = filters.min_year {
        if vehicle.year < min {
            return false;
        }
    }
    if let Some(max) = filters.max_year {
        if vehicle.year > max {
            return false;
        }
    }
    if let Some(min) = filters.min_price {
        if vehicle.price < min {
            return false;
        }
    }
    if let Some(max) = filters.max_price {
        if vehicle.price > max {
            return false;
        }
    }
    if let Some(min) = filters.min_mileage {
        if vehicle.mileage < min {
            return false;
        }
    }
    if let Some(max) = filters.max_mileage {
        if vehicle.mileage > max {
            return false;
        }
    }
    if let Some(featured) = filters.is_featured {
        if vehicle.is_featured != featured {
            return false;
        }
    }
    true
}

fn compare_by_field(field: &str, a: &Vehicle, b: &Vehicle) -> Option<Ordering> {
    Some(match field {
        "price" => a.price.cmp(&b.price),
        "year" => a.year.cmp(&b.year),
        "mileage" => a.mileage.cmp(&b.mileage),
        "make" => a.make.cmp(&b.make),
        "model" => a.model.cmp(&b.model),
        "createdAt" => a.created_at.cmp(&b.created_at),
        _ => return None,
    })
}

fn sort_vehicles(vehicles: &mut [Vehicle], sort: Option<&SortSpec>) {
    let Some(spec) = sort else {
        // Sin sort queda el orden natural por id
        return;
    };
    vehicles.sort_by(|a, b| {
        let ordering = match compare_by_field(&spec.field, a, b) {
            Some(ordering) => ordering,
            // Campo desconocido: se conserva el orden por id
            None => Ordering::Equal,
        };
        let ordering = match spec.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        // Los empates se desempatan por id ascendente
        ordering.then(a.id.cmp(&b.id))
    });
}

fn collect_filtered(state: &MemState, options: &VehicleQueryOptions) -> Vec<Vehicle> {
    let mut vehicles: Vec<Vehicle> = state
        .vehicles
        .values()
        .filter(|vehicle| {
            options
                .filters
                .as_ref()
                .map_or(true, |filters| matches_filters(vehicle, filters))
        })
        .cloned()
        .collect();
    sort_vehicles(&mut vehicles, options.sort.as_ref());
    vehicles
}

#[async_trait::async_trait]
impl Storage for MemStorage {
    async fn get_vehicles(&self, options: &VehicleQueryOptions) -> AppResult<Vec<Vehicle>> {
        let state = self.state.read().await;
        Ok(collect_filtered(&state, options))
    }

    async fn get_paginated_vehicles(
        &self,
        options: &VehicleQueryOptions,
    ) -> AppResult<PaginatedVehicles> {
        let state = self.state.read().await;
        let filtered = collect_filtered(&state, options);
        let total = filtered.len() as i64;
        let page = options.pagination.page;
        let limit = options.pagination.limit;
        let offset = (page - 1) * limit;
        let items = filtered
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok(PaginatedVehicles {
            items,
            total,
            page,
            limit,
        })
    }

    async fn get_vehicle_by_id(&self, id: i32) -> AppResult<Option<Vehicle>> {
        let state = self.state.read().await;
        Ok(state.vehicles.get(&id).cloned())
    }

    async fn get_featured_vehicles(&self, limit: Option<i64>) -> AppResult<Vec<Vehicle>> {
        let state = self.state.read().await;
        let mut featured: Vec<Vehicle> = state
            .vehicles
            .values()
            .filter(|vehicle| vehicle.is_featured)
            .cloned()
            .collect();
        if let Some(limit) = limit {
            featured.truncate(limit.max(0) as usize);
        }
        Ok(featured)
    }

    async fn get_vehicles_by_category(&self, category: &str) -> AppResult<Vec<Vehicle>> {
        let state = self.state.read().await;
        let wanted = normalize_category(category);
        Ok(state
            .vehicles
            .values()
            .filter(|vehicle| normalize_category(&vehicle.category) == wanted)
            .cloned()
            .collect())
    }

    async fn search_vehicles(&self, query: &str) -> AppResult<Vec<Vehicle>> {
        let state = self.state.read().await;
        let term = query.to_lowercase();
        Ok(state
            .vehicles
            .values()
            .filter(|vehicle| {
                vehicle.make.to_lowercase().contains(&term)
                    || vehicle.model.to_lowercase().contains(&term)
                    || vehicle.description.to_lowercase().contains(&term)
            })
            .cloned()
            .collect())
    }

    async fn get_related_vehicles(&self, id: i32, limit: i64) -> AppResult<Vec<Vehicle>> {
        let state = self.state.read().await;
        let Some(base) = state.vehicles.get(&id) else {
            return Ok(Vec::new());
        };
        let wanted = normalize_category(&base.category);
        Ok(state
            .vehicles
            .values()
            .filter(|vehicle| {
                vehicle.id != id && normalize_category(&vehicle.category) == wanted
            })
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn get_inventory_stats(&self) -> AppResult<InventoryStats> {
        let state = self.state.read().await;
        let mut stats = InventoryStats {
            total: state.vehicles.len() as i64,
            available: 0,
            sold: 0,
            reserved: 0,
            pending: 0,
            featured: 0,
        };
        for vehicle in state.vehicles.values() {
            match vehicle.status {
                VehicleStatus::Available => stats.available += 1,
                VehicleStatus::Sold => stats.sold += 1,
                VehicleStatus::Reserved => stats.reserved += 1,
                VehicleStatus::Pending => stats.pending += 1,
            }
            if vehicle.is_featured {
                stats.featured += 1;
            }
        }
        Ok(stats)
    }

    async fn create_vehicle(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let mut state = self.state.write().await;
        Ok(insert_vehicle(&mut state, vehicle))
    }

    async fn update_vehicle(&self, id: i32, update: VehicleUpdate) -> AppResult<Option<Vehicle>> {
        let mut state = self.state.write().await;
        let Some(vehicle) = state.vehicles.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(make) = update.make {
            vehicle.make = make;
        }
        if let Some(model) = update.model {
            vehicle.model = model;
        }
        if let Some(year) = update.year {
            vehicle.year = year;
        }
        if let Some(price) = update.price {
            vehicle.price = price;
        }
        if let Some(mileage) = update.mileage {
            vehicle.mileage = mileage;
        }
        if let Some(fuel_type) = update.fuel_type {
            vehicle.fuel_type = fuel_type;
        }
        if let Some(transmission) = update.transmission {
            vehicle.transmission = transmission;
        }
        if let Some(color) = update.color {
            vehicle.color = color;
        }
        if let Some(description) = update.description {
            vehicle.description = description;
        }
        if let Some(category) = update.category {
            vehicle.category = category;
        }
        if let Some(condition) = update.condition {
            vehicle.condition = condition;
        }
        if let Some(is_featured) = update.is_featured {
            vehicle.is_featured = is_featured;
        }
        if let Some(features) = update.features {
            vehicle.features = features;
        }
        if let Some(images) = update.images {
            vehicle.images = images;
        }
        if let Some(vin) = update.vin {
            vehicle.vin = vin;
        }
        Ok(Some(vehicle.clone()))
    }

    async fn update_vehicle_status(
        &self,
        id: i32,
        status: VehicleStatus,
    ) -> AppResult<Option<Vehicle>> {
        let mut state = self.state.write().await;
        let Some(vehicle) = state.vehicles.get_mut(&id) else {
            return Ok(None);
        };
        vehicle.status = status;
        Ok(Some(vehicle.clone()))
    }

    async fn delete_vehicle(&self, id: i32) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let existed = state.vehicles.remove(&id).is_some();
        if existed {
            // Misma semántica que el ON DELETE SET NULL de la FK
            for inquiry in state.inquiries.values_mut() {
                if inquiry.vehicle_id == Some(id) {
                    inquiry.vehicle_id = None;
                }
            }
        }
        Ok(existed)
    }

    async fn vin_exists(&self, vin: &str) -> AppResult<bool> {
        let state = self.state.read().await;
        Ok(state.vehicles.values().any(|vehicle| vehicle.vin == vin))
    }

    async fn get_inquiries(&self) -> AppResult<Vec<Inquiry>> {
        let state = self.state.read().await;
        Ok(state.inquiries.values().cloned().collect())
    }

    async fn get_inquiry_by_id(&self, id: i32) -> AppResult<Option<Inquiry>> {
        let state = self.state.read().await;
        Ok(state.inquiries.get(&id).cloned())
    }

    async fn create_inquiry(&self, inquiry: NewInquiry) -> AppResult<Inquiry> {
        let mut state = self.state.write().await;
        let id = next_id(&mut state.inquiry_seq);
        let stored = Inquiry {
            id,
            name: inquiry.name,
            email: inquiry.email,
            phone: inquiry.phone,
            subject: inquiry.subject,
            message: inquiry.message,
            vehicle_id: inquiry.vehicle_id,
            status: InquiryStatus::New,
            created_at: Utc::now(),
        };
        state.inquiries.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update_inquiry_status(
        &self,
        id: i32,
        status: InquiryStatus,
    ) -> AppResult<Option<Inquiry>> {
        let mut state = self.state.write().await;
        let Some(inquiry) = state.inquiries.get_mut(&id) else {
            return Ok(None);
        };
        inquiry.status = status;
        Ok(Some(inquiry.clone()))
    }

    async fn get_approved_testimonials(&self) -> AppResult<Vec<Testimonial>> {
        let state = self.state.read().await;
        Ok(state
            .testimonials
            .values()
            .filter(|testimonial| testimonial.is_approved)
            .cloned()
            .collect())
    }

    async fn get_all_testimonials(&self) -> AppResult<Vec<Testimonial>> {
        let state = self.state.read().await;
        Ok(state.testimonials.values().cloned().collect())
    }

    async fn create_testimonial(&self, testimonial: NewTestimonial) -> AppResult<Testimonial> {
        let mut state = self.state.write().await;
        let id = next_id(&mut state.testimonial_seq);
        let stored = Testimonial {
            id,
            name: testimonial.name,
            vehicle: testimonial.vehicle,
            rating: testimonial.rating,
            comment: testimonial.comment,
            // Todo testimonio nuevo espera moderación
            is_approved: false,
            created_at: Utc::now(),
        };
        state.testimonials.insert(id, stored.clone());
        Ok(stored)
    }

    async fn approve_testimonial(&self, id: i32) -> AppResult<Option<Testimonial>> {
        let mut state = self.state.write().await;
        let Some(testimonial) = state.testimonials.get_mut(&id) else {
            return Ok(None);
        };
        testimonial.is_approved = true;
        Ok(Some(testimonial.clone()))
    }

    async fn delete_testimonial(&self, id: i32) -> AppResult<bool> {
        let mut state = self.state.write().await;
        Ok(state.testimonials.remove(&id).is_some())
    }

    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create_user(&self, user: NewUser) -> AppResult<User> {
        let mut state = self.state.write().await;
        let id = next_id(&mut state.user_seq);
        let stored = User {
            id,
            username: user.username,
            password: user.password,
            email: user.email,
            role: user.role,
            name: user.name,
            phone: user.phone,
            created_at: Utc::now(),
        };
        state.users.insert(id, stored.clone());
        Ok(stored)
    }
}

fn sample_vehicles() -> Vec<NewVehicle> {
    let vehicle = |make: &str,
                   model: &str,
                   year: i32,
                   price: i32,
                   mileage: i32,
                   color: &str,
                   description: &str,
                   category: &str,
                   is_featured: bool,
                   features: &[&str],
                   image: &str,
                   vin: &str| NewVehicle {
        make: make.to_string(),
        model: model.to_string(),
        year,
        price,
        mileage,
        fuel_type: "Gasoline".to_string(),
        transmission: "Automatic".to_string(),
        color: color.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        condition: "Used".to_string(),
        is_featured,
        features: features.iter().map(|f| f.to_string()).collect(),
        images: vec![image.to_string()],
        vin: vin.to_string(),
        status: VehicleStatus::Available,
    };

    vec![
        vehicle(
            "Porsche",
            "911 GT3",
            2023,
            179900,
            3500,
            "GT Silver Metallic",
            "Track-focused 911 with the 4.0L naturally aspirated flat-six, PDK transmission and front axle lift. One owner, full service history.",
            "Sports Cars",
            true,
            &["Carbon ceramic brakes", "Sport Chrono Package", "Front axle lift", "Bose surround sound"],
            "https://images.unsplash.com/photo-1614162692292-7ac56d7f7f1e",
            "WP0AC2A95PS270155",
        ),
        vehicle(
            "Mercedes-Benz",
            "S580 4MATIC",
            2022,
            154900,
            12000,
            "Obsidian Black",
            "Flagship luxury sedan with executive rear seating, Burmester 4D sound and augmented reality navigation.",
            "Luxury Sedans",
            true,
            &["Executive rear seats", "Burmester 4D sound", "Augmented reality HUD", "Rear-axle steering"],
            "https://images.unsplash.com/photo-1622200294737-85d45fc3c1f0",
            "W1K6G7GB5NA123456",
        ),
        vehicle(
            "Ferrari",
            "F8 Tributo",
            2021,
            399900,
            4200,
            "Rosso Corsa",
            "Twin-turbo V8 berlinetta celebrating Ferrari's most powerful V8 ever. Carbon fiber driver zone, lifting system and full PPF.",
            "Sports Cars",
            true,
            &["Carbon fiber racing seats", "Suspension lifter", "Full PPF", "JBL premium audio"],
            "https://images.unsplash.com/photo-1592198084033-aade902d1aae",
            "ZFF92LLA9M0261544",
        ),
        vehicle(
            "BMW",
            "X7 M50i",
            2022,
            118900,
            18500,
            "Mineral White",
            "Full-size luxury SUV with the 523hp V8, sky lounge panoramic roof and six-seat captain's chair configuration.",
            "SUVs",
            false,
            &["Sky Lounge roof", "Captain's chairs", "Bowers & Wilkins audio", "Night vision"],
            "https://images.unsplash.com/photo-1606016159991-dfe4f2746ad5",
            "5UXCX6C09N9D12345",
        ),
        vehicle(
            "Lamborghini",
            "Huracán EVO",
            2022,
            329900,
            6800,
            "Verde Mantis",
            "Rear-wheel steering V10 supercar with the LDVI dynamics brain. Transparent engine bonnet and lifting system.",
            "Sports Cars",
            false,
            &["Lifting system", "Transparent engine bonnet", "Sensonum audio", "Style package gloss black"],
            "https://images.unsplash.com/photo-1621135802920-133df287f89c",
            "ZHWUF4ZF5NLA18976",
        ),
        vehicle(
            "Bentley",
            "Continental GT V8",
            2021,
            249900,
            9300,
            "Midnight Emerald",
            "Grand tourer with rotating display, mulliner driving specification and naim for Bentley audio.",
            "Luxury Sedans",
            false,
            &["Rotating display", "Mulliner spec", "Naim audio", "City & Touring package"],
            "https://images.unsplash.com/photo-1632245889029-e406faaa34cd",
            "SCBCG2ZG5MC087654",
        ),
    ]
}

fn sample_testimonials() -> Vec<(&'static str, &'static str, i32, &'static str)> {
    vec![
        (
            "Michael T.",
            "Porsche 911 GT3",
            5,
            "The team made buying my dream car completely painless. No pressure, transparent pricing and the GT3 was exactly as described.",
        ),
        (
            "Sarah K.",
            "Mercedes-Benz S580",
            5,
            "Outstanding service from first inquiry to delivery. They even handled the out-of-state paperwork for me.",
        ),
        (
            "David R.",
            "BMW X7 M50i",
            4,
            "Great selection and a fair trade-in value for my old SUV. The financing estimate matched the final numbers to the dollar.",
        ),
    ]
}
