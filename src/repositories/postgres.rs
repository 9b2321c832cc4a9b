//! Backend de almacenamiento PostgreSQL
//!
//! Implementación sqlx de la interfaz de persistencia. Las consultas del
//! inventario se arman con QueryBuilder; columnas de orden solo desde la
//! allow-list, valores siempre via bind.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

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

/// Almacenamiento PostgreSQL
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: i32,
    make: String,
    model: String,
    year: i32,
    price: i32,
    mileage: i32,
    fuel_type: String,
    transmission: String,
    color: String,
    description: String,
    category: String,
    condition: String,
    is_featured: bool,
    features: Json<Vec<String>>,
    images: Json<Vec<String>>,
    vin: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        Self {
            id: row.id,
            make: row.make,
            model: row.model,
            year: row.year,
            price: row.price,
            mileage: row.mileage,
            fuel_type: row.fuel_type,
            transmission: row.transmission,
            color: row.color,
            description: row.description,
            category: row.category,
            condition: row.condition,
            is_featured: row.is_featured,
            features: row.features.0,
            images: row.images.0,
            vin: row.vin,
            status: VehicleStatus::parse(&row.status).unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct InquiryRow {
    id: i32,
    name: String,
    email: String,
    phone: Option<String>,
    subject: String,
    message: String,
    vehicle_id: Option<i32>,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<InquiryRow> for Inquiry {
    fn from(row: InquiryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            subject: row.subject,
            message: row.message,
            vehicle_id: row.vehicle_id,
            status: InquiryStatus::parse(&row.status).unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StatsRow {
    total: i64,
    available: i64,
    sold: i64,
    reserved: i64,
    pending: i64,
    featured: i64,
}

/// Columnas válidas de ordenamiento (allow-list contra inyección)
fn sort_column(field: &str) -> Option<&'static str> {
    match field {
        "price" => Some("price"),
        "year" => Some("year"),
        "mileage" => Some("mileage"),
        "make" => Some("make"),
        "model" => Some("model"),
        "createdAt" => Some("created_at"),
        _ => None,
    }
}

fn push_filters<'a>(builder: &mut QueryBuilder<'a, Postgres>, filters: &'a VehicleFilters) {
    // Todos los filtros presentes componen con AND
    builder.push(" WHERE 1=1");
    if let Some(make) = &filters.make {
        builder.push(" AND make = ").push_bind(make);
    }
    if let Some(model) = &filters.model {
        builder.push(" AND model = ").push_bind(model);
    }
    if let Some(fuel_type) = &filters.fuel_type {
        builder.push(" AND fuel_type = ").push_bind(fuel_type);
    }
    if let Some(transmission) = &filters.transmission {
        builder.push(" AND transmission = ").push_bind(transmission);
    }
    if let Some(color) = &filters.color {
        builder.push(" AND color = ").push_bind(color);
    }
    if let Some(condition) = &filters.condition {
        builder.push(" AND condition = ").push_bind(condition);
    }
    if let Some(category) = &filters.category {
        builder
            .push(" AND LOWER(REPLACE(category, '-', ' ')) = ")
            .push_bind(normalize_category(category));
    }
    if let Some(status) = &filters.status {
        builder.push(" AND status = ").push_bind(status);
    }
    if let Some(min) = filters.min_year {
        builder.push(" AND year >= ").push_bind(min);
    }
    if let Some(max) = filters.max_year {
        builder.push(" AND year <= ").push_bind(max);
    }
    if let Some(min) = filters.min_price {
        builder.push(" AND price >= ").push_bind(min);
    }
    if let Some(max) = filters.max_price {
        builder.push(" AND price <= ").push_bind(max);
    }
    if let Some(min) = filters.min_mileage {
        builder.push(" AND mileage >= ").push_bind(min);
    }
    if let Some(max) = filters.max_mileage {
        builder.push(" AND mileage <= ").push_bind(max);
    }
    if let Some(featured) = filters.is_featured {
        builder.push(" AND is_featured = ").push_bind(featured);
    }
}

fn push_order(builder: &mut QueryBuilder<'_, Postgres>, sort: Option<&SortSpec>) {
    let resolved = sort.and_then(|spec| sort_column(&spec.field).map(|col| (col, spec.direction)));
    match resolved {
        Some((column, direction)) => {
            builder.push(" ORDER BY ").push(column);
            builder.push(match direction {
                SortDirection::Asc => " ASC",
                SortDirection::Desc => " DESC",
            });
            // Empates estables por id ascendente
            builder.push(", id ASC");
        }
        None => {
            builder.push(" ORDER BY id ASC");
        }
    }
}

/// Escapa los metacaracteres de LIKE en el término de búsqueda
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait::async_trait]
impl Storage for PgStorage {
    async fn get_vehicles(&self, options: &VehicleQueryOptions) -> AppResult<Vec<Vehicle>> {
        let mut builder = QueryBuilder::new("SELECT * FROM vehicles");
        if let Some(filters) = &options.filters {
            push_filters(&mut builder, filters);
        }
        push_order(&mut builder, options.sort.as_ref());

        let rows: Vec<VehicleRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Vehicle::from).collect())
    }

    async fn get_paginated_vehicles(
        &self,
        options: &VehicleQueryOptions,
    ) -> AppResult<PaginatedVehicles> {
        let mut count_builder = QueryBuilder::new("SELECT COUNT(*) FROM vehicles");
        if let Some(filters) = &options.filters {
            push_filters(&mut count_builder, filters);
        }
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let page = options.pagination.page;
        let limit = options.pagination.limit;
        let offset = (page - 1) * limit;

        let mut builder = QueryBuilder::new("SELECT * FROM vehicles");
        if let Some(filters) = &options.filters {
            push_filters(&mut builder, filters);
        }
        push_order(&mut builder, options.sort.as_ref());
        builder.push(" LIMIT ").push_bind(limit);
        builder.push(" OFFSET ").push_bind(offset);

        let rows: Vec<VehicleRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        Ok(PaginatedVehicles {
            items: rows.into_iter().map(Vehicle::from).collect(),
            total,
            page,
            limit,
        })
    }

    async fn get_vehicle_by_id(&self, id: i32) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Vehicle::from))
    }

    async fn get_featured_vehicles(&self, limit: Option<i64>) -> AppResult<Vec<Vehicle>> {
        let rows: Vec<VehicleRow> = match limit {
            Some(limit) => {
                sqlx::query_as(
                    "SELECT * FROM vehicles WHERE is_featured = TRUE ORDER BY id ASC LIMIT $1",
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as("SELECT * FROM vehicles WHERE is_featured = TRUE ORDER BY id ASC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows.into_iter().map(Vehicle::from).collect())
    }

    async fn get_vehicles_by_category(&self, category: &str) -> AppResult<Vec<Vehicle>> {
        let rows: Vec<VehicleRow> = sqlx::query_as(
            "SELECT * FROM vehicles WHERE LOWER(REPLACE(category, '-', ' ')) = $1 ORDER BY id ASC",
        )
        .bind(normalize_category(category))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Vehicle::from).collect())
    }

    async fn search_vehicles(&self, query: &str) -> AppResult<Vec<Vehicle>> {
        let pattern = format!("%{}%", escape_like(query));
        let rows: Vec<VehicleRow> = sqlx::query_as(
            "SELECT * FROM vehicles \
             WHERE make ILIKE $1 OR model ILIKE $1 OR description ILIKE $1 \
             ORDER BY id ASC",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Vehicle::from).collect())
    }

    async fn get_related_vehicles(&self, id: i32, limit: i64) -> AppResult<Vec<Vehicle>> {
        let Some(base) = self.get_vehicle_by_id(id).await? else {
            return Ok(Vec::new());
        };
        let rows: Vec<VehicleRow> = sqlx::query_as(
            "SELECT * FROM vehicles \
             WHERE LOWER(REPLACE(category, '-', ' ')) = $1 AND id <> $2 \
             ORDER BY id ASC LIMIT $3",
        )
        .bind(normalize_category(&base.category))
        .bind(id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Vehicle::from).collect())
    }

    async fn get_inventory_stats(&self) -> AppResult<InventoryStats> {
        let row = sqlx::query_as::<_, StatsRow>(
            "SELECT COUNT(*) AS total, \
             COUNT(*) FILTER (WHERE status = 'available') AS available, \
             COUNT(*) FILTER (WHERE status = 'sold') AS sold, \
             COUNT(*) FILTER (WHERE status = 'reserved') AS reserved, \
             COUNT(*) FILTER (WHERE status = 'pending') AS pending, \
             COUNT(*) FILTER (WHERE is_featured) AS featured \
             FROM vehicles",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(InventoryStats {
            total: row.total,
            available: row.available,
            sold: row.sold,
            reserved: row.reserved,
            pending: row.pending,
            featured: row.featured,
        })
    }

    async fn create_vehicle(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            INSERT INTO vehicles (make, model, year, price, mileage, fuel_type, transmission,
                color, description, category, condition, is_featured, features, images, vin, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(vehicle.make)
        .bind(vehicle.model)
        .bind(vehicle.year)
        .bind(vehicle.price)
        .bind(vehicle.mileage)
        .bind(vehicle.fuel_type)
        .bind(vehicle.transmission)
        .bind(vehicle.color)
        .bind(vehicle.description)
        .bind(vehicle.category)
        .bind(vehicle.condition)
        .bind(vehicle.is_featured)
        .bind(Json(vehicle.features))
        .bind(Json(vehicle.images))
        .bind(vehicle.vin)
        .bind(vehicle.status.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update_vehicle(&self, id: i32, update: VehicleUpdate) -> AppResult<Option<Vehicle>> {
        // Obtener el vehículo actual y fusionar los campos presentes
        let Some(current) = self.get_vehicle_by_id(id).await? else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            UPDATE vehicles
            SET make = $1, model = $2, year = $3, price = $4, mileage = $5, fuel_type = $6,
                transmission = $7, color = $8, description = $9, category = $10, condition = $11,
                is_featured = $12, features = $13, images = $14, vin = $15
            WHERE id = $16
            RETURNING *
            "#,
        )
        .bind(update.make.unwrap_or(current.make))
        .bind(update.model.unwrap_or(current.model))
        .bind(update.year.unwrap_or(current.year))
        .bind(update.price.unwrap_or(current.price))
        .bind(update.mileage.unwrap_or(current.mileage))
        .bind(update.fuel_type.unwrap_or(current.fuel_type))
        .bind(update.transmission.unwrap_or(current.transmission))
        .bind(update.color.unwrap_or(current.color))
        .bind(update.description.unwrap_or(current.description))
        .bind(update.category.unwrap_or(current.category))
        .bind(update.condition.unwrap_or(current.condition))
        .bind(update.is_featured.unwrap_or(current.is_featured))
        .bind(Json(update.features.unwrap_or(current.features)))
        .bind(Json(update.images.unwrap_or(current.images)))
        .bind(update.vin.unwrap_or(current.vin))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(Some(row.into()))
    }

    async fn update_vehicle_status(
        &self,
        id: i32,
        status: VehicleStatus,
    ) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(
            "UPDATE vehicles SET status = $1 WHERE id = $2 RETURNING *",
        )
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Vehicle::from))
    }

    async fn delete_vehicle(&self, id: i32) -> AppResult<bool> {
        // La FK con ON DELETE SET NULL desvincula las consultas asociadas
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn vin_exists(&self, vin: &str) -> AppResult<bool> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE vin = $1)")
                .bind(vin)
                .fetch_one(&self.pool)
                .await?;
        Ok(result.0)
    }

    async fn get_inquiries(&self) -> AppResult<Vec<Inquiry>> {
        let rows: Vec<InquiryRow> = sqlx::query_as("SELECT * FROM inquiries ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Inquiry::from).collect())
    }

    async fn get_inquiry_by_id(&self, id: i32) -> AppResult<Option<Inquiry>> {
        let row = sqlx::query_as::<_, InquiryRow>("SELECT * FROM inquiries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Inquiry::from))
    }

    async fn create_inquiry(&self, inquiry: NewInquiry) -> AppResult<Inquiry> {
        let row = sqlx::query_as::<_, InquiryRow>(
            r#"
            INSERT INTO inquiries (name, email, phone, subject, message, vehicle_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(inquiry.name)
        .bind(inquiry.email)
        .bind(inquiry.phone)
        .bind(inquiry.subject)
        .bind(inquiry.message)
        .bind(inquiry.vehicle_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn update_inquiry_status(
        &self,
        id: i32,
        status: InquiryStatus,
    ) -> AppResult<Option<Inquiry>> {
        let row = sqlx::query_as::<_, InquiryRow>(
            "UPDATE inquiries SET status = $1 WHERE id = $2 RETURNING *",
        )
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Inquiry::from))
    }

    async fn get_approved_testimonials(&self) -> AppResult<Vec<Testimonial>> {
        let testimonials = sqlx::query_as::<_, Testimonial>(
            "SELECT * FROM testimonials WHERE is_approved = TRUE ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(testimonials)
    }

    async fn get_all_testimonials(&self) -> AppResult<Vec<Testimonial>> {
        let testimonials =
            sqlx::query_as::<_, Testimonial>("SELECT * FROM testimonials ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(testimonials)
    }

    async fn create_testimonial(&self, testimonial: NewTestimonial) -> AppResult<Testimonial> {
        let stored = sqlx::query_as::<_, Testimonial>(
            r#"
            INSERT INTO testimonials (name, vehicle, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(testimonial.name)
        .bind(testimonial.vehicle)
        .bind(testimonial.rating)
        .bind(testimonial.comment)
        .fetch_one(&self.pool)
        .await?;
        Ok(stored)
    }

    async fn approve_testimonial(&self, id: i32) -> AppResult<Option<Testimonial>> {
        let testimonial = sqlx::query_as::<_, Testimonial>(
            "UPDATE testimonials SET is_approved = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(testimonial)
    }

    async fn delete_testimonial(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn create_user(&self, user: NewUser) -> AppResult<User> {
        let stored = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password, email, role, name, phone)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(user.username)
        .bind(user.password)
        .bind(user.email)
        .bind(user.role)
        .bind(user.name)
        .bind(user.phone)
        .fetch_one(&self.pool)
        .await?;
        Ok(stored)
    }
}
