//! Repositorio de vehículos
//!
//! Todas las queries del catálogo: filtros compuestos, búsqueda por texto,
//! paginación y los checks de referencias para el borrado.

use crate::models::vehicle::{
    CreateVehicleRequest, UpdateVehicleRequest, Vehicle, VehicleCategory, VehicleFilters,
    VehicleStatus, VehicleSummary,
};
use crate::utils::errors::AppError;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        dealer_id: Uuid,
        request: CreateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        let specs = request.specs;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                id, dealer_id, name, brand, model, category, fuel_type, price,
                engine_capacity, power, torque, mileage, top_speed, kerb_weight,
                fuel_capacity, seat_height, ground_clearance, wheelbase,
                battery_capacity, charging_time, range_km, gears, year,
                transmission, front_brake, rear_brake, abs, colors, description,
                images, is_featured
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26,
                $27, $28, $29, $30, $31
            )
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(dealer_id)
        .bind(request.name)
        .bind(request.brand)
        .bind(request.model)
        .bind(request.category)
        .bind(request.fuel_type)
        .bind(request.price)
        .bind(specs.engine_capacity)
        .bind(specs.power)
        .bind(specs.torque)
        .bind(specs.mileage)
        .bind(specs.top_speed)
        .bind(specs.kerb_weight)
        .bind(specs.fuel_capacity)
        .bind(specs.seat_height)
        .bind(specs.ground_clearance)
        .bind(specs.wheelbase)
        .bind(specs.battery_capacity)
        .bind(specs.charging_time)
        .bind(specs.range_km)
        .bind(specs.gears)
        .bind(specs.year)
        .bind(specs.transmission)
        .bind(specs.front_brake)
        .bind(specs.rear_brake)
        .bind(specs.abs)
        .bind(request.colors.unwrap_or_default())
        .bind(request.description)
        .bind(request.images.unwrap_or_default())
        .bind(request.is_featured.unwrap_or(false))
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    /// Catálogo con filtros compuestos por AND y paginación
    ///
    /// `only_active` aplica el filtro base del catálogo público
    /// (`status = 'active'`); el listado de admin lo desactiva.
    pub async fn list(
        &self,
        filters: &VehicleFilters,
        page: i64,
        limit: i64,
        only_active: bool,
    ) -> Result<(Vec<Vehicle>, i64), AppError> {
        let mut select = QueryBuilder::<Postgres>::new("SELECT * FROM vehicles WHERE TRUE");
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM vehicles WHERE TRUE");

        let category = filters
            .category
            .as_deref()
            .and_then(VehicleCategory::from_filter);

        for builder in [&mut select, &mut count] {
            if only_active {
                builder.push(" AND status = ").push_bind(VehicleStatus::Active);
            } else if let Some(status) = filters.status {
                builder.push(" AND status = ").push_bind(status);
            }
            if let Some(category) = category {
                builder.push(" AND category = ").push_bind(category);
            }
            if let Some(brand) = filters.brand.as_deref().filter(|b| !b.is_empty()) {
                builder.push(" AND brand = ").push_bind(brand.to_string());
            }
            if let Some(fuel_type) = filters.fuel_type {
                builder.push(" AND fuel_type = ").push_bind(fuel_type);
            }
            if let Some(is_featured) = filters.is_featured {
                builder.push(" AND is_featured = ").push_bind(is_featured);
            }
            if let Some(min_price) = filters.min_price {
                builder.push(" AND price >= ").push_bind(min_price);
            }
            if let Some(max_price) = filters.max_price {
                builder.push(" AND price <= ").push_bind(max_price);
            }
            if let Some(q) = filters.q.as_deref().filter(|q| !q.trim().is_empty()) {
                let pattern = super::like_pattern(q);
                builder
                    .push(" AND (name ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR brand ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR model ILIKE ")
                    .push_bind(pattern)
                    .push(")");
            }
        }

        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        // columna y dirección salen de una lista blanca, nunca del cliente
        select.push(format!(
            " ORDER BY {} {}",
            filters.sort_column(),
            filters.sort_direction()
        ));
        select
            .push(" LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(crate::dto::PaginationQuery::offset(page, limit));

        let vehicles = select
            .build_query_as::<Vehicle>()
            .fetch_all(&self.pool)
            .await?;

        Ok((vehicles, total))
    }

    /// Búsqueda rápida: proyección ligera ordenada por nombre
    pub async fn search(&self, query: &str, limit: i64) -> Result<Vec<VehicleSummary>, AppError> {
        let pattern = super::like_pattern(query);

        let results = sqlx::query_as::<_, VehicleSummary>(
            r#"
            SELECT id, name, brand, model, price, (images)[1] AS image
            FROM vehicles
            WHERE status = 'active'
              AND (name ILIKE $1 OR brand ILIKE $1 OR model ILIKE $1)
            ORDER BY name
            LIMIT $2
            "#,
        )
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }

    pub async fn featured(&self, limit: i64) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE status = 'active' AND is_featured = TRUE
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn brands(&self) -> Result<Vec<String>, AppError> {
        let brands: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT brand FROM vehicles WHERE status = 'active' ORDER BY brand",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(brands.into_iter().map(|(b,)| b).collect())
    }

    /// Listados del propio dealer, incluyendo inactivos y descatalogados
    pub async fn list_by_dealer(
        &self,
        dealer_id: Uuid,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<Vehicle>, i64), AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vehicles WHERE dealer_id = $1")
            .bind(dealer_id)
            .fetch_one(&self.pool)
            .await?;

        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE dealer_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(dealer_id)
        .bind(limit)
        .bind(crate::dto::PaginationQuery::offset(page, limit))
        .fetch_all(&self.pool)
        .await?;

        Ok((vehicles, total))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        let specs = request.specs;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles SET
                name = COALESCE($2, name),
                brand = COALESCE($3, brand),
                model = COALESCE($4, model),
                category = COALESCE($5, category),
                fuel_type = COALESCE($6, fuel_type),
                price = COALESCE($7, price),
                engine_capacity = COALESCE($8, engine_capacity),
                power = COALESCE($9, power),
                torque = COALESCE($10, torque),
                mileage = COALESCE($11, mileage),
                top_speed = COALESCE($12, top_speed),
                kerb_weight = COALESCE($13, kerb_weight),
                fuel_capacity = COALESCE($14, fuel_capacity),
                seat_height = COALESCE($15, seat_height),
                ground_clearance = COALESCE($16, ground_clearance),
                wheelbase = COALESCE($17, wheelbase),
                battery_capacity = COALESCE($18, battery_capacity),
                charging_time = COALESCE($19, charging_time),
                range_km = COALESCE($20, range_km),
                gears = COALESCE($21, gears),
                year = COALESCE($22, year),
                transmission = COALESCE($23, transmission),
                front_brake = COALESCE($24, front_brake),
                rear_brake = COALESCE($25, rear_brake),
                abs = COALESCE($26, abs),
                colors = COALESCE($27, colors),
                description = COALESCE($28, description),
                images = COALESCE($29, images),
                status = COALESCE($30, status),
                is_featured = COALESCE($31, is_featured),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name)
        .bind(request.brand)
        .bind(request.model)
        .bind(request.category)
        .bind(request.fuel_type)
        .bind(request.price)
        .bind(specs.engine_capacity)
        .bind(specs.power)
        .bind(specs.torque)
        .bind(specs.mileage)
        .bind(specs.top_speed)
        .bind(specs.kerb_weight)
        .bind(specs.fuel_capacity)
        .bind(specs.seat_height)
        .bind(specs.ground_clearance)
        .bind(specs.wheelbase)
        .bind(specs.battery_capacity)
        .bind(specs.charging_time)
        .bind(specs.range_km)
        .bind(specs.gears)
        .bind(specs.year)
        .bind(specs.transmission)
        .bind(specs.front_brake)
        .bind(specs.rear_brake)
        .bind(specs.abs)
        .bind(request.colors)
        .bind(request.description)
        .bind(request.images)
        .bind(request.status)
        .bind(request.is_featured)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Reservas que referencian al vehículo (guard del borrado)
    pub async fn booking_reference_count(&self, vehicle_id: Uuid) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE vehicle_id = $1")
            .bind(vehicle_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Favoritos que referencian al vehículo (guard del borrado)
    pub async fn favorite_reference_count(&self, vehicle_id: Uuid) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM favorites WHERE vehicle_id = $1")
                .bind(vehicle_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    pub async fn count_all(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vehicles")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn count_by_status(&self, status: VehicleStatus) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vehicles WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn set_featured(&self, id: Uuid, is_featured: bool) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET is_featured = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(is_featured)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn set_status(&self, id: Uuid, status: VehicleStatus) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }
}
