//! Modelo de Vehicle
//!
//! Catálogo de dos ruedas: motos, scooters y eléctricos. Cada vehículo
//! pertenece a exactamente un dealer.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Categoría del vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "vehicle_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleCategory {
    Bike,
    Scooter,
    Ev,
}

impl VehicleCategory {
    /// Parsear el filtro de categoría aceptando alias en plural
    /// (`bikes` -> `bike`, etc.), como los usa el frontend.
    pub fn from_filter(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "bike" | "bikes" => Some(VehicleCategory::Bike),
            "scooter" | "scooters" => Some(VehicleCategory::Scooter),
            "ev" | "evs" => Some(VehicleCategory::Ev),
            _ => None,
        }
    }
}

/// Tipo de combustible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "fuel_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    Petrol,
    Electric,
    Hybrid,
}

/// Tipo de transmisión
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "transmission_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TransmissionType {
    Manual,
    Automatic,
}

/// Estado de publicación del vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "vehicle_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Active,
    Inactive,
    Discontinued,
}

/// Vehículo - mapea a la tabla vehicles
#[derive(Debug, Clone, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub dealer_id: Option<Uuid>,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub category: VehicleCategory,
    pub fuel_type: FuelType,
    pub price: Decimal,
    pub engine_capacity: Option<Decimal>,
    pub power: Option<Decimal>,
    pub torque: Option<Decimal>,
    pub mileage: Option<Decimal>,
    pub top_speed: Option<Decimal>,
    pub kerb_weight: Option<Decimal>,
    pub fuel_capacity: Option<Decimal>,
    pub seat_height: Option<Decimal>,
    pub ground_clearance: Option<Decimal>,
    pub wheelbase: Option<Decimal>,
    pub battery_capacity: Option<Decimal>,
    pub charging_time: Option<Decimal>,
    pub range_km: Option<Decimal>,
    pub gears: Option<i16>,
    pub year: Option<i16>,
    pub transmission: Option<TransmissionType>,
    pub front_brake: Option<String>,
    pub rear_brake: Option<String>,
    pub abs: Option<bool>,
    pub colors: Vec<String>,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub status: VehicleStatus,
    pub is_featured: bool,
    pub rating: Decimal,
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Especificaciones opcionales compartidas entre create y update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct VehicleSpecs {
    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub engine_capacity: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub power: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub torque: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub mileage: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub top_speed: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub kerb_weight: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub fuel_capacity: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub seat_height: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub ground_clearance: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub wheelbase: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub battery_capacity: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub charging_time: Option<Decimal>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub range_km: Option<Decimal>,

    #[validate(range(min = 0, message = "Gears must be zero or positive"))]
    pub gears: Option<i16>,

    pub year: Option<i16>,
    pub transmission: Option<TransmissionType>,
    pub front_brake: Option<String>,
    pub rear_brake: Option<String>,
    pub abs: Option<bool>,
}

/// Request de creación de vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(length(min = 2, max = 50, message = "Brand must be between 2 and 50 characters"))]
    pub brand: String,

    #[validate(length(min = 1, max = 50, message = "Model must be between 1 and 50 characters"))]
    pub model: String,

    pub category: VehicleCategory,
    pub fuel_type: FuelType,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub price: Decimal,

    #[validate]
    #[serde(flatten)]
    pub specs: VehicleSpecs,

    pub colors: Option<Vec<String>>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub images: Option<Vec<String>>,
    pub is_featured: Option<bool>,
}

/// Request de actualización de vehículo (todos los campos opcionales)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 2, max = 50, message = "Brand must be between 2 and 50 characters"))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Model must be between 1 and 50 characters"))]
    pub model: Option<String>,

    pub category: Option<VehicleCategory>,
    pub fuel_type: Option<FuelType>,

    #[validate(custom = "crate::utils::validation::validate_non_negative")]
    pub price: Option<Decimal>,

    #[validate]
    #[serde(flatten)]
    pub specs: VehicleSpecs,

    pub colors: Option<Vec<String>>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub images: Option<Vec<String>>,
    pub status: Option<VehicleStatus>,
    pub is_featured: Option<bool>,
}

/// Filtros del catálogo público
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleFilters {
    // acepta plural (`bikes`) o singular (`bike`)
    pub category: Option<String>,
    pub brand: Option<String>,
    pub fuel_type: Option<FuelType>,
    pub is_featured: Option<bool>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    // búsqueda por substring en name/brand/model
    pub q: Option<String>,
    // solo surte efecto en el listado de admin; el catálogo público
    // siempre fija status = active
    pub status: Option<VehicleStatus>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl VehicleFilters {
    /// Columna de ordenamiento permitida (lista blanca, nunca SQL arbitrario)
    pub fn sort_column(&self) -> &'static str {
        match self.sort_by.as_deref() {
            Some("price") => "price",
            Some("rating") => "rating",
            Some("name") => "name",
            _ => "created_at",
        }
    }

    /// Dirección de ordenamiento; por defecto los más nuevos primero
    pub fn sort_direction(&self) -> &'static str {
        match self.sort_order.as_deref() {
            Some("asc") => "ASC",
            Some("desc") => "DESC",
            _ => {
                if self.sort_by.is_none() {
                    "DESC"
                } else {
                    "ASC"
                }
            }
        }
    }
}

/// Response completa de vehículo
#[derive(Debug, Clone, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub dealer_id: Option<Uuid>,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub category: VehicleCategory,
    pub fuel_type: FuelType,
    pub price: Decimal,
    pub engine_capacity: Option<Decimal>,
    pub power: Option<Decimal>,
    pub torque: Option<Decimal>,
    pub mileage: Option<Decimal>,
    pub top_speed: Option<Decimal>,
    pub kerb_weight: Option<Decimal>,
    pub fuel_capacity: Option<Decimal>,
    pub seat_height: Option<Decimal>,
    pub ground_clearance: Option<Decimal>,
    pub wheelbase: Option<Decimal>,
    pub battery_capacity: Option<Decimal>,
    pub charging_time: Option<Decimal>,
    pub range_km: Option<Decimal>,
    pub gears: Option<i16>,
    pub year: Option<i16>,
    pub transmission: Option<TransmissionType>,
    pub front_brake: Option<String>,
    pub rear_brake: Option<String>,
    pub abs: Option<bool>,
    pub colors: Vec<String>,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub status: VehicleStatus,
    pub is_featured: bool,
    pub rating: Decimal,
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            dealer_id: v.dealer_id,
            name: v.name,
            brand: v.brand,
            model: v.model,
            category: v.category,
            fuel_type: v.fuel_type,
            price: v.price,
            engine_capacity: v.engine_capacity,
            power: v.power,
            torque: v.torque,
            mileage: v.mileage,
            top_speed: v.top_speed,
            kerb_weight: v.kerb_weight,
            fuel_capacity: v.fuel_capacity,
            seat_height: v.seat_height,
            ground_clearance: v.ground_clearance,
            wheelbase: v.wheelbase,
            battery_capacity: v.battery_capacity,
            charging_time: v.charging_time,
            range_km: v.range_km,
            gears: v.gears,
            year: v.year,
            transmission: v.transmission,
            front_brake: v.front_brake,
            rear_brake: v.rear_brake,
            abs: v.abs,
            colors: v.colors,
            description: v.description,
            images: v.images,
            status: v.status,
            is_featured: v.is_featured,
            rating: v.rating,
            review_count: v.review_count,
            created_at: v.created_at,
        }
    }
}

/// Proyección ligera para búsqueda rápida y tarjetas
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct VehicleSummary {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub price: Decimal,
    pub image: Option<String>,
}

/// Contacto público del dealer en el detalle del vehículo
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DealerContact {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub city: Option<String>,
}

/// Detalle del vehículo: dealer, reviews aprobadas y flag de favorito
#[derive(Debug, Serialize)]
pub struct VehicleDetailResponse {
    #[serde(flatten)]
    pub vehicle: VehicleResponse,
    pub dealer: Option<DealerContact>,
    pub reviews: Vec<crate::models::review::ReviewResponse>,
    pub is_favorited: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_plural_aliases() {
        assert_eq!(VehicleCategory::from_filter("bikes"), Some(VehicleCategory::Bike));
        assert_eq!(VehicleCategory::from_filter("bike"), Some(VehicleCategory::Bike));
        assert_eq!(VehicleCategory::from_filter("Scooters"), Some(VehicleCategory::Scooter));
        assert_eq!(VehicleCategory::from_filter("EVs"), Some(VehicleCategory::Ev));
        assert_eq!(VehicleCategory::from_filter("cars"), None);
    }

    #[test]
    fn test_sort_whitelist() {
        let filters = VehicleFilters {
            sort_by: Some("price".to_string()),
            sort_order: Some("asc".to_string()),
            ..Default::default()
        };
        assert_eq!(filters.sort_column(), "price");
        assert_eq!(filters.sort_direction(), "ASC");

        // columnas fuera de la lista blanca caen al default
        let filters = VehicleFilters {
            sort_by: Some("password_hash; DROP TABLE users".to_string()),
            ..Default::default()
        };
        assert_eq!(filters.sort_column(), "created_at");
    }

    #[test]
    fn test_default_sort_is_newest_first() {
        let filters = VehicleFilters::default();
        assert_eq!(filters.sort_column(), "created_at");
        assert_eq!(filters.sort_direction(), "DESC");
    }
}
