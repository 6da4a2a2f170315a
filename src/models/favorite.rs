//! Modelo de Favorite
//!
//! Join (usuario, vehículo) con restricción de unicidad sobre el par.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Favorito - mapea a la tabla favorites
#[derive(Debug, Clone, FromRow)]
pub struct Favorite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Request para agregar un favorito
#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    pub vehicle_id: Uuid,
}

/// Fila de listado: favorito + tarjeta del vehículo
#[derive(Debug, Clone, FromRow)]
pub struct FavoriteListRow {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub vehicle_name: String,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub vehicle_price: Decimal,
    pub vehicle_image: Option<String>,
}

/// Response de favorito
#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub vehicle_name: String,
    pub vehicle_brand: String,
    pub vehicle_model: String,
    pub vehicle_price: Decimal,
    pub vehicle_image: Option<String>,
}

impl From<FavoriteListRow> for FavoriteResponse {
    fn from(f: FavoriteListRow) -> Self {
        Self {
            id: f.id,
            vehicle_id: f.vehicle_id,
            created_at: f.created_at,
            vehicle_name: f.vehicle_name,
            vehicle_brand: f.vehicle_brand,
            vehicle_model: f.vehicle_model,
            vehicle_price: f.vehicle_price,
            vehicle_image: f.vehicle_image,
        }
    }
}

/// Response del check de favorito
#[derive(Debug, Serialize)]
pub struct FavoriteStatusResponse {
    pub is_favorited: bool,
}
