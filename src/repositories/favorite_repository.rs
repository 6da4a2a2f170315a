//! Repositorio de favoritos

use crate::models::favorite::{Favorite, FavoriteListRow};
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct FavoriteRepository {
    pool: PgPool,
}

impl FavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: Uuid, vehicle_id: Uuid) -> Result<Favorite, AppError> {
        let favorite = sqlx::query_as::<_, Favorite>(
            r#"
            INSERT INTO favorites (id, user_id, vehicle_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(vehicle_id)
        .fetch_one(&self.pool)
        .await
        // UNIQUE (user_id, vehicle_id) cierra la carrera check-then-insert
        .map_err(|e| super::conflict_on_unique(e, "Vehicle is already in favorites"))?;

        Ok(favorite)
    }

    pub async fn exists(&self, user_id: Uuid, vehicle_id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM favorites WHERE user_id = $1 AND vehicle_id = $2)",
        )
        .bind(user_id)
        .bind(vehicle_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Borrar el favorito; devuelve si existía
    pub async fn delete(&self, user_id: Uuid, vehicle_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND vehicle_id = $2")
            .bind(user_id)
            .bind(vehicle_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Favoritos del usuario con la tarjeta del vehículo
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<FavoriteListRow>, i64), AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favorites WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        let favorites = sqlx::query_as::<_, FavoriteListRow>(
            r#"
            SELECT
                f.id, f.vehicle_id, f.created_at,
                v.name AS vehicle_name, v.brand AS vehicle_brand,
                v.model AS vehicle_model, v.price AS vehicle_price,
                (v.images)[1] AS vehicle_image
            FROM favorites f
            JOIN vehicles v ON v.id = f.vehicle_id
            WHERE f.user_id = $1
            ORDER BY f.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(crate::dto::PaginationQuery::offset(page, limit))
        .fetch_all(&self.pool)
        .await?;

        Ok((favorites, total))
    }
}
