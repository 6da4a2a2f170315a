//! Repositorio de reseñas
//!
//! Incluye el recálculo del agregado (rating, review_count) del vehículo:
//! siempre se recomputa desde las reseñas aprobadas, nunca se incrementa,
//! así el rating no puede salirse de [0, 5].

use crate::models::review::{CreateReviewRequest, Review, ReviewListRow};
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        request: CreateReviewRequest,
    ) -> Result<Review, AppError> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (id, user_id, vehicle_id, rating, title, comment, pros, cons)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(request.vehicle_id)
        .bind(request.rating)
        .bind(request.title)
        .bind(request.comment)
        .bind(request.pros.unwrap_or_default())
        .bind(request.cons.unwrap_or_default())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| super::conflict_on_unique(e, "You have already reviewed this vehicle"))?;

        Ok(review)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>, AppError> {
        let review = sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(review)
    }

    pub async fn exists_for(&self, user_id: Uuid, vehicle_id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE user_id = $1 AND vehicle_id = $2)",
        )
        .bind(user_id)
        .bind(vehicle_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Reseñas aprobadas de un vehículo (detalle público)
    pub async fn approved_for_vehicle(
        &self,
        vehicle_id: Uuid,
    ) -> Result<Vec<ReviewListRow>, AppError> {
        let reviews = sqlx::query_as::<_, ReviewListRow>(
            r#"
            SELECT r.id, r.user_id, r.vehicle_id, r.rating, r.title, r.comment,
                   r.pros, r.cons, r.is_approved, r.created_at,
                   u.name AS user_name
            FROM reviews r
            JOIN users u ON u.id = r.user_id
            WHERE r.vehicle_id = $1 AND r.is_approved = TRUE
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Review>, AppError> {
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    /// Pendientes de moderación (admin)
    pub async fn pending(
        &self,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<ReviewListRow>, i64), AppError> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE is_approved = FALSE")
                .fetch_one(&self.pool)
                .await?;

        let reviews = sqlx::query_as::<_, ReviewListRow>(
            r#"
            SELECT r.id, r.user_id, r.vehicle_id, r.rating, r.title, r.comment,
                   r.pros, r.cons, r.is_approved, r.created_at,
                   u.name AS user_name
            FROM reviews r
            JOIN users u ON u.id = r.user_id
            WHERE r.is_approved = FALSE
            ORDER BY r.created_at ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(crate::dto::PaginationQuery::offset(page, limit))
        .fetch_all(&self.pool)
        .await?;

        Ok((reviews, total))
    }

    pub async fn set_approved(&self, id: Uuid, is_approved: bool) -> Result<Review, AppError> {
        let review = sqlx::query_as::<_, Review>(
            "UPDATE reviews SET is_approved = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(is_approved)
        .fetch_one(&self.pool)
        .await?;

        Ok(review)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn count_pending(&self) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE is_approved = FALSE")
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    /// Recalcular rating y review_count del vehículo desde las aprobadas
    pub async fn refresh_vehicle_aggregates(&self, vehicle_id: Uuid) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE vehicles SET
                rating = COALESCE((
                    SELECT ROUND(AVG(rating)::numeric, 1)
                    FROM reviews
                    WHERE vehicle_id = $1 AND is_approved = TRUE
                ), 0),
                review_count = (
                    SELECT COUNT(*)
                    FROM reviews
                    WHERE vehicle_id = $1 AND is_approved = TRUE
                ),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(vehicle_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
