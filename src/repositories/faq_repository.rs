//! Repositorio de FAQs

use crate::models::faq::{CreateFaqRequest, Faq, FaqCategory, UpdateFaqRequest};
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;

pub struct FaqRepository {
    pool: PgPool,
}

impl FaqRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateFaqRequest) -> Result<Faq, AppError> {
        let faq = sqlx::query_as::<_, Faq>(
            r#"
            INSERT INTO faqs (id, question, answer, category, tags, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.question)
        .bind(request.answer)
        .bind(request.category.unwrap_or(FaqCategory::General))
        .bind(request.tags.unwrap_or_default())
        .bind(request.sort_order.unwrap_or(0))
        .fetch_one(&self.pool)
        .await?;

        Ok(faq)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Faq>, AppError> {
        let faq = sqlx::query_as::<_, Faq>("SELECT * FROM faqs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(faq)
    }

    /// FAQs activas, opcionalmente por categoría, ordenadas por sort_order
    pub async fn list_active(&self, category: Option<FaqCategory>) -> Result<Vec<Faq>, AppError> {
        let faqs = match category {
            Some(category) => {
                sqlx::query_as::<_, Faq>(
                    r#"
                    SELECT * FROM faqs
                    WHERE is_active = TRUE AND category = $1
                    ORDER BY sort_order, created_at
                    "#,
                )
                .bind(category)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Faq>(
                    "SELECT * FROM faqs WHERE is_active = TRUE ORDER BY sort_order, created_at",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(faqs)
    }

    pub async fn update(&self, id: Uuid, request: UpdateFaqRequest) -> Result<Faq, AppError> {
        let faq = sqlx::query_as::<_, Faq>(
            r#"
            UPDATE faqs SET
                question = COALESCE($2, question),
                answer = COALESCE($3, answer),
                category = COALESCE($4, category),
                tags = COALESCE($5, tags),
                is_active = COALESCE($6, is_active),
                sort_order = COALESCE($7, sort_order),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.question)
        .bind(request.answer)
        .bind(request.category)
        .bind(request.tags)
        .bind(request.is_active)
        .bind(request.sort_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(faq)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM faqs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn increment_views(&self, ids: &[Uuid]) -> Result<(), AppError> {
        sqlx::query("UPDATE faqs SET view_count = view_count + 1 WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Marcar una FAQ como útil; devuelve si existía
    pub async fn increment_helpful(&self, id: Uuid) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE faqs SET helpful_count = helpful_count + 1 WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}
