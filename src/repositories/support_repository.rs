//! Repositorio de tickets de soporte

use crate::models::support::{
    CreateTicketRequest, SupportTicket, TicketCategory, TicketFilters, TicketPriority,
    TicketStatus,
};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

pub struct SupportRepository {
    pool: PgPool,
}

impl SupportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        ticket_code: String,
        request: CreateTicketRequest,
    ) -> Result<SupportTicket, AppError> {
        let ticket = sqlx::query_as::<_, SupportTicket>(
            r#"
            INSERT INTO support_tickets (
                id, ticket_code, name, email, phone, subject, category, priority, message
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(ticket_code)
        .bind(request.name)
        .bind(request.email.to_lowercase())
        .bind(request.phone)
        .bind(request.subject)
        .bind(request.category.unwrap_or(TicketCategory::General))
        .bind(request.priority.unwrap_or(TicketPriority::Medium))
        .bind(request.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(ticket)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<SupportTicket>, AppError> {
        let ticket =
            sqlx::query_as::<_, SupportTicket>("SELECT * FROM support_tickets WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(ticket)
    }

    pub async fn find_by_code(&self, code: &str) -> Result<Option<SupportTicket>, AppError> {
        let ticket = sqlx::query_as::<_, SupportTicket>(
            "SELECT * FROM support_tickets WHERE ticket_code = $1",
        )
        .bind(code.to_uppercase())
        .fetch_optional(&self.pool)
        .await?;

        Ok(ticket)
    }

    /// Responder un ticket; resolved/closed estampan su timestamp
    pub async fn respond(
        &self,
        id: Uuid,
        response: String,
        status: TicketStatus,
    ) -> Result<SupportTicket, AppError> {
        let now = Utc::now();
        let resolved_at = (status == TicketStatus::Resolved).then_some(now);
        let closed_at = (status == TicketStatus::Closed).then_some(now);

        let ticket = sqlx::query_as::<_, SupportTicket>(
            r#"
            UPDATE support_tickets SET
                admin_response = $2,
                status = $3,
                resolved_at = COALESCE($4, resolved_at),
                closed_at = COALESCE($5, closed_at),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(response)
        .bind(status)
        .bind(resolved_at)
        .bind(closed_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(ticket)
    }

    /// Listado paginado con filtros (admin)
    pub async fn list(
        &self,
        filters: &TicketFilters,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<SupportTicket>, i64), AppError> {
        let mut select =
            QueryBuilder::<Postgres>::new("SELECT * FROM support_tickets WHERE TRUE");
        let mut count =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM support_tickets WHERE TRUE");

        for builder in [&mut select, &mut count] {
            if let Some(status) = filters.status {
                builder.push(" AND status = ").push_bind(status);
            }
            if let Some(category) = filters.category {
                builder.push(" AND category = ").push_bind(category);
            }
            if let Some(priority) = filters.priority {
                builder.push(" AND priority = ").push_bind(priority);
            }
        }

        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        select
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(crate::dto::PaginationQuery::offset(page, limit));

        let tickets = select
            .build_query_as::<SupportTicket>()
            .fetch_all(&self.pool)
            .await?;

        Ok((tickets, total))
    }

    pub async fn count_open(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM support_tickets WHERE status IN ('open', 'in_progress')",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
