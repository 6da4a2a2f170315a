//! Repositorio de reservas

use crate::models::booking::{
    Booking, BookingFilters, BookingListRow, BookingStatus, CreateBookingRequest,
};
use crate::utils::errors::AppError;
use chrono::{NaiveDate, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

const LIST_COLUMNS: &str = r#"
    b.id, b.user_id, b.vehicle_id, b.booking_type, b.status,
    b.preferred_date, b.preferred_time, b.customer_name, b.customer_phone,
    b.customer_email, b.dealer_notes, b.confirmed_date, b.confirmed_time,
    b.completed_at, b.created_at,
    v.name AS vehicle_name, v.brand AS vehicle_brand, (v.images)[1] AS vehicle_image
"#;

/// Alcance de un listado de reservas
pub enum BookingScope {
    /// Reservas creadas por el usuario
    User(Uuid),
    /// Reservas sobre vehículos del dealer
    Dealer(Uuid),
    /// Sin restricción (admin)
    All,
}

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        request: CreateBookingRequest,
    ) -> Result<Booking, AppError> {
        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (
                id, user_id, vehicle_id, booking_type, preferred_date,
                preferred_time, customer_name, customer_phone, customer_email
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(request.vehicle_id)
        .bind(request.booking_type)
        .bind(request.preferred_date)
        .bind(request.preferred_time)
        .bind(request.customer_name)
        .bind(request.customer_phone)
        .bind(request.customer_email)
        .fetch_one(&self.pool)
        .await
        // el índice único parcial cierra la carrera check-then-insert
        .map_err(|e| {
            super::conflict_on_unique(
                e,
                "You already have an active booking for this vehicle on this date",
            )
        })?;

        Ok(booking)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    /// ¿Existe una reserva pending/confirmed para (usuario, vehículo, fecha)?
    pub async fn has_active_booking(
        &self,
        user_id: Uuid,
        vehicle_id: Uuid,
        preferred_date: NaiveDate,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE user_id = $1 AND vehicle_id = $2 AND preferred_date = $3
                  AND status IN ('pending', 'confirmed')
            )
            "#,
        )
        .bind(user_id)
        .bind(vehicle_id)
        .bind(preferred_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Actualizar el estado; `completed` estampa `completed_at` en la misma
    /// sentencia.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: BookingStatus,
        dealer_notes: Option<String>,
        confirmed_date: Option<NaiveDate>,
        confirmed_time: Option<String>,
    ) -> Result<Booking, AppError> {
        let completed_at = if status == BookingStatus::Completed {
            Some(Utc::now())
        } else {
            None
        };

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings SET
                status = $2,
                dealer_notes = COALESCE($3, dealer_notes),
                confirmed_date = COALESCE($4, confirmed_date),
                confirmed_time = COALESCE($5, confirmed_time),
                completed_at = COALESCE($6, completed_at),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(dealer_notes)
        .bind(confirmed_date)
        .bind(confirmed_time)
        .bind(completed_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Listado paginado según el alcance del solicitante
    pub async fn list(
        &self,
        scope: BookingScope,
        filters: &BookingFilters,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<BookingListRow>, i64), AppError> {
        let base = format!(
            "SELECT {} FROM bookings b JOIN vehicles v ON v.id = b.vehicle_id WHERE TRUE",
            LIST_COLUMNS
        );
        let mut select = QueryBuilder::<Postgres>::new(base);
        let mut count = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM bookings b JOIN vehicles v ON v.id = b.vehicle_id WHERE TRUE",
        );

        for builder in [&mut select, &mut count] {
            match &scope {
                BookingScope::User(user_id) => {
                    builder.push(" AND b.user_id = ").push_bind(*user_id);
                }
                BookingScope::Dealer(dealer_id) => {
                    builder.push(" AND v.dealer_id = ").push_bind(*dealer_id);
                }
                BookingScope::All => {}
            }
            if let Some(status) = filters.status {
                builder.push(" AND b.status = ").push_bind(status);
            }
            if let Some(booking_type) = filters.booking_type {
                builder.push(" AND b.booking_type = ").push_bind(booking_type);
            }
        }

        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        select
            .push(" ORDER BY b.created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(crate::dto::PaginationQuery::offset(page, limit));

        let bookings = select
            .build_query_as::<BookingListRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok((bookings, total))
    }

    pub async fn count_by_status(&self, status: BookingStatus) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn count_all(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
