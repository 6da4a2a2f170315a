//! Repositorio de usuarios

use crate::models::user::{User, UserFilters, UserRole};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: String,
        email: String,
        password_hash: String,
        phone: Option<String>,
        role: UserRole,
        is_verified: bool,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash, phone, role, is_verified, last_login)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        // el email se guarda en minúsculas; la unicidad es case-insensitive
        .bind(email.to_lowercase())
        .bind(password_hash)
        .bind(phone)
        .bind(role)
        .bind(is_verified)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = LOWER($1))")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn touch_last_login(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE users SET last_login = $2, updated_at = $2 WHERE id = $1")
            .bind(id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        name: Option<String>,
        phone: Option<String>,
        address: Option<String>,
        city: Option<String>,
        state: Option<String>,
        pincode: Option<String>,
        profile_picture: Option<String>,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                address = COALESCE($4, address),
                city = COALESCE($5, city),
                state = COALESCE($6, state),
                pincode = COALESCE($7, pincode),
                profile_picture = COALESCE($8, profile_picture),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(phone)
        .bind(address)
        .bind(city)
        .bind(state)
        .bind(pincode)
        .bind(profile_picture)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn set_active(&self, id: Uuid, is_active: bool) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET is_active = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Listado paginado con filtros (admin)
    pub async fn list(
        &self,
        filters: &UserFilters,
        page: i64,
        limit: i64,
    ) -> Result<(Vec<User>, i64), AppError> {
        let mut select = QueryBuilder::<Postgres>::new("SELECT * FROM users WHERE TRUE");
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM users WHERE TRUE");

        for builder in [&mut select, &mut count] {
            if let Some(role) = filters.role {
                builder.push(" AND role = ").push_bind(role);
            }
            if let Some(is_active) = filters.is_active {
                builder.push(" AND is_active = ").push_bind(is_active);
            }
            if let Some(q) = filters.q.as_deref().filter(|q| !q.trim().is_empty()) {
                let pattern = super::like_pattern(q);
                builder
                    .push(" AND (name ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR email ILIKE ")
                    .push_bind(pattern)
                    .push(")");
            }
        }

        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        select
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(crate::dto::PaginationQuery::offset(page, limit));

        let users = select
            .build_query_as::<User>()
            .fetch_all(&self.pool)
            .await?;

        Ok((users, total))
    }

    pub async fn count_by_role(&self, role: UserRole) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }
}
