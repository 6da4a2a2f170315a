//! Modelo de Review
//!
//! Reseñas de usuarios sobre vehículos. Solo las aprobadas
//! (`is_approved = true`) aparecen en el detalle público.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Reseña - mapea a la tabla reviews
#[derive(Debug, Clone, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub rating: i16,
    pub title: String,
    pub comment: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request de creación de reseña
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewRequest {
    pub vehicle_id: Uuid,

    #[validate(custom = "crate::utils::validation::validate_rating")]
    pub rating: i16,

    #[validate(length(min = 2, max = 100, message = "Title must be between 2 and 100 characters"))]
    pub title: String,

    #[validate(length(min = 10, max = 1000, message = "Comment must be between 10 and 1000 characters"))]
    pub comment: String,

    pub pros: Option<Vec<String>>,
    pub cons: Option<Vec<String>>,
}

/// Fila de listado: reseña + nombre del autor
#[derive(Debug, Clone, FromRow)]
pub struct ReviewListRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub rating: i16,
    pub title: String,
    pub comment: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
}

/// Response de reseña
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub rating: i16,
    pub title: String,
    pub comment: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            vehicle_id: r.vehicle_id,
            rating: r.rating,
            title: r.title,
            comment: r.comment,
            pros: r.pros,
            cons: r.cons,
            is_approved: r.is_approved,
            created_at: r.created_at,
            user_name: None,
        }
    }
}

impl From<ReviewListRow> for ReviewResponse {
    fn from(r: ReviewListRow) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            vehicle_id: r.vehicle_id,
            rating: r.rating,
            title: r.title,
            comment: r.comment,
            pros: r.pros,
            cons: r.cons,
            is_approved: r.is_approved,
            created_at: r.created_at,
            user_name: Some(r.user_name),
        }
    }
}
