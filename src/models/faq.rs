//! Modelo de FAQ

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Categoría de FAQ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "faq_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FaqCategory {
    General,
    Booking,
    Payment,
    Account,
    Vehicles,
    Dealers,
}

/// FAQ - mapea a la tabla faqs
#[derive(Debug, Clone, FromRow)]
pub struct Faq {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub category: FaqCategory,
    pub tags: Vec<String>,
    pub is_active: bool,
    pub view_count: i32,
    pub helpful_count: i32,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request de creación de FAQ (admin)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFaqRequest {
    #[validate(length(min = 5, max = 300, message = "Question must be between 5 and 300 characters"))]
    pub question: String,

    #[validate(length(min = 5, max = 3000, message = "Answer must be between 5 and 3000 characters"))]
    pub answer: String,

    pub category: Option<FaqCategory>,
    pub tags: Option<Vec<String>>,
    pub sort_order: Option<i32>,
}

/// Request de actualización de FAQ (admin)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateFaqRequest {
    #[validate(length(min = 5, max = 300, message = "Question must be between 5 and 300 characters"))]
    pub question: Option<String>,

    #[validate(length(min = 5, max = 3000, message = "Answer must be between 5 and 3000 characters"))]
    pub answer: Option<String>,

    pub category: Option<FaqCategory>,
    pub tags: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

/// Filtros del listado público
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FaqFilters {
    pub category: Option<FaqCategory>,
}

/// Response de FAQ
#[derive(Debug, Serialize)]
pub struct FaqResponse {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub category: FaqCategory,
    pub tags: Vec<String>,
    pub view_count: i32,
    pub helpful_count: i32,
    pub sort_order: i32,
}

impl From<Faq> for FaqResponse {
    fn from(f: Faq) -> Self {
        Self {
            id: f.id,
            question: f.question,
            answer: f.answer,
            category: f.category,
            tags: f.tags,
            view_count: f.view_count,
            helpful_count: f.helpful_count,
            sort_order: f.sort_order,
        }
    }
}
