//! Modelo de SupportTicket
//!
//! Tickets de soporte con código legible (`TKT-XXXXXXXX`). Se pueden crear
//! sin cuenta; el seguimiento es por código + email de contacto.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Categoría del ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "ticket_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TicketCategory {
    General,
    Booking,
    Payment,
    Technical,
    Dealer,
    Other,
}

/// Prioridad del ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "ticket_priority", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Urgent,
}

/// Estado del ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "ticket_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl std::str::FromStr for TicketStatus {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "open" => Ok(TicketStatus::Open),
            "in_progress" => Ok(TicketStatus::InProgress),
            "resolved" => Ok(TicketStatus::Resolved),
            "closed" => Ok(TicketStatus::Closed),
            _ => Err(()),
        }
    }
}

/// Ticket de soporte - mapea a la tabla support_tickets
#[derive(Debug, Clone, FromRow)]
pub struct SupportTicket {
    pub id: Uuid,
    pub ticket_code: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub message: String,
    pub admin_response: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request de creación de ticket (público)
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTicketRequest {
    #[validate(length(min = 2, max = 50, message = "Name must be between 2 and 50 characters"))]
    pub name: String,

    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub phone: Option<String>,

    #[validate(length(min = 5, max = 100, message = "Subject must be between 5 and 100 characters"))]
    pub subject: String,

    pub category: Option<TicketCategory>,
    pub priority: Option<TicketPriority>,

    #[validate(length(min = 10, max = 2000, message = "Message must be between 10 and 2000 characters"))]
    pub message: String,
}

/// Request de respuesta de un admin
#[derive(Debug, Deserialize, Validate)]
pub struct RespondTicketRequest {
    #[validate(length(min = 2, max = 2000, message = "Response must be between 2 and 2000 characters"))]
    pub response: String,

    // estado destino opcional, parseado explícitamente
    pub status: Option<String>,
}

/// Filtros del listado de tickets (admin)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketFilters {
    pub status: Option<TicketStatus>,
    pub category: Option<TicketCategory>,
    pub priority: Option<TicketPriority>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Response de ticket
#[derive(Debug, Serialize)]
pub struct TicketResponse {
    pub id: Uuid,
    pub ticket_code: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub category: TicketCategory,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub message: String,
    pub admin_response: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<SupportTicket> for TicketResponse {
    fn from(t: SupportTicket) -> Self {
        Self {
            id: t.id,
            ticket_code: t.ticket_code,
            name: t.name,
            email: t.email,
            phone: t.phone,
            subject: t.subject,
            category: t.category,
            priority: t.priority,
            status: t.status,
            message: t.message,
            admin_response: t.admin_response,
            resolved_at: t.resolved_at,
            closed_at: t.closed_at,
            created_at: t.created_at,
        }
    }
}

/// Generar un código de ticket legible a partir de un UUID v4
pub fn generate_ticket_code() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("TKT-{}", id[..8].to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_code_format() {
        let code = generate_ticket_code();
        assert!(code.starts_with("TKT-"));
        assert_eq!(code.len(), 12);
        assert!(code[4..].chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_ticket_codes_are_unique_enough() {
        let a = generate_ticket_code();
        let b = generate_ticket_code();
        assert_ne!(a, b);
    }
}
