//! Modelo de Booking
//!
//! Reservas de test ride / consulta de compra / consulta de EMI.
//! El ciclo de vida es una máquina de estados:
//! pending -> confirmed -> completed; pending|confirmed -> cancelled.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Tipo de reserva
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingType {
    TestRide,
    PurchaseInquiry,
    EmiInquiry,
}

/// Estado de la reserva
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// completed y cancelled son terminales
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// Transiciones legales de la máquina de estados
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        match (self, next) {
            (BookingStatus::Pending, BookingStatus::Confirmed) => true,
            (BookingStatus::Pending, BookingStatus::Cancelled) => true,
            (BookingStatus::Confirmed, BookingStatus::Completed) => true,
            (BookingStatus::Confirmed, BookingStatus::Cancelled) => true,
            // pending -> completed lo permite un dealer que cierra
            // la reserva sin pasar por confirmed
            (BookingStatus::Pending, BookingStatus::Completed) => true,
            _ => false,
        }
    }
}

impl FromStr for BookingStatus {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(()),
        }
    }
}

/// Reserva - mapea a la tabla bookings
#[derive(Debug, Clone, FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub booking_type: BookingType,
    pub status: BookingStatus,
    pub preferred_date: NaiveDate,
    pub preferred_time: Option<String>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub dealer_notes: Option<String>,
    pub confirmed_date: Option<NaiveDate>,
    pub confirmed_time: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request de creación de reserva
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub vehicle_id: Uuid,
    pub booking_type: BookingType,

    #[validate(custom = "crate::utils::validation::validate_future_date")]
    pub preferred_date: NaiveDate,

    #[validate(length(max = 20))]
    pub preferred_time: Option<String>,

    #[validate(length(min = 2, max = 50, message = "Customer name must be between 2 and 50 characters"))]
    pub customer_name: String,

    #[validate(custom = "crate::utils::validation::validate_phone")]
    pub customer_phone: String,

    #[validate(email(message = "Please provide a valid email"))]
    pub customer_email: Option<String>,
}

/// Request de cambio de estado (dealer/admin)
///
/// El estado llega como string y se parsea explícitamente: un valor fuera
/// del enum es un error de validación (400), no un fallo de deserialización.
#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: String,
    pub dealer_notes: Option<String>,
    pub confirmed_date: Option<NaiveDate>,
    pub confirmed_time: Option<String>,
}

/// Filtros de listados de reservas
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingFilters {
    pub status: Option<BookingStatus>,
    pub booking_type: Option<BookingType>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Fila de listado: reserva + datos mínimos del vehículo
#[derive(Debug, Clone, FromRow)]
pub struct BookingListRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub booking_type: BookingType,
    pub status: BookingStatus,
    pub preferred_date: NaiveDate,
    pub preferred_time: Option<String>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub dealer_notes: Option<String>,
    pub confirmed_date: Option<NaiveDate>,
    pub confirmed_time: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub vehicle_name: String,
    pub vehicle_brand: String,
    pub vehicle_image: Option<String>,
}

/// Response de reserva
#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub booking_type: BookingType,
    pub status: BookingStatus,
    pub preferred_date: NaiveDate,
    pub preferred_time: Option<String>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub dealer_notes: Option<String>,
    pub confirmed_date: Option<NaiveDate>,
    pub confirmed_time: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_image: Option<String>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            vehicle_id: b.vehicle_id,
            booking_type: b.booking_type,
            status: b.status,
            preferred_date: b.preferred_date,
            preferred_time: b.preferred_time,
            customer_name: b.customer_name,
            customer_phone: b.customer_phone,
            customer_email: b.customer_email,
            dealer_notes: b.dealer_notes,
            confirmed_date: b.confirmed_date,
            confirmed_time: b.confirmed_time,
            completed_at: b.completed_at,
            created_at: b.created_at,
            vehicle_name: None,
            vehicle_brand: None,
            vehicle_image: None,
        }
    }
}

impl From<BookingListRow> for BookingResponse {
    fn from(b: BookingListRow) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            vehicle_id: b.vehicle_id,
            booking_type: b.booking_type,
            status: b.status,
            preferred_date: b.preferred_date,
            preferred_time: b.preferred_time,
            customer_name: b.customer_name,
            customer_phone: b.customer_phone,
            customer_email: b.customer_email,
            dealer_notes: b.dealer_notes,
            confirmed_date: b.confirmed_date,
            confirmed_time: b.confirmed_time,
            completed_at: b.completed_at,
            created_at: b.created_at,
            vehicle_name: Some(b.vehicle_name),
            vehicle_brand: Some(b.vehicle_brand),
            vehicle_image: b.vehicle_image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Confirmed));
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Cancelled));
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Completed));
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Completed));
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Cancelled));
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        for next in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            assert!(!BookingStatus::Completed.can_transition_to(next));
            assert!(!BookingStatus::Cancelled.can_transition_to(next));
        }
        assert!(BookingStatus::Completed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(!BookingStatus::Pending.is_terminal());
        assert!(!BookingStatus::Confirmed.is_terminal());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("confirmed".parse::<BookingStatus>(), Ok(BookingStatus::Confirmed));
        assert!("shipped".parse::<BookingStatus>().is_err());
    }
}
