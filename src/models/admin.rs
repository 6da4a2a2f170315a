//! Tipos del dashboard de administración

use serde::Serialize;

/// Conteos agregados del dashboard
#[derive(Debug, Default, Serialize)]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_dealers: i64,
    pub total_vehicles: i64,
    pub active_vehicles: i64,
    pub total_bookings: i64,
    pub pending_bookings: i64,
    pub confirmed_bookings: i64,
    pub completed_bookings: i64,
    pub cancelled_bookings: i64,
    pub open_tickets: i64,
    pub pending_reviews: i64,
}
