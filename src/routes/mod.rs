//! Ensamblado de rutas de la API

pub mod admin_routes;
pub mod auth_routes;
pub mod booking_routes;
pub mod chat_routes;
pub mod faq_routes;
pub mod favorite_routes;
pub mod review_routes;
pub mod support_routes;
pub mod vehicle_routes;

use crate::state::AppState;
use axum::Router;

/// Router completo de la API (se monta bajo /api/v1)
pub fn create_api_router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes::create_auth_router(state.clone()))
        .nest(
            "/vehicles",
            vehicle_routes::create_vehicle_router(state.clone()),
        )
        .nest(
            "/bookings",
            booking_routes::create_booking_router(state.clone()),
        )
        .nest(
            "/favorites",
            favorite_routes::create_favorite_router(state.clone()),
        )
        .nest(
            "/reviews",
            review_routes::create_review_router(state.clone()),
        )
        .nest("/support", support_routes::create_support_router())
        .nest("/faqs", faq_routes::create_faq_router())
        .nest("/chat", chat_routes::create_chat_router())
        .nest("/admin", admin_routes::create_admin_router(state))
}
