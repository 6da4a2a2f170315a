use crate::controllers::{
    AdminController, BookingController, FaqController, ReviewController, SupportController,
};
use crate::dto::{ApiResponse, Paginated, PaginationQuery};
use crate::middleware::auth::{admin_only_middleware, auth_middleware, AuthenticatedUser};
use crate::models::admin::DashboardStats;
use crate::models::booking::{BookingFilters, BookingResponse, UpdateBookingStatusRequest};
use crate::models::faq::{CreateFaqRequest, FaqResponse, UpdateFaqRequest};
use crate::models::review::ReviewResponse;
use crate::models::support::{RespondTicketRequest, TicketFilters, TicketResponse};
use crate::models::user::{AdminCreateUserRequest, UserFilters, UserResponse};
use crate::models::vehicle::{VehicleFilters, VehicleResponse, VehicleStatus};
use crate::state::AppState;
use crate::utils::errors::AppError;
use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

/// Rutas exclusivas de admin: auth obligatoria + corte de rol antes del handler
pub fn create_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/users", get(list_users))
        .route("/users", post(create_user))
        .route("/users/:id/status", put(set_user_active))
        .route("/vehicles", get(list_vehicles))
        .route("/vehicles/:id/featured", put(set_vehicle_featured))
        .route("/vehicles/:id/status", put(set_vehicle_status))
        .route("/bookings", get(list_bookings))
        .route("/bookings/:id/status", put(update_booking_status))
        .route("/reviews/pending", get(pending_reviews))
        .route("/reviews/:id/approve", put(approve_review))
        .route("/reviews/:id/reject", put(reject_review))
        .route("/reviews/:id", delete(delete_review))
        .route("/tickets", get(list_tickets))
        .route("/tickets/:id/respond", put(respond_ticket))
        .route("/faqs", post(create_faq))
        .route("/faqs/:id", put(update_faq))
        .route("/faqs/:id", delete(delete_faq))
        .layer(middleware::from_fn(admin_only_middleware))
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}

#[derive(Deserialize)]
struct SetActiveRequest {
    is_active: bool,
}

#[derive(Deserialize)]
struct SetFeaturedRequest {
    is_featured: bool,
}

#[derive(Deserialize)]
struct SetVehicleStatusRequest {
    status: VehicleStatus,
}

async fn dashboard(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardStats>>, AppError> {
    let controller = AdminController::new(&state);
    Ok(Json(controller.dashboard().await?))
}

async fn list_users(
    State(state): State<AppState>,
    Query(filters): Query<UserFilters>,
) -> Result<Json<ApiResponse<Paginated<UserResponse>>>, AppError> {
    let controller = AdminController::new(&state);
    Ok(Json(controller.list_users(filters).await?))
}

async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<AdminCreateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = AdminController::new(&state);
    Ok(Json(controller.create_user(request).await?))
}

async fn set_user_active(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetActiveRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let controller = AdminController::new(&state);
    Ok(Json(
        controller
            .set_user_active(&auth, id, request.is_active)
            .await?,
    ))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(filters): Query<VehicleFilters>,
) -> Result<Json<ApiResponse<Paginated<VehicleResponse>>>, AppError> {
    let controller = AdminController::new(&state);
    Ok(Json(controller.list_vehicles(filters).await?))
}

async fn set_vehicle_featured(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetFeaturedRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = AdminController::new(&state);
    Ok(Json(
        controller
            .set_vehicle_featured(id, request.is_featured)
            .await?,
    ))
}

async fn set_vehicle_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetVehicleStatusRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = AdminController::new(&state);
    Ok(Json(
        controller.set_vehicle_status(id, request.status).await?,
    ))
}

async fn list_bookings(
    State(state): State<AppState>,
    Query(filters): Query<BookingFilters>,
) -> Result<Json<ApiResponse<Paginated<BookingResponse>>>, AppError> {
    let controller = BookingController::new(&state);
    Ok(Json(controller.list_all(filters).await?))
}

async fn update_booking_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBookingStatusRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let controller = BookingController::new(&state);
    Ok(Json(controller.update_status(&auth, id, request).await?))
}

async fn pending_reviews(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Paginated<ReviewResponse>>>, AppError> {
    let controller = ReviewController::new(&state);
    Ok(Json(controller.pending(pagination).await?))
}

async fn approve_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReviewResponse>>, AppError> {
    let controller = ReviewController::new(&state);
    Ok(Json(controller.moderate(id, true).await?))
}

async fn reject_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ReviewResponse>>, AppError> {
    let controller = ReviewController::new(&state);
    Ok(Json(controller.moderate(id, false).await?))
}

async fn delete_review(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ReviewController::new(&state);
    Ok(Json(controller.delete_own(&auth, id).await?))
}

async fn list_tickets(
    State(state): State<AppState>,
    Query(filters): Query<TicketFilters>,
) -> Result<Json<ApiResponse<Paginated<TicketResponse>>>, AppError> {
    let controller = SupportController::new(&state);
    Ok(Json(controller.list(filters).await?))
}

async fn respond_ticket(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RespondTicketRequest>,
) -> Result<Json<ApiResponse<TicketResponse>>, AppError> {
    let controller = SupportController::new(&state);
    Ok(Json(controller.respond(id, request).await?))
}

async fn create_faq(
    State(state): State<AppState>,
    Json(request): Json<CreateFaqRequest>,
) -> Result<Json<ApiResponse<FaqResponse>>, AppError> {
    let controller = FaqController::new(&state);
    Ok(Json(controller.create(request).await?))
}

async fn update_faq(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateFaqRequest>,
) -> Result<Json<ApiResponse<FaqResponse>>, AppError> {
    let controller = FaqController::new(&state);
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_faq(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = FaqController::new(&state);
    Ok(Json(controller.delete(id).await?))
}
