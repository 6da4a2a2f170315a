use crate::controllers::BookingController;
use crate::dto::{ApiResponse, Paginated};
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::models::booking::{
    BookingFilters, BookingResponse, CreateBookingRequest, UpdateBookingStatusRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;
use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

pub fn create_booking_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_booking))
        .route("/", get(my_bookings))
        .route("/dealer", get(dealer_bookings))
        .route("/:id", get(get_booking))
        .route("/:id/status", put(update_booking_status))
        .route("/:id/cancel", put(cancel_booking))
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn create_booking(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let controller = BookingController::new(&state);
    Ok(Json(controller.create(&auth, request).await?))
}

async fn my_bookings(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(filters): Query<BookingFilters>,
) -> Result<Json<ApiResponse<Paginated<BookingResponse>>>, AppError> {
    let controller = BookingController::new(&state);
    Ok(Json(controller.list_for_user(&auth, filters).await?))
}

async fn dealer_bookings(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(filters): Query<BookingFilters>,
) -> Result<Json<ApiResponse<Paginated<BookingResponse>>>, AppError> {
    let controller = BookingController::new(&state);
    Ok(Json(controller.list_for_dealer(&auth, filters).await?))
}

async fn get_booking(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let controller = BookingController::new(&state);
    Ok(Json(controller.get_by_id(&auth, id).await?))
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

async fn cancel_booking(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let controller = BookingController::new(&state);
    Ok(Json(controller.cancel(&auth, id).await?))
}
