use crate::controllers::FavoriteController;
use crate::dto::{ApiResponse, Paginated, PaginationQuery};
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::models::favorite::{AddFavoriteRequest, FavoriteResponse, FavoriteStatusResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

pub fn create_favorite_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(add_favorite))
        .route("/", get(list_favorites))
        .route("/:vehicle_id", delete(remove_favorite))
        .route("/:vehicle_id/check", get(check_favorite))
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn add_favorite(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(request): Json<AddFavoriteRequest>,
) -> Result<Json<ApiResponse<FavoriteStatusResponse>>, AppError> {
    let controller = FavoriteController::new(&state);
    Ok(Json(controller.add(&auth, request).await?))
}

async fn list_favorites(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Paginated<FavoriteResponse>>>, AppError> {
    let controller = FavoriteController::new(&state);
    Ok(Json(controller.list(&auth, pagination).await?))
}

async fn remove_favorite(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<ApiResponse<FavoriteStatusResponse>>, AppError> {
    let controller = FavoriteController::new(&state);
    Ok(Json(controller.remove(&auth, vehicle_id).await?))
}

async fn check_favorite(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<ApiResponse<FavoriteStatusResponse>>, AppError> {
    let controller = FavoriteController::new(&state);
    Ok(Json(controller.check(&auth, vehicle_id).await?))
}
