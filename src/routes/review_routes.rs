use crate::controllers::ReviewController;
use crate::dto::ApiResponse;
use crate::middleware::auth::{auth_middleware, AuthenticatedUser};
use crate::models::review::{CreateReviewRequest, ReviewResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, get, post},
    Extension, Json, Router,
};
use uuid::Uuid;

pub fn create_review_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(create_review))
        .route("/mine", get(my_reviews))
        .route("/:id", delete(delete_review))
        .layer(middleware::from_fn_with_state(state, auth_middleware))
}

async fn create_review(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(request): Json<CreateReviewRequest>,
) -> Result<Json<ApiResponse<ReviewResponse>>, AppError> {
    let controller = ReviewController::new(&state);
    Ok(Json(controller.create(&auth, request).await?))
}

async fn my_reviews(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<ReviewResponse>>>, AppError> {
    let controller = ReviewController::new(&state);
    Ok(Json(controller.mine(&auth).await?))
}

async fn delete_review(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ReviewController::new(&state);
    Ok(Json(controller.delete_own(&auth, id).await?))
}
