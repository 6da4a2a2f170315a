use crate::controllers::FaqController;
use crate::dto::ApiResponse;
use crate::models::faq::{FaqFilters, FaqResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

pub fn create_faq_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_faqs))
        .route("/:id/helpful", post(mark_helpful))
}

async fn list_faqs(
    State(state): State<AppState>,
    Query(filters): Query<FaqFilters>,
) -> Result<Json<ApiResponse<Vec<FaqResponse>>>, AppError> {
    let controller = FaqController::new(&state);
    Ok(Json(controller.list(filters).await?))
}

async fn mark_helpful(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = FaqController::new(&state);
    Ok(Json(controller.mark_helpful(id).await?))
}
