use crate::controllers::SupportController;
use crate::dto::ApiResponse;
use crate::models::support::{CreateTicketRequest, TicketResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};

pub fn create_support_router() -> Router<AppState> {
    Router::new()
        .route("/tickets", post(create_ticket))
        .route("/tickets/:code", get(track_ticket))
}

async fn create_ticket(
    State(state): State<AppState>,
    Json(request): Json<CreateTicketRequest>,
) -> Result<Json<ApiResponse<TicketResponse>>, AppError> {
    let controller = SupportController::new(&state);
    Ok(Json(controller.create(request).await?))
}

async fn track_ticket(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<TicketResponse>>, AppError> {
    let controller = SupportController::new(&state);
    Ok(Json(controller.get_by_code(&code).await?))
}
