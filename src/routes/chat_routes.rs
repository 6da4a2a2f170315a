use crate::controllers::ChatController;
use crate::dto::ApiResponse;
use crate::models::chat::{ChatMessageRequest, ChatReply};
use crate::state::AppState;
use crate::utils::errors::AppError;
use axum::{extract::State, routing::post, Json, Router};

pub fn create_chat_router() -> Router<AppState> {
    Router::new().route("/message", post(send_message))
}

async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<ChatMessageRequest>,
) -> Result<Json<ApiResponse<ChatReply>>, AppError> {
    let controller = ChatController::new(&state);
    Ok(Json(controller.send_message(request).await?))
}
