//! Controller del asistente de chat

use crate::dto::ApiResponse;
use crate::models::chat::{ChatMessageRequest, ChatReply};
use crate::services::ChatService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use validator::Validate;

pub struct ChatController {
    service: ChatService,
}

impl ChatController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: ChatService::new(state),
        }
    }

    pub async fn send_message(
        &self,
        request: ChatMessageRequest,
    ) -> Result<ApiResponse<ChatReply>, AppError> {
        request.validate()?;

        let reply = self
            .service
            .reply(&request.message, &request.history)
            .await;

        Ok(ApiResponse::success(reply))
    }
}
