//! Tipos del asistente de chat
//!
//! La conversación no guarda estado en el servidor: el historial viaja
//! completo en cada request y la respuesta es función pura de sus inputs.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Un turno previo de la conversación
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    // "user" o "assistant"
    pub role: String,
    pub content: String,
}

/// Request de mensaje de chat
#[derive(Debug, Deserialize, Validate)]
pub struct ChatMessageRequest {
    #[validate(length(min = 1, max = 1000, message = "Message must be between 1 and 1000 characters"))]
    pub message: String,

    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

/// Origen de la respuesta del asistente
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    /// Respondió la API generativa externa
    Assistant,
    /// Respondió la tabla de reglas estáticas
    Fallback,
}

/// Response del asistente
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub source: ReplySource,
}
