//! Servicio del asistente de chat
//!
//! Dos capas: la API generativa externa (si hay clave configurada) y una
//! tabla de reglas estáticas como fallback. El servicio nunca propaga el
//! fallo de la API al cliente; si algo sale mal, responde la tabla.

use crate::models::chat::{ChatReply, ChatTurn, ReplySource};
use crate::state::AppState;
use serde::{Deserialize, Serialize};

/// Una regla estática: si el mensaje contiene alguno de los triggers
/// (case-insensitive), responde `reply`. Se evalúan en orden.
struct ChatRule {
    triggers: &'static [&'static str],
    reply: &'static str,
}

const CHAT_RULES: &[ChatRule] = &[
    ChatRule {
        triggers: &["book", "booking", "test ride", "reserve"],
        reply: "To book a test ride or purchase visit, open the vehicle page and tap 'Book Now'. You can pick a preferred date and the dealer will confirm it. You can track all your bookings under 'My Bookings'.",
    },
    ChatRule {
        triggers: &["cancel"],
        reply: "You can cancel a pending or confirmed booking from 'My Bookings'. Completed or already cancelled bookings cannot be cancelled.",
    },
    ChatRule {
        triggers: &["price", "cost", "emi", "finance"],
        reply: "Each vehicle page shows the ex-showroom price. For on-road price, EMI and financing options, the dealer listed on the vehicle page can give you an exact quote.",
    },
    ChatRule {
        triggers: &["electric", "ev", "battery", "range"],
        reply: "You can browse electric two-wheelers by choosing the 'Electric' category filter in the catalog. Battery capacity and claimed range are listed in each vehicle's specifications.",
    },
    ChatRule {
        triggers: &["dealer", "showroom"],
        reply: "Dealer contact details appear on every vehicle page. If you are a dealer and want to list vehicles, register with a dealer account.",
    },
    ChatRule {
        triggers: &["support", "help", "complaint", "problem", "issue"],
        reply: "You can raise a support ticket from the Support page; you'll get a ticket code like TKT-XXXXXXXX to track it. Our FAQ section also covers the most common questions.",
    },
    ChatRule {
        triggers: &["hello", "hi", "hey"],
        reply: "Hi! I can help you find two-wheelers, compare prices, book test rides and answer questions about your bookings. What are you looking for?",
    },
];

const DEFAULT_REPLY: &str = "I can help you with finding vehicles, bookings, pricing and support questions. Could you tell me a bit more about what you need?";

#[derive(Serialize)]
struct CompletionRequest<'a> {
    messages: Vec<CompletionMessage<'a>>,
}

#[derive(Serialize)]
struct CompletionMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionChoiceMessage,
}

#[derive(Deserialize)]
struct CompletionChoiceMessage {
    content: String,
}

const SYSTEM_PROMPT: &str = "You are the shopping assistant of a two-wheeler marketplace. \
Help users find motorcycles, scooters and electric two-wheelers, explain how bookings and \
test rides work, and answer pricing and support questions. Be brief and concrete.";

/// Respuesta de la tabla de reglas: función pura de mensaje e historial
pub fn generate_reply(message: &str, _history: &[ChatTurn]) -> String {
    let normalized = message.to_lowercase();

    for rule in CHAT_RULES {
        if rule.triggers.iter().any(|t| normalized.contains(t)) {
            return rule.reply.to_string();
        }
    }

    DEFAULT_REPLY.to_string()
}

pub struct ChatService {
    client: reqwest::Client,
    api_url: Option<String>,
    api_key: Option<String>,
}

impl ChatService {
    pub fn new(state: &AppState) -> Self {
        Self {
            client: state.http_client.clone(),
            api_url: state.config.chat_api_url.clone(),
            api_key: state.config.chat_api_key.clone(),
        }
    }

    /// Responder un mensaje. Intenta la API generativa; ante cualquier
    /// fallo (sin clave, timeout, status no-2xx, cuerpo inesperado)
    /// degrada a la tabla de reglas.
    pub async fn reply(&self, message: &str, history: &[ChatTurn]) -> ChatReply {
        if let (Some(url), Some(key)) = (self.api_url.as_deref(), self.api_key.as_deref()) {
            match self.call_assistant(url, key, message, history).await {
                Ok(reply) => {
                    return ChatReply {
                        reply,
                        source: ReplySource::Assistant,
                    };
                }
                Err(e) => {
                    log::warn!("💬 API de chat no disponible, usando fallback: {}", e);
                }
            }
        }

        ChatReply {
            reply: generate_reply(message, history),
            source: ReplySource::Fallback,
        }
    }

    async fn call_assistant(
        &self,
        url: &str,
        key: &str,
        message: &str,
        history: &[ChatTurn],
    ) -> Result<String, anyhow::Error> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(CompletionMessage {
            role: "system",
            content: SYSTEM_PROMPT,
        });
        for turn in history {
            messages.push(CompletionMessage {
                role: &turn.role,
                content: &turn.content,
            });
        }
        messages.push(CompletionMessage {
            role: "user",
            content: message,
        });

        let response = self
            .client
            .post(url)
            .bearer_auth(key)
            .json(&CompletionRequest { messages })
            .send()
            .await?
            .error_for_status()?
            .json::<CompletionResponse>()
            .await?;

        let reply = response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("empty completion"))?;

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_question_hits_booking_rule() {
        let reply = generate_reply("How do I book a test ride?", &[]);
        assert!(reply.contains("Book Now"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let reply = generate_reply("WHAT IS THE PRICE OF THIS BIKE?", &[]);
        assert!(reply.contains("ex-showroom"));
    }

    #[test]
    fn test_rules_are_checked_in_order() {
        // "cancel" y "booking" aparecen ambos; gana la primera regla
        let reply = generate_reply("I want to book and maybe cancel later", &[]);
        assert!(reply.contains("Book Now"));
    }

    #[test]
    fn test_unmatched_message_gets_default_reply() {
        let reply = generate_reply("zzz qqq", &[]);
        assert_eq!(reply, DEFAULT_REPLY);
    }
}
