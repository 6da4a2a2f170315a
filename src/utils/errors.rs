//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
///
/// Mantiene la forma del envelope `{ success, error, message? }`.
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ErrorResponse {
    fn new(error: String) -> Self {
        Self {
            success: false,
            error,
            message: None,
        }
    }

    fn with_detail(error: String, detail: String) -> Self {
        Self {
            success: false,
            error,
            // El detalle interno solo se expone en desarrollo
            message: if is_development() { Some(detail) } else { None },
        }
    }
}

// Cerrado por defecto: sin ENVIRONMENT=development explícito no se
// expone ningún detalle interno.
fn is_development() -> bool {
    std::env::var("ENVIRONMENT")
        .map(|e| e == "development")
        .unwrap_or(false)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),

            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ErrorResponse::new(msg)),

            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, ErrorResponse::new(msg)),

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg)),

            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorResponse::new(msg)),

            AppError::Database(e) => {
                log::error!("❌ Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_detail(
                        "An unexpected error occurred".to_string(),
                        e.to_string(),
                    ),
                )
            }

            AppError::ExternalApi(msg) => {
                log::error!("❌ External API error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::with_detail(
                        "An error occurred while communicating with external service".to_string(),
                        msg,
                    ),
                )
            }

            AppError::Internal(msg) => {
                log::error!("❌ Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_detail("An unexpected error occurred".to_string(), msg),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Convierte los errores del derive de `validator` en un `AppError` con el
/// mensaje del primer campo que falló.
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_iter()
            .next()
            .and_then(|(field, errs)| {
                errs.first().map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid value for field '{}'", field),
                })
            })
            .unwrap_or_else(|| "Invalid request payload".to_string());

        AppError::Validation(message)
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Dummy {
        #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
        name: String,
    }

    #[test]
    fn test_internal_detail_requires_development_environment() {
        // un solo test para evitar carreras sobre la variable de entorno
        std::env::remove_var("ENVIRONMENT");
        let body = ErrorResponse::with_detail(
            "An unexpected error occurred".to_string(),
            "connection refused".to_string(),
        );
        assert!(body.message.is_none());

        std::env::set_var("ENVIRONMENT", "production");
        let body = ErrorResponse::with_detail(
            "An unexpected error occurred".to_string(),
            "connection refused".to_string(),
        );
        assert!(body.message.is_none());

        std::env::set_var("ENVIRONMENT", "development");
        let body = ErrorResponse::with_detail(
            "An unexpected error occurred".to_string(),
            "connection refused".to_string(),
        );
        assert_eq!(body.message.as_deref(), Some("connection refused"));
        std::env::remove_var("ENVIRONMENT");
    }

    #[test]
    fn test_validation_errors_use_first_field_message() {
        let dummy = Dummy {
            name: "x".to_string(),
        };
        let err: AppError = dummy.validate().unwrap_err().into();
        match err {
            AppError::Validation(msg) => {
                assert_eq!(msg, "Name must be at least 2 characters")
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
