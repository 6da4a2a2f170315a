//! Middleware de autenticación JWT
//!
//! Extrae el bearer token, lo valida y construye el contexto autenticado
//! que se inyecta explícitamente en los handlers. Nunca hay estado
//! ambiental: los handlers reciben `AuthenticatedUser` por Extension.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};
use uuid::Uuid;

use crate::{
    models::user::UserRole,
    state::AppState,
    utils::{errors::AppError, jwt},
};

/// Contexto autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_dealer(&self) -> bool {
        self.role == UserRole::Dealer
    }
}

/// Extraer el bearer token del header Authorization
fn extract_bearer(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth| auth.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
}

/// Resolver un token a un usuario activo
async fn resolve_user(state: &AppState, token: &str) -> Result<AuthenticatedUser, AppError> {
    let claims = jwt::verify_token(token, &state.config.jwt_secret)?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

    // Verificar que el usuario sigue existiendo y activo
    let row: Option<(Uuid, String, UserRole, bool)> = sqlx::query_as(
        "SELECT id, email, role, is_active FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(&state.pool)
    .await?;

    let (id, email, role, is_active) =
        row.ok_or_else(|| AppError::Unauthorized("Invalid or expired token".to_string()))?;

    if !is_active {
        return Err(AppError::Unauthorized("Account is deactivated".to_string()));
    }

    Ok(AuthenticatedUser {
        user_id: id,
        email,
        role,
    })
}

/// Middleware de autenticación obligatoria
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer(&request)
        .ok_or_else(|| AppError::Unauthorized("Authorization token required".to_string()))?
        .to_string();

    let user = resolve_user(&state, &token).await?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Middleware opcional (rutas públicas que personalizan si hay sesión,
/// como el flag de favorito en el detalle del vehículo)
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(token) = extract_bearer(&request).map(|t| t.to_string()) {
        if let Ok(user) = resolve_user(&state, &token).await {
            request.extensions_mut().insert(user);
        }
    }

    Ok(next.run(request).await)
}

/// Middleware para rutas exclusivas de admin
///
/// Corta con 403 antes de que el handler ejecute cualquier query.
pub async fn admin_only_middleware(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !user.is_admin() {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    Ok(next.run(request).await)
}
