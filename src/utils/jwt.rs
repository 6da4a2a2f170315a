//! Emisión y verificación de tokens de sesión JWT
//!
//! Los tokens son autocontenidos (sin lista de revocación): el logout es
//! un descarte del lado del cliente.

use crate::models::user::UserRole;
use crate::utils::errors::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims del JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub email: String,
    pub role: UserRole,
    pub exp: usize,
    pub iat: usize,
}

/// Generar un token de sesión firmado para un usuario
pub fn generate_token(
    user_id: Uuid,
    email: &str,
    role: UserRole,
    secret: &str,
    expiration_days: i64,
) -> Result<String, AppError> {
    let now = Utc::now();
    let expires_at = now + Duration::days(expiration_days);

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| AppError::Internal(format!("Error generando JWT: {}", e)))
}

/// Decodificar y validar un token de sesión
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = generate_token(user_id, "dealer@example.com", UserRole::Dealer, SECRET, 7)
            .expect("token generation should succeed");

        let claims = verify_token(&token, SECRET).expect("token should verify");
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "dealer@example.com");
        assert_eq!(claims.role, UserRole::Dealer);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = generate_token(Uuid::new_v4(), "user@example.com", UserRole::User, SECRET, 7)
            .unwrap();

        assert!(verify_token(&token, "otro-secreto").is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(verify_token("not-a-jwt", SECRET).is_err());
    }
}
