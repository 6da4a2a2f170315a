//! Controller de autenticación
//!
//! Registro, login y perfil. El login devuelve exactamente el mismo error
//! tanto si el email no existe como si la contraseña no verifica, para no
//! filtrar cuál de los dos checks falló.

use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::{
    AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest, UserResponse, UserRole,
};
use crate::repositories::user_repository::UserRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt;
use bcrypt::{hash, verify, DEFAULT_COST};
use validator::Validate;

pub struct AuthController {
    repository: UserRepository,
    jwt_secret: String,
    jwt_expiration_days: i64,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: UserRepository::new(state.pool.clone()),
            jwt_secret: state.config.jwt_secret.clone(),
            jwt_expiration_days: state.config.jwt_expiration_days,
        }
    }

    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<ApiResponse<AuthResponse>, AppError> {
        request.validate()?;

        let role = request.role.unwrap_or(UserRole::User);
        if role == UserRole::Admin {
            return Err(AppError::Validation(
                "Role must be either 'user' or 'dealer'".to_string(),
            ));
        }

        if self.repository.email_exists(&request.email).await? {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Error hashing password: {}", e)))?;

        let user = self
            .repository
            .create(
                request.name,
                request.email,
                password_hash,
                request.phone,
                role,
                false,
            )
            .await?;

        log::info!("👤 Usuario registrado: {} ({})", user.email, role.as_str());

        let token = jwt::generate_token(
            user.id,
            &user.email,
            user.role,
            &self.jwt_secret,
            self.jwt_expiration_days,
        )?;

        Ok(ApiResponse::success_with_message(
            AuthResponse {
                token,
                user: user.into(),
            },
            "Registration successful".to_string(),
        ))
    }

    pub async fn login(
        &self,
        request: LoginRequest,
    ) -> Result<ApiResponse<AuthResponse>, AppError> {
        request.validate()?;

        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        let password_ok = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Error verifying password: {}", e)))?;

        if !password_ok {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        self.repository.touch_last_login(user.id).await?;

        let token = jwt::generate_token(
            user.id,
            &user.email,
            user.role,
            &self.jwt_secret,
            self.jwt_expiration_days,
        )?;

        Ok(ApiResponse::success_with_message(
            AuthResponse {
                token,
                user: user.into(),
            },
            "Login successful".to_string(),
        ))
    }

    pub async fn current_user(
        &self,
        auth: &AuthenticatedUser,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        let user = self
            .repository
            .find_by_id(auth.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(ApiResponse::success(user.into()))
    }

    pub async fn update_profile(
        &self,
        auth: &AuthenticatedUser,
        request: UpdateProfileRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        request.validate()?;

        let user = self
            .repository
            .update_profile(
                auth.user_id,
                request.name,
                request.phone,
                request.address,
                request.city,
                request.state,
                request.pincode,
                request.profile_picture,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            user.into(),
            "Profile updated successfully".to_string(),
        ))
    }
}
