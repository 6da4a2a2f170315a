//! Controller de favoritos

use crate::dto::{ApiResponse, Paginated, PaginationQuery};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::favorite::{AddFavoriteRequest, FavoriteResponse, FavoriteStatusResponse};
use crate::repositories::favorite_repository::FavoriteRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

const DEFAULT_FAVORITES_LIMIT: i64 = 20;

pub struct FavoriteController {
    repository: FavoriteRepository,
    vehicles: VehicleRepository,
}

impl FavoriteController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: FavoriteRepository::new(state.pool.clone()),
            vehicles: VehicleRepository::new(state.pool.clone()),
        }
    }

    pub async fn add(
        &self,
        auth: &AuthenticatedUser,
        request: AddFavoriteRequest,
    ) -> Result<ApiResponse<FavoriteStatusResponse>, AppError> {
        self.vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        self.repository
            .create(auth.user_id, request.vehicle_id)
            .await?;

        Ok(ApiResponse::success_with_message(
            FavoriteStatusResponse { is_favorited: true },
            "Vehicle added to favorites".to_string(),
        ))
    }

    pub async fn remove(
        &self,
        auth: &AuthenticatedUser,
        vehicle_id: Uuid,
    ) -> Result<ApiResponse<FavoriteStatusResponse>, AppError> {
        let removed = self.repository.delete(auth.user_id, vehicle_id).await?;

        if !removed {
            return Err(AppError::NotFound("Favorite not found".to_string()));
        }

        Ok(ApiResponse::success_with_message(
            FavoriteStatusResponse {
                is_favorited: false,
            },
            "Vehicle removed from favorites".to_string(),
        ))
    }

    pub async fn check(
        &self,
        auth: &AuthenticatedUser,
        vehicle_id: Uuid,
    ) -> Result<ApiResponse<FavoriteStatusResponse>, AppError> {
        let is_favorited = self.repository.exists(auth.user_id, vehicle_id).await?;

        Ok(ApiResponse::success(FavoriteStatusResponse {
            is_favorited,
        }))
    }

    pub async fn list(
        &self,
        auth: &AuthenticatedUser,
        pagination: PaginationQuery,
    ) -> Result<ApiResponse<Paginated<FavoriteResponse>>, AppError> {
        let (page, limit) = pagination.normalize(DEFAULT_FAVORITES_LIMIT);

        let (rows, total) = self
            .repository
            .list_for_user(auth.user_id, page, limit)
            .await?;
        let items = rows.into_iter().map(FavoriteResponse::from).collect();

        Ok(ApiResponse::success(Paginated::new(items, page, limit, total)))
    }
}
