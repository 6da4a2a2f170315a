//! Controller de reseñas
//!
//! Las reseñas entran sin aprobar y pasan por moderación de admin. Cada
//! cambio de aprobación (o borrado) recalcula el agregado del vehículo.

use crate::dto::{ApiResponse, Paginated, PaginationQuery};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::review::{CreateReviewRequest, Review, ReviewResponse};
use crate::repositories::review_repository::ReviewRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;
use validator::Validate;

const DEFAULT_MODERATION_LIMIT: i64 = 20;

pub struct ReviewController {
    repository: ReviewRepository,
    vehicles: VehicleRepository,
}

impl ReviewController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: ReviewRepository::new(state.pool.clone()),
            vehicles: VehicleRepository::new(state.pool.clone()),
        }
    }

    pub async fn create(
        &self,
        auth: &AuthenticatedUser,
        request: CreateReviewRequest,
    ) -> Result<ApiResponse<ReviewResponse>, AppError> {
        request.validate()?;

        self.vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if self
            .repository
            .exists_for(auth.user_id, request.vehicle_id)
            .await?
        {
            return Err(AppError::Conflict(
                "You have already reviewed this vehicle".to_string(),
            ));
        }

        let review = self.repository.create(auth.user_id, request).await?;
        log::info!("⭐ Reseña creada: {} (pendiente de moderación)", review.id);

        Ok(ApiResponse::success_with_message(
            review.into(),
            "Review submitted and pending approval".to_string(),
        ))
    }

    /// Reseñas del propio usuario, aprobadas o no
    pub async fn mine(
        &self,
        auth: &AuthenticatedUser,
    ) -> Result<ApiResponse<Vec<ReviewResponse>>, AppError> {
        let reviews = self.repository.list_for_user(auth.user_id).await?;

        Ok(ApiResponse::success(
            reviews.into_iter().map(ReviewResponse::from).collect(),
        ))
    }

    pub async fn delete_own(
        &self,
        auth: &AuthenticatedUser,
        id: Uuid,
    ) -> Result<ApiResponse<()>, AppError> {
        let review = self.find_review(id).await?;

        if review.user_id != auth.user_id && !auth.is_admin() {
            return Err(AppError::Forbidden(
                "You can only delete your own reviews".to_string(),
            ));
        }

        self.repository.delete(review.id).await?;
        // si estaba aprobada, el agregado del vehículo cambió
        self.repository
            .refresh_vehicle_aggregates(review.vehicle_id)
            .await?;

        Ok(ApiResponse::message_only(
            "Review deleted successfully".to_string(),
        ))
    }

    /// Cola de moderación (admin)
    pub async fn pending(
        &self,
        pagination: PaginationQuery,
    ) -> Result<ApiResponse<Paginated<ReviewResponse>>, AppError> {
        let (page, limit) = pagination.normalize(DEFAULT_MODERATION_LIMIT);

        let (rows, total) = self.repository.pending(page, limit).await?;
        let items = rows.into_iter().map(ReviewResponse::from).collect();

        Ok(ApiResponse::success(Paginated::new(items, page, limit, total)))
    }

    pub async fn moderate(
        &self,
        id: Uuid,
        approve: bool,
    ) -> Result<ApiResponse<ReviewResponse>, AppError> {
        let review = self.find_review(id).await?;
        let updated = self.repository.set_approved(review.id, approve).await?;

        self.repository
            .refresh_vehicle_aggregates(updated.vehicle_id)
            .await?;

        log::info!(
            "⭐ Reseña {} {}",
            updated.id,
            if approve { "aprobada" } else { "rechazada" }
        );

        let message = if approve {
            "Review approved"
        } else {
            "Review rejected"
        };

        Ok(ApiResponse::success_with_message(
            updated.into(),
            message.to_string(),
        ))
    }

    async fn find_review(&self, id: Uuid) -> Result<Review, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Review not found".to_string()))
    }
}
