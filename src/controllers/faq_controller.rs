//! Controller de FAQs
//!
//! El listado público suma una vista a cada FAQ devuelta; el conteo es
//! best-effort y nunca hace fallar la respuesta.

use crate::dto::ApiResponse;
use crate::models::faq::{CreateFaqRequest, FaqFilters, FaqResponse, UpdateFaqRequest};
use crate::repositories::faq_repository::FaqRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;
use validator::Validate;

pub struct FaqController {
    repository: FaqRepository,
}

impl FaqController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: FaqRepository::new(state.pool.clone()),
        }
    }

    pub async fn list(
        &self,
        filters: FaqFilters,
    ) -> Result<ApiResponse<Vec<FaqResponse>>, AppError> {
        let faqs = self.repository.list_active(filters.category).await?;

        let ids: Vec<Uuid> = faqs.iter().map(|f| f.id).collect();
        if !ids.is_empty() {
            if let Err(e) = self.repository.increment_views(&ids).await {
                log::warn!("⚠️ No se pudo actualizar view_count de FAQs: {}", e);
            }
        }

        Ok(ApiResponse::success(
            faqs.into_iter().map(FaqResponse::from).collect(),
        ))
    }

    pub async fn mark_helpful(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        let found = self.repository.increment_helpful(id).await?;

        if !found {
            return Err(AppError::NotFound("FAQ not found".to_string()));
        }

        Ok(ApiResponse::message_only(
            "Thanks for your feedback".to_string(),
        ))
    }

    pub async fn create(
        &self,
        request: CreateFaqRequest,
    ) -> Result<ApiResponse<FaqResponse>, AppError> {
        request.validate()?;

        let faq = self.repository.create(request).await?;
        log::info!("❓ FAQ creada: {}", faq.id);

        Ok(ApiResponse::success_with_message(
            faq.into(),
            "FAQ created successfully".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateFaqRequest,
    ) -> Result<ApiResponse<FaqResponse>, AppError> {
        request.validate()?;

        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("FAQ not found".to_string()))?;

        let faq = self.repository.update(id, request).await?;

        Ok(ApiResponse::success_with_message(
            faq.into(),
            "FAQ updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("FAQ not found".to_string()))?;

        self.repository.delete(id).await?;

        Ok(ApiResponse::message_only(
            "FAQ deleted successfully".to_string(),
        ))
    }
}
