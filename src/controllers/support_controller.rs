//! Controller de soporte
//!
//! La creación y el seguimiento por código son públicos; el listado y la
//! respuesta son de admin.

use crate::dto::{ApiResponse, Paginated, PaginationQuery};
use crate::models::support::{
    generate_ticket_code, CreateTicketRequest, RespondTicketRequest, TicketFilters,
    TicketResponse, TicketStatus,
};
use crate::repositories::support_repository::SupportRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;
use validator::Validate;

const DEFAULT_TICKETS_LIMIT: i64 = 20;

pub struct SupportController {
    repository: SupportRepository,
}

impl SupportController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: SupportRepository::new(state.pool.clone()),
        }
    }

    pub async fn create(
        &self,
        request: CreateTicketRequest,
    ) -> Result<ApiResponse<TicketResponse>, AppError> {
        request.validate()?;

        let ticket = self
            .repository
            .create(generate_ticket_code(), request)
            .await?;

        log::info!("🎫 Ticket creado: {}", ticket.ticket_code);

        Ok(ApiResponse::success_with_message(
            ticket.into(),
            "Support ticket created successfully".to_string(),
        ))
    }

    /// Seguimiento público por código
    pub async fn get_by_code(&self, code: &str) -> Result<ApiResponse<TicketResponse>, AppError> {
        let ticket = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))?;

        Ok(ApiResponse::success(ticket.into()))
    }

    /// Listado con filtros (admin)
    pub async fn list(
        &self,
        filters: TicketFilters,
    ) -> Result<ApiResponse<Paginated<TicketResponse>>, AppError> {
        let pagination = PaginationQuery {
            page: filters.page,
            limit: filters.limit,
        };
        let (page, limit) = pagination.normalize(DEFAULT_TICKETS_LIMIT);

        let (tickets, total) = self.repository.list(&filters, page, limit).await?;
        let items = tickets.into_iter().map(TicketResponse::from).collect();

        Ok(ApiResponse::success(Paginated::new(items, page, limit, total)))
    }

    /// Responder un ticket (admin); sin estado destino queda en in_progress
    pub async fn respond(
        &self,
        id: Uuid,
        request: RespondTicketRequest,
    ) -> Result<ApiResponse<TicketResponse>, AppError> {
        request.validate()?;

        let ticket = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ticket not found".to_string()))?;

        let status = match request.status.as_deref() {
            Some(raw) => raw.parse::<TicketStatus>().map_err(|_| {
                AppError::Validation(format!("Invalid ticket status '{}'", raw))
            })?,
            None => TicketStatus::InProgress,
        };

        let updated = self
            .repository
            .respond(ticket.id, request.response, status)
            .await?;

        log::info!("🎫 Ticket {} -> {:?}", updated.ticket_code, updated.status);

        Ok(ApiResponse::success_with_message(
            updated.into(),
            "Ticket response saved".to_string(),
        ))
    }
}
