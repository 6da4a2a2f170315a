//! Controller de reservas
//!
//! Implementa la máquina de estados y las reglas de acceso: el creador
//! cancela, el dealer dueño del vehículo (o un admin) avanza el estado,
//! y solo esos tres perfiles pueden leer una reserva.

use crate::dto::{ApiResponse, Paginated, PaginationQuery};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::booking::{
    Booking, BookingFilters, BookingResponse, BookingStatus, CreateBookingRequest,
    UpdateBookingStatusRequest,
};
use crate::repositories::booking_repository::{BookingRepository, BookingScope};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;
use validator::Validate;

const DEFAULT_BOOKINGS_LIMIT: i64 = 10;

pub struct BookingController {
    repository: BookingRepository,
    vehicles: VehicleRepository,
}

impl BookingController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: BookingRepository::new(state.pool.clone()),
            vehicles: VehicleRepository::new(state.pool.clone()),
        }
    }

    pub async fn create(
        &self,
        auth: &AuthenticatedUser,
        request: CreateBookingRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        request.validate()?;

        self.vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        // check amistoso; el índice único parcial cubre la carrera
        if self
            .repository
            .has_active_booking(auth.user_id, request.vehicle_id, request.preferred_date)
            .await?
        {
            return Err(AppError::Conflict(
                "You already have an active booking for this vehicle on this date".to_string(),
            ));
        }

        let booking = self.repository.create(auth.user_id, request).await?;
        log::info!("📅 Reserva creada: {} -> {}", booking.id, booking.vehicle_id);

        Ok(ApiResponse::success_with_message(
            booking.into(),
            "Booking created successfully".to_string(),
        ))
    }

    pub async fn get_by_id(
        &self,
        auth: &AuthenticatedUser,
        id: Uuid,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        let booking = self.find_booking(id).await?;

        if booking.user_id != auth.user_id && !auth.is_admin() {
            // queda el dealer dueño del vehículo
            if !self.owns_vehicle(auth, booking.vehicle_id).await? {
                return Err(AppError::Forbidden(
                    "You do not have permission to view this booking".to_string(),
                ));
            }
        }

        Ok(ApiResponse::success(booking.into()))
    }

    /// Avance de estado por el dealer dueño o un admin
    pub async fn update_status(
        &self,
        auth: &AuthenticatedUser,
        id: Uuid,
        request: UpdateBookingStatusRequest,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        let booking = self.find_booking(id).await?;

        if !auth.is_admin() && !self.owns_vehicle(auth, booking.vehicle_id).await? {
            return Err(AppError::Forbidden(
                "You do not have permission to update this booking".to_string(),
            ));
        }

        let next: BookingStatus = request.status.parse().map_err(|_| {
            AppError::Validation(format!("Invalid booking status '{}'", request.status))
        })?;

        if !booking.status.can_transition_to(next) {
            return Err(AppError::Conflict(
                "Booking status cannot change from its current state".to_string(),
            ));
        }

        let updated = self
            .repository
            .update_status(
                booking.id,
                next,
                request.dealer_notes,
                request.confirmed_date,
                request.confirmed_time,
            )
            .await?;

        log::info!("📅 Reserva {} -> {:?}", updated.id, updated.status);

        Ok(ApiResponse::success_with_message(
            updated.into(),
            "Booking status updated".to_string(),
        ))
    }

    /// Cancelación por el propio creador, solo desde estados no terminales
    pub async fn cancel(
        &self,
        auth: &AuthenticatedUser,
        id: Uuid,
    ) -> Result<ApiResponse<BookingResponse>, AppError> {
        let booking = self.find_booking(id).await?;

        if booking.user_id != auth.user_id {
            return Err(AppError::Forbidden(
                "Only the booking owner can cancel it".to_string(),
            ));
        }

        if booking.status.is_terminal() {
            return Err(AppError::Validation("Cannot cancel this booking".to_string()));
        }

        let cancelled = self
            .repository
            .update_status(booking.id, BookingStatus::Cancelled, None, None, None)
            .await?;

        Ok(ApiResponse::success_with_message(
            cancelled.into(),
            "Booking cancelled".to_string(),
        ))
    }

    /// Reservas del propio usuario
    pub async fn list_for_user(
        &self,
        auth: &AuthenticatedUser,
        filters: BookingFilters,
    ) -> Result<ApiResponse<Paginated<BookingResponse>>, AppError> {
        self.list(BookingScope::User(auth.user_id), filters).await
    }

    /// Reservas sobre los vehículos del dealer
    pub async fn list_for_dealer(
        &self,
        auth: &AuthenticatedUser,
        filters: BookingFilters,
    ) -> Result<ApiResponse<Paginated<BookingResponse>>, AppError> {
        if !auth.is_dealer() && !auth.is_admin() {
            return Err(AppError::Forbidden("Dealer access required".to_string()));
        }

        self.list(BookingScope::Dealer(auth.user_id), filters).await
    }

    /// Todas las reservas (rutas de admin)
    pub async fn list_all(
        &self,
        filters: BookingFilters,
    ) -> Result<ApiResponse<Paginated<BookingResponse>>, AppError> {
        self.list(BookingScope::All, filters).await
    }

    async fn list(
        &self,
        scope: BookingScope,
        filters: BookingFilters,
    ) -> Result<ApiResponse<Paginated<BookingResponse>>, AppError> {
        let pagination = PaginationQuery {
            page: filters.page,
            limit: filters.limit,
        };
        let (page, limit) = pagination.normalize(DEFAULT_BOOKINGS_LIMIT);

        let (rows, total) = self.repository.list(scope, &filters, page, limit).await?;
        let items = rows.into_iter().map(BookingResponse::from).collect();

        Ok(ApiResponse::success(Paginated::new(items, page, limit, total)))
    }

    async fn find_booking(&self, id: Uuid) -> Result<Booking, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))
    }

    async fn owns_vehicle(
        &self,
        auth: &AuthenticatedUser,
        vehicle_id: Uuid,
    ) -> Result<bool, AppError> {
        let vehicle = self.vehicles.find_by_id(vehicle_id).await?;
        Ok(vehicle.and_then(|v| v.dealer_id) == Some(auth.user_id))
    }
}
