//! Controller de administración
//!
//! Dashboard y gestión de usuarios y vehículos. Todas las rutas que llegan
//! aquí ya pasaron por el middleware de solo-admin.

use crate::dto::{ApiResponse, Paginated, PaginationQuery};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::admin::DashboardStats;
use crate::models::booking::BookingStatus;
use crate::models::user::{AdminCreateUserRequest, UserFilters, UserResponse, UserRole};
use crate::models::vehicle::{VehicleFilters, VehicleResponse, VehicleStatus};
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::review_repository::ReviewRepository;
use crate::repositories::support_repository::SupportRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use bcrypt::{hash, DEFAULT_COST};
use uuid::Uuid;
use validator::Validate;

const DEFAULT_ADMIN_LIMIT: i64 = 20;

pub struct AdminController {
    users: UserRepository,
    vehicles: VehicleRepository,
    bookings: BookingRepository,
    reviews: ReviewRepository,
    tickets: SupportRepository,
}

impl AdminController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: UserRepository::new(state.pool.clone()),
            vehicles: VehicleRepository::new(state.pool.clone()),
            bookings: BookingRepository::new(state.pool.clone()),
            reviews: ReviewRepository::new(state.pool.clone()),
            tickets: SupportRepository::new(state.pool.clone()),
        }
    }

    pub async fn dashboard(&self) -> Result<ApiResponse<DashboardStats>, AppError> {
        let stats = DashboardStats {
            total_users: self.users.count_by_role(UserRole::User).await?,
            total_dealers: self.users.count_by_role(UserRole::Dealer).await?,
            total_vehicles: self.vehicles.count_all().await?,
            active_vehicles: self.vehicles.count_by_status(VehicleStatus::Active).await?,
            total_bookings: self.bookings.count_all().await?,
            pending_bookings: self.bookings.count_by_status(BookingStatus::Pending).await?,
            confirmed_bookings: self
                .bookings
                .count_by_status(BookingStatus::Confirmed)
                .await?,
            completed_bookings: self
                .bookings
                .count_by_status(BookingStatus::Completed)
                .await?,
            cancelled_bookings: self
                .bookings
                .count_by_status(BookingStatus::Cancelled)
                .await?,
            open_tickets: self.tickets.count_open().await?,
            pending_reviews: self.reviews.count_pending().await?,
        };

        Ok(ApiResponse::success(stats))
    }

    pub async fn list_users(
        &self,
        filters: UserFilters,
    ) -> Result<ApiResponse<Paginated<UserResponse>>, AppError> {
        let pagination = PaginationQuery {
            page: filters.page,
            limit: filters.limit,
        };
        let (page, limit) = pagination.normalize(DEFAULT_ADMIN_LIMIT);

        let (users, total) = self.users.list(&filters, page, limit).await?;
        let items = users.into_iter().map(UserResponse::from).collect();

        Ok(ApiResponse::success(Paginated::new(items, page, limit, total)))
    }

    /// Alta de usuario por admin: nace verificado y con cualquier rol
    pub async fn create_user(
        &self,
        request: AdminCreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        request.validate()?;

        if self.users.email_exists(&request.email).await? {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Error hashing password: {}", e)))?;

        let user = self
            .users
            .create(
                request.name,
                request.email,
                password_hash,
                request.phone,
                request.role,
                true,
            )
            .await?;

        log::info!("👤 Usuario creado por admin: {} ({})", user.email, user.role.as_str());

        Ok(ApiResponse::success_with_message(
            user.into(),
            "User created successfully".to_string(),
        ))
    }

    pub async fn set_user_active(
        &self,
        auth: &AuthenticatedUser,
        id: Uuid,
        is_active: bool,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        // un admin no puede desactivarse a sí mismo
        if !is_active && id == auth.user_id {
            return Err(AppError::Validation(
                "You cannot deactivate your own account".to_string(),
            ));
        }

        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let user = self.users.set_active(id, is_active).await?;
        log::info!(
            "👤 Usuario {} {}",
            user.email,
            if is_active { "activado" } else { "desactivado" }
        );

        Ok(ApiResponse::success_with_message(
            user.into(),
            if is_active {
                "User activated".to_string()
            } else {
                "User deactivated".to_string()
            },
        ))
    }

    /// Listado de vehículos sin el filtro forzado de status = active
    pub async fn list_vehicles(
        &self,
        filters: VehicleFilters,
    ) -> Result<ApiResponse<Paginated<VehicleResponse>>, AppError> {
        let pagination = PaginationQuery {
            page: filters.page,
            limit: filters.limit,
        };
        let (page, limit) = pagination.normalize(DEFAULT_ADMIN_LIMIT);

        let (vehicles, total) = self.vehicles.list(&filters, page, limit, false).await?;
        let items = vehicles.into_iter().map(VehicleResponse::from).collect();

        Ok(ApiResponse::success(Paginated::new(items, page, limit, total)))
    }

    pub async fn set_vehicle_featured(
        &self,
        id: Uuid,
        is_featured: bool,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        self.vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        let vehicle = self.vehicles.set_featured(id, is_featured).await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            if is_featured {
                "Vehicle marked as featured".to_string()
            } else {
                "Vehicle removed from featured".to_string()
            },
        ))
    }

    pub async fn set_vehicle_status(
        &self,
        id: Uuid,
        status: VehicleStatus,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        self.vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        let vehicle = self.vehicles.set_status(id, status).await?;
        log::info!("🏍️ Vehículo {} -> {:?}", vehicle.id, vehicle.status);

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehicle status updated".to_string(),
        ))
    }
}
