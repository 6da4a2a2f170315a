//! Controller del catálogo de vehículos
//!
//! Listado público con filtros, detalle, búsqueda rápida y el CRUD de
//! dealers. Las reglas de propiedad (dealer dueño o admin) viven aquí.

use crate::dto::{ApiResponse, Paginated, PaginationQuery};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::vehicle::{
    CreateVehicleRequest, DealerContact, UpdateVehicleRequest, Vehicle, VehicleDetailResponse,
    VehicleFilters, VehicleResponse, VehicleSummary,
};
use crate::repositories::favorite_repository::FavoriteRepository;
use crate::repositories::review_repository::ReviewRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const DEFAULT_CATALOG_LIMIT: i64 = 12;
const DEFAULT_SEARCH_LIMIT: i64 = 10;
const FEATURED_LIMIT: i64 = 8;

pub struct VehicleController {
    repository: VehicleRepository,
    pool: PgPool,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: VehicleRepository::new(state.pool.clone()),
            pool: state.pool.clone(),
        }
    }

    /// Catálogo público: siempre status = active
    pub async fn list(
        &self,
        filters: VehicleFilters,
    ) -> Result<ApiResponse<Paginated<VehicleResponse>>, AppError> {
        let pagination = PaginationQuery {
            page: filters.page,
            limit: filters.limit,
        };
        let (page, limit) = pagination.normalize(DEFAULT_CATALOG_LIMIT);

        let (vehicles, total) = self.repository.list(&filters, page, limit, true).await?;
        let items = vehicles.into_iter().map(VehicleResponse::from).collect();

        Ok(ApiResponse::success(Paginated::new(items, page, limit, total)))
    }

    /// Detalle: dealer público, reseñas aprobadas y flag de favorito
    pub async fn get_by_id(
        &self,
        id: Uuid,
        caller: Option<&AuthenticatedUser>,
    ) -> Result<ApiResponse<VehicleDetailResponse>, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        let dealer = match vehicle.dealer_id {
            Some(dealer_id) => UserRepository::new(self.pool.clone())
                .find_by_id(dealer_id)
                .await?
                .map(|d| DealerContact {
                    id: d.id,
                    name: d.name,
                    phone: d.phone,
                    city: d.city,
                }),
            None => None,
        };

        let reviews = ReviewRepository::new(self.pool.clone())
            .approved_for_vehicle(id)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        let is_favorited = match caller {
            Some(user) => {
                FavoriteRepository::new(self.pool.clone())
                    .exists(user.user_id, id)
                    .await?
            }
            None => false,
        };

        Ok(ApiResponse::success(VehicleDetailResponse {
            vehicle: vehicle.into(),
            dealer,
            reviews,
            is_favorited,
        }))
    }

    /// Búsqueda rápida para el autocompletado
    pub async fn search(
        &self,
        query: String,
        limit: Option<i64>,
    ) -> Result<ApiResponse<Vec<VehicleSummary>>, AppError> {
        if query.trim().chars().count() < 2 {
            return Err(AppError::Validation(
                "Search query must be at least 2 characters".to_string(),
            ));
        }

        let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT).clamp(1, 50);
        let results = self.repository.search(&query, limit).await?;

        Ok(ApiResponse::success(results))
    }

    pub async fn featured(&self) -> Result<ApiResponse<Vec<VehicleResponse>>, AppError> {
        let vehicles = self.repository.featured(FEATURED_LIMIT).await?;
        Ok(ApiResponse::success(
            vehicles.into_iter().map(VehicleResponse::from).collect(),
        ))
    }

    pub async fn brands(&self) -> Result<ApiResponse<Vec<String>>, AppError> {
        Ok(ApiResponse::success(self.repository.brands().await?))
    }

    pub async fn create(
        &self,
        auth: &AuthenticatedUser,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        if !auth.is_dealer() && !auth.is_admin() {
            return Err(AppError::Forbidden(
                "Only dealers can create vehicle listings".to_string(),
            ));
        }

        request.validate()?;

        let vehicle = self.repository.create(auth.user_id, request).await?;
        log::info!("🏍️ Vehículo creado: {} ({})", vehicle.name, vehicle.id);

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehicle created successfully".to_string(),
        ))
    }

    pub async fn update(
        &self,
        auth: &AuthenticatedUser,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let vehicle = self.find_owned(auth, id).await?;
        let updated = self.repository.update(vehicle.id, request).await?;

        Ok(ApiResponse::success_with_message(
            updated.into(),
            "Vehicle updated successfully".to_string(),
        ))
    }

    /// Borrado físico, solo sin referencias; con reservas o favoritos el
    /// dealer debe pasar el vehículo a `discontinued`.
    pub async fn delete(
        &self,
        auth: &AuthenticatedUser,
        id: Uuid,
    ) -> Result<ApiResponse<()>, AppError> {
        let vehicle = self.find_owned(auth, id).await?;

        if self.repository.booking_reference_count(vehicle.id).await? > 0
            || self.repository.favorite_reference_count(vehicle.id).await? > 0
        {
            return Err(AppError::Conflict(
                "Vehicle has bookings or favorites and cannot be deleted; set its status to 'discontinued' instead".to_string(),
            ));
        }

        self.repository.delete(vehicle.id).await?;
        log::info!("🗑️ Vehículo eliminado: {}", vehicle.id);

        Ok(ApiResponse::message_only(
            "Vehicle deleted successfully".to_string(),
        ))
    }

    /// Listados del propio dealer (todas las publicaciones, no solo activas)
    pub async fn dealer_vehicles(
        &self,
        auth: &AuthenticatedUser,
        pagination: PaginationQuery,
    ) -> Result<ApiResponse<Paginated<VehicleResponse>>, AppError> {
        if !auth.is_dealer() && !auth.is_admin() {
            return Err(AppError::Forbidden("Dealer access required".to_string()));
        }

        let (page, limit) = pagination.normalize(DEFAULT_CATALOG_LIMIT);
        let (vehicles, total) = self
            .repository
            .list_by_dealer(auth.user_id, page, limit)
            .await?;
        let items = vehicles.into_iter().map(VehicleResponse::from).collect();

        Ok(ApiResponse::success(Paginated::new(items, page, limit, total)))
    }

    /// Cargar el vehículo y verificar propiedad (dealer dueño o admin)
    async fn find_owned(&self, auth: &AuthenticatedUser, id: Uuid) -> Result<Vehicle, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        if !auth.is_admin() && vehicle.dealer_id != Some(auth.user_id) {
            return Err(AppError::Forbidden(
                "You do not have permission to manage this vehicle".to_string(),
            ));
        }

        Ok(vehicle)
    }
}
