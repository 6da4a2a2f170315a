use crate::controllers::VehicleController;
use crate::dto::{ApiResponse, Paginated, PaginationQuery};
use crate::middleware::auth::{auth_middleware, optional_auth_middleware, AuthenticatedUser};
use crate::models::vehicle::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleDetailResponse, VehicleFilters,
    VehicleResponse, VehicleSummary,
};
use crate::state::AppState;
use crate::utils::errors::AppError;
use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

pub fn create_vehicle_router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_vehicles))
        .route("/search", get(search_vehicles))
        .route("/featured", get(featured_vehicles))
        .route("/brands", get(list_brands));

    // el detalle personaliza is_favorited si hay sesión
    let detail = Router::new().route("/:id", get(get_vehicle)).layer(
        middleware::from_fn_with_state(state.clone(), optional_auth_middleware),
    );

    let protected = Router::new()
        .route("/", post(create_vehicle))
        .route("/:id", put(update_vehicle))
        .route("/:id", delete(delete_vehicle))
        .route("/dealer/listings", get(dealer_vehicles))
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    public.merge(detail).merge(protected)
}

#[derive(Deserialize)]
struct SearchParams {
    q: Option<String>,
    limit: Option<i64>,
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(filters): Query<VehicleFilters>,
) -> Result<Json<ApiResponse<Paginated<VehicleResponse>>>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.list(filters).await?))
}

async fn get_vehicle(
    State(state): State<AppState>,
    auth: Option<Extension<AuthenticatedUser>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VehicleDetailResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let caller = auth.as_ref().map(|Extension(user)| user);
    Ok(Json(controller.get_by_id(id, caller).await?))
}

async fn search_vehicles(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<Vec<VehicleSummary>>>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(
        controller
            .search(params.q.unwrap_or_default(), params.limit)
            .await?,
    ))
}

async fn featured_vehicles(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<VehicleResponse>>>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.featured().await?))
}

async fn list_brands(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<String>>>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.brands().await?))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.create(&auth, request).await?))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.update(&auth, id, request).await?))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.delete(&auth, id).await?))
}

async fn dealer_vehicles(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(pagination): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Paginated<VehicleResponse>>>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.dealer_vehicles(&auth, pagination).await?))
}
