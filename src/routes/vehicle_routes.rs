use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::maintenance_dto::{
    CompleteServiceResponse, DistanceUpdateResponse, MaintenanceItemResponse, MaintenanceSummaryResponse,
};
use crate::dto::vehicle_dto::VehicleResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::maintenance::{CompleteServiceRequest, MaintenanceRecord};
use crate::models::vehicle::{CreateVehicleRequest, UpdateDistanceRequest, UpdateVehicleRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle).get(list_vehicles))
        .route("/:id", get(get_vehicle).put(update_vehicle).delete(delete_vehicle))
        .route("/:id/distance", put(update_distance))
        .route("/:id/maintenance", get(list_maintenance))
        .route("/:id/maintenance/summary", get(maintenance_summary))
        .route("/:id/maintenance/history", get(maintenance_history))
        .route("/:id/maintenance/:maintenance_type/complete", post(complete_maintenance))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleResponse>>), AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.create(user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.get_by_id(id, user.user_id).await?;
    Ok(Json(response))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.list(user.user_id).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.update(id, user.user_id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = VehicleController::new(&state);
    controller.delete(id, user.user_id).await?;
    Ok(Json(ApiResponse::message("Vehículo eliminado exitosamente".to_string())))
}

async fn update_distance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDistanceRequest>,
) -> Result<Json<DistanceUpdateResponse>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.update_distance(id, user.user_id, request).await?;
    Ok(Json(response))
}

async fn list_maintenance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<MaintenanceItemResponse>>, AppError> {
    let controller = MaintenanceController::new(&state);
    let response = controller.list(id, user.user_id).await?;
    Ok(Json(response))
}

async fn maintenance_summary(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<MaintenanceSummaryResponse>, AppError> {
    let controller = MaintenanceController::new(&state);
    let response = controller.summary(id, user.user_id).await?;
    Ok(Json(response))
}

async fn maintenance_history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<MaintenanceRecord>>, AppError> {
    let controller = MaintenanceController::new(&state);
    let response = controller.history(id, user.user_id).await?;
    Ok(Json(response))
}

async fn complete_maintenance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((id, maintenance_type)): Path<(Uuid, String)>,
    body: Bytes,
) -> Result<Json<CompleteServiceResponse>, AppError> {
    // Sin body se usa el odómetro actual
    let request = CompleteServiceRequest::from_body(&body)?;
    let controller = MaintenanceController::new(&state);
    let response = controller.complete(id, user.user_id, &maintenance_type, request).await?;
    Ok(Json(response))
}
