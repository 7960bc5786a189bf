use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::notification_controller::NotificationController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::notification_dto::{NotificationListResponse, UnreadCountResponse};
use crate::middleware::AuthenticatedUser;
use crate::models::notification::NotificationFilters;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_notification_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/unread-count", get(unread_count))
        .route("/read-all", put(mark_all_read))
        .route("/:id/read", put(mark_read))
        .route("/:id", delete(delete_notification))
}

async fn list_notifications(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(filters): Query<NotificationFilters>,
) -> Result<Json<NotificationListResponse>, AppError> {
    let controller = NotificationController::new(&state);
    let response = controller.list(user.user_id, filters).await?;
    Ok(Json(response))
}

async fn unread_count(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<UnreadCountResponse>, AppError> {
    let controller = NotificationController::new(&state);
    let response = controller.unread_count(user.user_id).await?;
    Ok(Json(response))
}

async fn mark_read(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = NotificationController::new(&state);
    controller.mark_read(id, user.user_id).await?;
    Ok(Json(ApiResponse::message("Notificación marcada como leída".to_string())))
}

async fn mark_all_read(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<u64>>, AppError> {
    let controller = NotificationController::new(&state);
    let updated = controller.mark_all_read(user.user_id).await?;
    Ok(Json(ApiResponse::success_with_message(
        updated,
        "Notificaciones marcadas como leídas".to_string(),
    )))
}

async fn delete_notification(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = NotificationController::new(&state);
    controller.delete(id, user.user_id).await?;
    Ok(Json(ApiResponse::message("Notificación eliminada".to_string())))
}
