use tracing::debug;
use uuid::Uuid;

use crate::dto::notification_dto::{NotificationListResponse, UnreadCountResponse};
use crate::models::notification::NotificationFilters;
use crate::repositories::notification_repository::NotificationRepository;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub struct NotificationController {
    repository: NotificationRepository,
}

impl NotificationController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: NotificationRepository::new(state.pool.clone()),
        }
    }

    pub async fn list(&self, user_id: Uuid, filters: NotificationFilters) -> Result<NotificationListResponse, AppError> {
        let unread_only = filters.unread_only.unwrap_or(false);
        let notifications = self.repository.find_by_user(user_id, unread_only).await?;
        let unread = self.repository.unread_count(user_id).await?;

        Ok(NotificationListResponse { notifications, unread })
    }

    pub async fn unread_count(&self, user_id: Uuid) -> Result<UnreadCountResponse, AppError> {
        let unread = self.repository.unread_count(user_id).await?;
        Ok(UnreadCountResponse { unread })
    }

    pub async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        if !self.repository.mark_read(id, user_id).await? {
            return Err(not_found_error("Notification", &id.to_string()));
        }
        Ok(())
    }

    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, AppError> {
        let updated = self.repository.mark_all_read(user_id).await?;
        debug!("📭 {} notificaciones marcadas como leídas", updated);
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id, user_id).await? {
            return Err(not_found_error("Notification", &id.to_string()));
        }
        Ok(())
    }
}
