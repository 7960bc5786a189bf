use crate::models::notification::Notification;
use crate::utils::errors::AppError;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

pub struct NotificationRepository {
    pool: SqlitePool,
}

impl NotificationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(conn: &mut SqliteConnection, notification: &Notification) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO notifications (id, user_id, vehicle_id, maintenance_type, priority, percentage, message, is_read, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(notification.id)
        .bind(notification.user_id)
        .bind(notification.vehicle_id)
        .bind(&notification.maintenance_type)
        .bind(&notification.priority)
        .bind(notification.percentage)
        .bind(&notification.message)
        .bind(notification.is_read)
        .bind(notification.created_at)
        .execute(conn)
        .await
        .map_err(|e| AppError::Database(format!("Error creating notification: {}", e)))?;

        Ok(())
    }

    /// Prioridad alta primero, luego las más recientes
    pub async fn find_by_user(&self, user_id: Uuid, unread_only: bool) -> Result<Vec<Notification>, AppError> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
            WHERE user_id = ? AND (? = 0 OR is_read = 0)
            ORDER BY CASE priority WHEN 'high' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END,
                     created_at DESC, rowid DESC
            "#
        )
        .bind(user_id)
        .bind(unread_only)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing notifications: {}", e)))?;

        Ok(notifications)
    }

    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notifications WHERE user_id = ? AND is_read = 0"
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error counting notifications: {}", e)))?;

        Ok(result.0)
    }

    pub async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error updating notification: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE notifications SET is_read = 1 WHERE user_id = ? AND is_read = 0")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error updating notifications: {}", e)))?;

        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting notification: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
