//! Modelo de Notification

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::engine::{MaintenanceKind, NotificationPriority};

/// Notification - mapea exactamente a la tabla notifications
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub maintenance_type: String,
    pub priority: String,
    pub percentage: i64,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        user_id: Uuid,
        vehicle_id: Uuid,
        maintenance_type: &MaintenanceKind,
        priority: NotificationPriority,
        percentage: u8,
        message: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            vehicle_id,
            maintenance_type: maintenance_type.to_string(),
            priority: priority.as_str().to_string(),
            percentage: i64::from(percentage),
            message,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}

/// Filtros para el listado de notificaciones
#[derive(Debug, Default, Deserialize)]
pub struct NotificationFilters {
    pub unread_only: Option<bool>,
}
