use serde::Serialize;

use crate::models::notification::Notification;

// Listado de notificaciones con el contador de no leídas
#[derive(Debug, Serialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<Notification>,
    pub unread: i64,
}

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub unread: i64,
}
