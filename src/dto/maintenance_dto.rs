use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::dto::vehicle_dto::VehicleResponse;
use crate::engine::{
    remaining_distance, IntervalTable, MaintenanceState, MaintenanceStatus, NotificationPriority,
};
use crate::models::maintenance::MaintenanceRecord;

// Estado de un elemento de mantenimiento para la API
#[derive(Debug, Serialize)]
pub struct MaintenanceItemResponse {
    pub maintenance_type: String,
    pub label: String,
    pub interval: i64,
    pub due_at_distance: i64,
    pub remaining_distance: i64,
    pub percentage: u8,
    pub status: MaintenanceStatus,
    pub priority: NotificationPriority,
    pub needs_notification: bool,
    pub last_serviced_at: DateTime<Utc>,
}

impl MaintenanceItemResponse {
    pub fn from_state(state: &MaintenanceState, current_distance: i64, intervals: &IntervalTable) -> Self {
        let kind = state.maintenance_type();
        Self {
            maintenance_type: kind.to_string(),
            label: kind.label().to_string(),
            interval: intervals.interval_for(kind),
            due_at_distance: state.due_at_distance(),
            remaining_distance: remaining_distance(current_distance, state.due_at_distance()),
            percentage: state.percentage(),
            status: state.status(),
            priority: state.priority(),
            needs_notification: state.needs_notification(),
            last_serviced_at: state.last_serviced_at(),
        }
    }
}

// Resumen por estado de un vehículo
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MaintenanceSummaryResponse {
    pub vehicle_id: Uuid,
    pub total: usize,
    pub critical: usize,
    pub upcoming: usize,
    pub good: usize,
    pub excellent: usize,
    pub needs_attention: usize,
    pub overall_percentage: Option<u8>,
}

// Response de un servicio completado
#[derive(Debug, Serialize)]
pub struct CompleteServiceResponse {
    pub record: MaintenanceRecord,
    pub item: MaintenanceItemResponse,
    pub current_distance: i64,
}

// Response de una actualización de odómetro
#[derive(Debug, Serialize)]
pub struct DistanceUpdateResponse {
    pub vehicle: VehicleResponse,
    pub maintenance: Vec<MaintenanceItemResponse>,
    pub notifications_created: usize,
}
