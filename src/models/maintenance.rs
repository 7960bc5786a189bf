//! Modelos de mantenimiento
//!
//! Filas de `maintenance_states` y `maintenance_records`, y el formulario
//! de servicio completado.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::engine::{MaintenanceKind, MaintenanceState};
use crate::utils::errors::AppError;

/// Estado persistido de un elemento de mantenimiento
#[derive(Debug, Clone, FromRow)]
pub struct MaintenanceStateRow {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub maintenance_type: String,
    pub last_serviced_at: DateTime<Utc>,
    pub due_at_distance: i64,
    pub percentage: i64,
    pub updated_at: DateTime<Utc>,
}

impl MaintenanceStateRow {
    pub fn to_state(&self) -> MaintenanceState {
        MaintenanceState::new(
            MaintenanceKind::parse(&self.maintenance_type),
            self.last_serviced_at,
            self.due_at_distance,
            self.percentage.clamp(0, 100) as u8,
        )
    }
}

/// Entrada del historial de servicios
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub maintenance_type: String,
    pub distance_at_service: i64,
    pub serviced_at: DateTime<Utc>,
    pub cost: Option<f64>,
    pub notes: Option<String>,
}

impl MaintenanceRecord {
    pub fn new(
        vehicle_id: Uuid,
        maintenance_type: &MaintenanceKind,
        distance_at_service: i64,
        serviced_at: DateTime<Utc>,
        cost: Option<f64>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id,
            maintenance_type: maintenance_type.to_string(),
            distance_at_service,
            serviced_at,
            cost,
            notes: notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
        }
    }
}

/// Request para marcar un mantenimiento como realizado
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CompleteServiceRequest {
    /// Por defecto, el odómetro actual del vehículo
    #[validate(range(min = 0))]
    pub distance_at_service: Option<i64>,

    #[validate(range(min = 0.0))]
    pub cost: Option<f64>,

    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

impl CompleteServiceRequest {
    /// Body de la petición: vacío equivale a los valores por defecto,
    /// cualquier otro contenido debe ser JSON válido
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Self::default());
        }

        serde_json::from_slice(body)
            .map_err(|e| AppError::BadRequest(format!("Body de servicio inválido: {}", e)))
    }
}
