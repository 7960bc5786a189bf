//! Motor de estado de mantenimiento
//!
//! Traduce lecturas de odómetro e intervalos de servicio en un porcentaje de
//! vida restante (0–100) por elemento de mantenimiento, lo clasifica en
//! niveles de estado y decide cuándo hace falta una notificación.
//!
//! Todo el módulo es puro: no hay I/O ni estado compartido. La persistencia
//! de los valores calculados pertenece a los repositorios.

pub mod intervals;
pub mod percentage;
pub mod state;
pub mod status;

use thiserror::Error;

pub use intervals::{IntervalTable, MaintenanceKind, MaintenanceType, DEFAULT_INTERVAL};
pub use percentage::{calculate_percentage, remaining_distance};
pub use state::MaintenanceState;
pub use status::{MaintenanceStatus, NotificationPriority};

/// Errores del motor de mantenimiento
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Un intervalo cero o negativo indica configuración corrupta
    #[error("Invalid maintenance interval: {0} (must be greater than zero)")]
    InvalidInterval(i64),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidIntervalConfig { key: String, value: String },
}
