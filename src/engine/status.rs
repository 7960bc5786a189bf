//! Clasificación del porcentaje en niveles de estado

use serde::{Deserialize, Serialize};
use std::fmt;

/// Por debajo de este porcentaje el estado es crítico
pub const CRITICAL_BELOW: u8 = 30;
/// Por debajo de este porcentaje el mantenimiento está próximo
pub const UPCOMING_BELOW: u8 = 50;
/// Por debajo de este porcentaje el estado es bueno; desde aquí, excelente
pub const GOOD_BELOW: u8 = 80;

/// Nivel de estado de un elemento de mantenimiento, de peor a mejor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaintenanceStatus {
    Critical,
    Upcoming,
    Good,
    Excellent,
}

impl MaintenanceStatus {
    pub const ALL: [Self; 4] = [Self::Critical, Self::Upcoming, Self::Good, Self::Excellent];

    pub fn from_percentage(percentage: u8) -> Self {
        if percentage < CRITICAL_BELOW {
            Self::Critical
        } else if percentage < UPCOMING_BELOW {
            Self::Upcoming
        } else if percentage < GOOD_BELOW {
            Self::Good
        } else {
            Self::Excellent
        }
    }

    pub fn priority(self) -> NotificationPriority {
        match self {
            Self::Critical => NotificationPriority::High,
            Self::Upcoming => NotificationPriority::Medium,
            Self::Good | Self::Excellent => NotificationPriority::Low,
        }
    }

    pub fn needs_notification(self) -> bool {
        matches!(self, Self::Critical | Self::Upcoming)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Upcoming => "upcoming",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }
}

impl fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prioridad de la notificación derivada del estado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    High,
    Medium,
    Low,
}

impl NotificationPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for NotificationPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(MaintenanceStatus::from_percentage(0), MaintenanceStatus::Critical);
        assert_eq!(MaintenanceStatus::from_percentage(29), MaintenanceStatus::Critical);
        assert_eq!(MaintenanceStatus::from_percentage(30), MaintenanceStatus::Upcoming);
        assert_eq!(MaintenanceStatus::from_percentage(49), MaintenanceStatus::Upcoming);
        assert_eq!(MaintenanceStatus::from_percentage(50), MaintenanceStatus::Good);
        assert_eq!(MaintenanceStatus::from_percentage(79), MaintenanceStatus::Good);
        assert_eq!(MaintenanceStatus::from_percentage(80), MaintenanceStatus::Excellent);
        assert_eq!(MaintenanceStatus::from_percentage(100), MaintenanceStatus::Excellent);
    }

    #[test]
    fn test_priorities() {
        assert_eq!(MaintenanceStatus::Critical.priority(), NotificationPriority::High);
        assert_eq!(MaintenanceStatus::Upcoming.priority(), NotificationPriority::Medium);
        assert_eq!(MaintenanceStatus::Good.priority(), NotificationPriority::Low);
        assert_eq!(MaintenanceStatus::Excellent.priority(), NotificationPriority::Low);
    }

    #[test]
    fn test_needs_notification() {
        let flagged: Vec<_> = MaintenanceStatus::ALL
            .iter()
            .filter(|s| s.needs_notification())
            .collect();
        assert_eq!(flagged, vec![&MaintenanceStatus::Critical, &MaintenanceStatus::Upcoming]);
    }

    #[test]
    fn test_status_order_is_worst_first() {
        assert!(MaintenanceStatus::Critical < MaintenanceStatus::Upcoming);
        assert!(MaintenanceStatus::Good < MaintenanceStatus::Excellent);
    }
}
