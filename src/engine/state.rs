//! Estado de mantenimiento por (vehículo, tipo) y sus transiciones
//!
//! `MaintenanceState` es un valor inmutable: cada transición devuelve un
//! estado nuevo y el repositorio reemplaza el registro guardado.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::intervals::{IntervalTable, MaintenanceKind};
use super::percentage::calculate_percentage;
use super::status::{MaintenanceStatus, NotificationPriority};
use super::EngineError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaintenanceState {
    maintenance_type: MaintenanceKind,
    last_serviced_at: DateTime<Utc>,
    due_at_distance: i64,
    percentage: u8,
}

impl MaintenanceState {
    /// Reconstruye un estado ya persistido
    pub fn new(
        maintenance_type: MaintenanceKind,
        last_serviced_at: DateTime<Utc>,
        due_at_distance: i64,
        percentage: u8,
    ) -> Self {
        Self {
            maintenance_type,
            last_serviced_at,
            due_at_distance,
            percentage: percentage.min(100),
        }
    }

    /// Estado inicial al registrar un vehículo: se considera recién servido
    pub fn initial(
        maintenance_type: MaintenanceKind,
        registered_at: DateTime<Utc>,
        current_distance: i64,
        intervals: &IntervalTable,
    ) -> Self {
        let interval = intervals.interval_for(&maintenance_type);
        Self {
            maintenance_type,
            last_serviced_at: registered_at,
            due_at_distance: current_distance.saturating_add(interval),
            percentage: 100,
        }
    }

    pub fn maintenance_type(&self) -> &MaintenanceKind {
        &self.maintenance_type
    }

    pub fn last_serviced_at(&self) -> DateTime<Utc> {
        self.last_serviced_at
    }

    pub fn due_at_distance(&self) -> i64 {
        self.due_at_distance
    }

    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    pub fn status(&self) -> MaintenanceStatus {
        MaintenanceStatus::from_percentage(self.percentage)
    }

    pub fn priority(&self) -> NotificationPriority {
        self.status().priority()
    }

    pub fn needs_notification(&self) -> bool {
        self.status().needs_notification()
    }

    /// Recalcula el porcentaje para una nueva lectura del odómetro
    pub fn apply_distance(
        &self,
        current_distance: i64,
        intervals: &IntervalTable,
    ) -> Result<Self, EngineError> {
        let interval = intervals.interval_for(&self.maintenance_type);
        let percentage = calculate_percentage(current_distance, self.due_at_distance, interval)?;

        Ok(Self {
            percentage,
            ..self.clone()
        })
    }

    /// Servicio completado: nuevo vencimiento y porcentaje al 100%
    pub fn complete_service(
        &self,
        distance_at_service: i64,
        serviced_at: DateTime<Utc>,
        intervals: &IntervalTable,
    ) -> Self {
        let interval = intervals.interval_for(&self.maintenance_type);
        Self {
            maintenance_type: self.maintenance_type.clone(),
            last_serviced_at: serviced_at,
            due_at_distance: distance_at_service.saturating_add(interval),
            percentage: 100,
        }
    }

    /// `true` si `next` bajó a un nivel peor que requiere notificación
    pub fn stepped_down_into_alert(&self, next: &Self) -> bool {
        next.status() < self.status() && next.needs_notification()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::intervals::MaintenanceType;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap()
    }

    fn oil_state(due: i64, percentage: u8) -> MaintenanceState {
        MaintenanceState::new(MaintenanceType::Oil.into(), at(1), due, percentage)
    }

    #[test]
    fn test_initial_state_is_full() {
        let table = IntervalTable::default();
        let state = MaintenanceState::initial(MaintenanceType::Brakes.into(), at(1), 12_000, &table);

        assert_eq!(state.due_at_distance(), 42_000);
        assert_eq!(state.percentage(), 100);
        assert_eq!(state.status(), MaintenanceStatus::Excellent);
    }

    #[test]
    fn test_apply_distance_oil_scenario() {
        let table = IntervalTable::default();
        let state = oil_state(5_000, 100);

        let next = state.apply_distance(4_000, &table).unwrap();

        assert_eq!(next.percentage(), 20);
        assert_eq!(next.status(), MaintenanceStatus::Critical);
        assert_eq!(next.priority(), NotificationPriority::High);
        assert!(next.needs_notification());
        // El original no cambia
        assert_eq!(state.percentage(), 100);
        assert_eq!(next.due_at_distance(), state.due_at_distance());
    }

    #[test]
    fn test_complete_service_resets() {
        let table = IntervalTable::default();
        let state = oil_state(5_000, 0);

        let next = state.complete_service(6_200, at(15), &table);

        assert_eq!(next.due_at_distance(), 6_200 + 5_000);
        assert_eq!(next.percentage(), 100);
        assert_eq!(next.last_serviced_at(), at(15));
        assert_eq!(next.maintenance_type(), state.maintenance_type());
    }

    #[test]
    fn test_retired_type_uses_default_interval() {
        let table = IntervalTable::default();
        let state = MaintenanceState::new(MaintenanceKind::parse("foo"), at(1), 0, 0);

        let next = state.complete_service(1_000, at(2), &table);

        assert_eq!(next.due_at_distance(), 11_000);
        assert_eq!(next.apply_distance(6_000, &table).unwrap().percentage(), 50);
    }

    #[test]
    fn test_lower_reading_is_clamped() {
        let table = IntervalTable::default();
        let state = oil_state(5_000, 20);

        let next = state.apply_distance(-10_000, &table).unwrap();

        assert_eq!(next.percentage(), 100);
    }

    #[test]
    fn test_stepped_down_into_alert() {
        let table = IntervalTable::default();
        let good = oil_state(5_000, 60);
        let upcoming = good.apply_distance(3_000, &table).unwrap();
        let still_upcoming = upcoming.apply_distance(3_100, &table).unwrap();
        let critical = upcoming.apply_distance(4_000, &table).unwrap();

        assert_eq!(upcoming.status(), MaintenanceStatus::Upcoming);
        assert!(good.stepped_down_into_alert(&upcoming));
        assert!(!upcoming.stepped_down_into_alert(&still_upcoming));
        assert!(upcoming.stepped_down_into_alert(&critical));
        assert!(!critical.stepped_down_into_alert(&good));
    }

    #[test]
    fn test_persisted_percentage_is_capped() {
        assert_eq!(oil_state(5_000, 250).percentage(), 100);
    }
}
