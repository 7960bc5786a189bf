//! Servicio de mantenimiento
//!
//! Une el motor puro (`crate::engine`) con los repositorios: crea los
//! estados al registrar un vehículo, los recalcula cuando cambia el
//! odómetro, aplica servicios completados y genera las notificaciones.
//! Cada operación de escritura corre en una sola transacción, lo que
//! serializa las actualizaciones de un mismo vehículo.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::dto::maintenance_dto::{MaintenanceItemResponse, MaintenanceSummaryResponse};
use crate::engine::{IntervalTable, MaintenanceKind, MaintenanceState, MaintenanceStatus, MaintenanceType};
use crate::models::maintenance::{CompleteServiceRequest, MaintenanceRecord};
use crate::models::notification::Notification;
use crate::models::vehicle::Vehicle;
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::notification_repository::NotificationRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

/// Resultado de recalcular los estados de un vehículo
#[derive(Debug)]
pub struct RefreshOutcome {
    pub vehicle: Vehicle,
    pub states: Vec<MaintenanceState>,
    pub notifications: Vec<Notification>,
}

/// Resultado de un servicio completado
#[derive(Debug)]
pub struct ServiceOutcome {
    pub vehicle: Vehicle,
    pub state: MaintenanceState,
    pub record: MaintenanceRecord,
    pub notifications: Vec<Notification>,
}

pub struct MaintenanceService {
    pool: SqlitePool,
    intervals: Arc<IntervalTable>,
}

impl MaintenanceService {
    pub fn new(pool: SqlitePool, intervals: Arc<IntervalTable>) -> Self {
        Self { pool, intervals }
    }

    pub fn intervals(&self) -> &IntervalTable {
        &self.intervals
    }

    /// Crea un estado recién servido por cada tipo seguido
    pub async fn register_states(
        &self,
        conn: &mut SqliteConnection,
        vehicle: &Vehicle,
        tracked: &[MaintenanceType],
    ) -> Result<Vec<MaintenanceState>, AppError> {
        let mut states = Vec::with_capacity(tracked.len());

        for t in tracked {
            let state = MaintenanceState::initial(
                MaintenanceKind::Known(*t),
                vehicle.created_at,
                vehicle.current_distance,
                &self.intervals,
            );
            MaintenanceRepository::insert_state(&mut *conn, vehicle.id, &state).await?;
            states.push(state);
        }

        debug!("🔧 {} estados de mantenimiento creados para {}", states.len(), vehicle.id);
        Ok(states)
    }

    pub async fn states_for(&self, vehicle: &Vehicle) -> Result<Vec<MaintenanceState>, AppError> {
        let rows = MaintenanceRepository::new(self.pool.clone())
            .find_by_vehicle(vehicle.id)
            .await?;
        Ok(rows.iter().map(|row| row.to_state()).collect())
    }

    /// Nueva lectura del odómetro: recalcula todo y notifica los descensos
    pub async fn update_distance(&self, vehicle: &Vehicle, current_distance: i64) -> Result<RefreshOutcome, AppError> {
        if current_distance < vehicle.current_distance {
            warn!(
                "⚠️ Lectura de odómetro menor que la anterior para {}: {} -> {}",
                vehicle.id, vehicle.current_distance, current_distance
            );
        }

        let mut tx = self.pool.begin().await?;

        let vehicle = VehicleRepository::update_distance(&mut *tx, vehicle.id, current_distance).await?;
        let (states, notifications) = self.refresh_in(&mut *tx, &vehicle, None).await?;

        tx.commit().await?;

        info!(
            "🚗 Odómetro de {} actualizado a {} ({} notificaciones)",
            vehicle.id,
            vehicle.current_distance,
            notifications.len()
        );

        Ok(RefreshOutcome {
            vehicle,
            states,
            notifications,
        })
    }

    /// Marca un mantenimiento como realizado y lo añade al historial
    pub async fn complete_service(
        &self,
        vehicle: &Vehicle,
        maintenance_type: MaintenanceType,
        request: CompleteServiceRequest,
    ) -> Result<ServiceOutcome, AppError> {
        let kind = MaintenanceKind::Known(maintenance_type);
        let distance_at_service = request.distance_at_service.unwrap_or(vehicle.current_distance);
        let serviced_at = Utc::now();

        let mut tx = self.pool.begin().await?;

        let (state_id, current) = MaintenanceRepository::find_by_vehicle_in(&mut *tx, vehicle.id)
            .await?
            .iter()
            .map(|row| (row.id, row.to_state()))
            .find(|(_, state)| *state.maintenance_type() == kind)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "El mantenimiento '{}' no se registra para este vehículo",
                    maintenance_type
                ))
            })?;

        let state = current.complete_service(distance_at_service, serviced_at, &self.intervals);
        MaintenanceRepository::replace_state(&mut *tx, state_id, &state).await?;

        let record = MaintenanceRecord::new(
            vehicle.id,
            &kind,
            distance_at_service,
            serviced_at,
            request.cost,
            request.notes,
        );
        MaintenanceRepository::insert_record(&mut *tx, &record).await?;

        // El servicio se hizo más allá del odómetro conocido: avanzarlo
        let (vehicle, notifications) = if distance_at_service > vehicle.current_distance {
            let vehicle = VehicleRepository::update_distance(&mut *tx, vehicle.id, distance_at_service).await?;
            let (_, notifications) = self.refresh_in(&mut *tx, &vehicle, Some(&kind)).await?;
            (vehicle, notifications)
        } else {
            (vehicle.clone(), Vec::new())
        };

        tx.commit().await?;

        info!(
            "🔧 Servicio '{}' completado para {} a {} (próximo a {})",
            maintenance_type,
            vehicle.id,
            distance_at_service,
            state.due_at_distance()
        );

        Ok(ServiceOutcome {
            vehicle,
            state,
            record,
            notifications,
        })
    }

    /// Recalcula los estados con el odómetro del vehículo y los reescribe.
    /// `skip` queda intacto (recién servido).
    async fn refresh_in(
        &self,
        conn: &mut SqliteConnection,
        vehicle: &Vehicle,
        skip: Option<&MaintenanceKind>,
    ) -> Result<(Vec<MaintenanceState>, Vec<Notification>), AppError> {
        let rows = MaintenanceRepository::find_by_vehicle_in(&mut *conn, vehicle.id).await?;

        let mut states = Vec::with_capacity(rows.len());
        let mut notifications = Vec::new();

        for row in rows {
            let before = row.to_state();
            if skip == Some(before.maintenance_type()) {
                states.push(before);
                continue;
            }

            let after = before.apply_distance(vehicle.current_distance, &self.intervals)?;
            if after != before {
                MaintenanceRepository::replace_state(&mut *conn, row.id, &after).await?;
            }

            if before.stepped_down_into_alert(&after) {
                let notification = Notification::new(
                    vehicle.user_id,
                    vehicle.id,
                    after.maintenance_type(),
                    after.priority(),
                    after.percentage(),
                    alert_message(vehicle, &after),
                );
                NotificationRepository::create(&mut *conn, &notification).await?;
                info!("🔔 {}", notification.message);
                notifications.push(notification);
            }

            states.push(after);
        }

        Ok((states, notifications))
    }
}

/// Ordena de peor a mejor porcentaje, luego por tipo
pub fn to_item_responses(
    states: &[MaintenanceState],
    current_distance: i64,
    intervals: &IntervalTable,
) -> Vec<MaintenanceItemResponse> {
    let mut items: Vec<MaintenanceItemResponse> = states
        .iter()
        .map(|state| MaintenanceItemResponse::from_state(state, current_distance, intervals))
        .collect();
    items.sort_by(|a, b| {
        a.percentage
            .cmp(&b.percentage)
            .then_with(|| a.maintenance_type.cmp(&b.maintenance_type))
    });
    items
}

/// Conteo por estado; el porcentaje global es el del elemento más gastado
pub fn summarize(vehicle: &Vehicle, states: &[MaintenanceState]) -> MaintenanceSummaryResponse {
    let count = |status: MaintenanceStatus| states.iter().filter(|s| s.status() == status).count();

    MaintenanceSummaryResponse {
        vehicle_id: vehicle.id,
        total: states.len(),
        critical: count(MaintenanceStatus::Critical),
        upcoming: count(MaintenanceStatus::Upcoming),
        good: count(MaintenanceStatus::Good),
        excellent: count(MaintenanceStatus::Excellent),
        needs_attention: states.iter().filter(|s| s.needs_notification()).count(),
        overall_percentage: states.iter().map(|s| s.percentage()).min(),
    }
}

/// Texto de la notificación para un elemento que bajó de nivel
pub fn alert_message(vehicle: &Vehicle, state: &MaintenanceState) -> String {
    let label = state.maintenance_type().label();
    match state.status() {
        MaintenanceStatus::Critical if state.percentage() == 0 => format!(
            "{}: {} vencido, realízalo cuanto antes",
            vehicle.display_name(),
            label
        ),
        MaintenanceStatus::Critical => format!(
            "{}: {} en estado crítico ({}% restante)",
            vehicle.display_name(),
            label,
            state.percentage()
        ),
        _ => format!(
            "{}: {} próximo ({}% restante)",
            vehicle.display_name(),
            label,
            state.percentage()
        ),
    }
}
