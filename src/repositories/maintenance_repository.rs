use crate::engine::MaintenanceState;
use crate::models::maintenance::{MaintenanceRecord, MaintenanceStateRow};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

pub struct MaintenanceRepository {
    pool: SqlitePool,
}

impl MaintenanceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<MaintenanceStateRow>, AppError> {
        let mut conn = self.pool.acquire().await?;
        Self::find_by_vehicle_in(&mut *conn, vehicle_id).await
    }

    /// Lectura dentro de una transacción, para recalcular y reescribir
    pub async fn find_by_vehicle_in(
        conn: &mut SqliteConnection,
        vehicle_id: Uuid,
    ) -> Result<Vec<MaintenanceStateRow>, AppError> {
        let rows = sqlx::query_as::<_, MaintenanceStateRow>(
            "SELECT * FROM maintenance_states WHERE vehicle_id = ? ORDER BY maintenance_type"
        )
        .bind(vehicle_id)
        .fetch_all(conn)
        .await
        .map_err(|e| AppError::Database(format!("Error listing maintenance states: {}", e)))?;

        Ok(rows)
    }

    pub async fn insert_state(
        conn: &mut SqliteConnection,
        vehicle_id: Uuid,
        state: &MaintenanceState,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO maintenance_states (id, vehicle_id, maintenance_type, last_serviced_at, due_at_distance, percentage, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(state.maintenance_type().as_str())
        .bind(state.last_serviced_at())
        .bind(state.due_at_distance())
        .bind(i64::from(state.percentage()))
        .bind(Utc::now())
        .execute(conn)
        .await
        .map_err(|e| AppError::Database(format!("Error creating maintenance state: {}", e)))?;

        Ok(())
    }

    /// Reemplaza el registro guardado por el nuevo valor del estado.
    /// Se localiza por id: el tipo guardado puede no estar en forma canónica.
    pub async fn replace_state(
        conn: &mut SqliteConnection,
        state_id: Uuid,
        state: &MaintenanceState,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE maintenance_states
            SET last_serviced_at = ?, due_at_distance = ?, percentage = ?, updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(state.last_serviced_at())
        .bind(state.due_at_distance())
        .bind(i64::from(state.percentage()))
        .bind(Utc::now())
        .bind(state_id)
        .execute(conn)
        .await
        .map_err(|e| AppError::Database(format!("Error updating maintenance state: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Mantenimiento '{}' no registrado para este vehículo",
                state.maintenance_type()
            )));
        }

        Ok(())
    }

    pub async fn insert_record(conn: &mut SqliteConnection, record: &MaintenanceRecord) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO maintenance_records (id, vehicle_id, maintenance_type, distance_at_service, serviced_at, cost, notes)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(record.id)
        .bind(record.vehicle_id)
        .bind(&record.maintenance_type)
        .bind(record.distance_at_service)
        .bind(record.serviced_at)
        .bind(record.cost)
        .bind(&record.notes)
        .execute(conn)
        .await
        .map_err(|e| AppError::Database(format!("Error creating maintenance record: {}", e)))?;

        Ok(())
    }

    pub async fn find_history(&self, vehicle_id: Uuid) -> Result<Vec<MaintenanceRecord>, AppError> {
        let records = sqlx::query_as::<_, MaintenanceRecord>(
            "SELECT * FROM maintenance_records WHERE vehicle_id = ? ORDER BY serviced_at DESC, rowid DESC"
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing maintenance history: {}", e)))?;

        Ok(records)
    }
}
