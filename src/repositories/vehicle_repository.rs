use crate::models::vehicle::Vehicle;
use crate::utils::errors::{conflict_error, AppError};
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

pub struct VehicleRepository {
    pool: SqlitePool,
}

impl VehicleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserta el vehículo dentro de la transacción del registro
    pub async fn create(conn: &mut SqliteConnection, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, user_id, brand, model, year, license_plate, vehicle_type, current_distance, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#
        )
        .bind(vehicle.id)
        .bind(vehicle.user_id)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.license_plate)
        .bind(&vehicle.vehicle_type)
        .bind(vehicle.current_distance)
        .bind(vehicle.created_at)
        .bind(vehicle.updated_at)
        .fetch_one(conn)
        .await
        .map_err(|e| write_error(e, vehicle, "Error creating vehicle"))?;

        Ok(vehicle)
    }

    /// Busca un vehículo del usuario; los de otros usuarios no existen para él
    pub async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE id = ? AND user_id = ?"
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error finding vehicle: {}", e)))?;

        Ok(vehicle)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE user_id = ? ORDER BY created_at DESC"
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing vehicles: {}", e)))?;

        Ok(vehicles)
    }

    pub async fn license_plate_exists(
        &self,
        license_plate: &str,
        user_id: Uuid,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE license_plate = ? AND user_id = ? AND id IS NOT ?)"
        )
        .bind(license_plate)
        .bind(user_id)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error checking license plate: {}", e)))?;

        Ok(result.0)
    }

    pub async fn update_details(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET brand = ?, model = ?, year = ?, license_plate = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
            RETURNING *
            "#
        )
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.license_plate)
        .bind(Utc::now())
        .bind(vehicle.id)
        .bind(vehicle.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, vehicle, "Error updating vehicle"))?;

        Ok(vehicle)
    }

    /// Actualiza el odómetro dentro de una transacción
    pub async fn update_distance(
        conn: &mut SqliteConnection,
        id: Uuid,
        current_distance: i64,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET current_distance = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#
        )
        .bind(current_distance)
        .bind(Utc::now())
        .bind(id)
        .fetch_one(conn)
        .await
        .map_err(|e| AppError::Database(format!("Error updating vehicle distance: {}", e)))?;

        Ok(vehicle)
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting vehicle: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

/// La restricción UNIQUE (user_id, license_plate) cubre la carrera entre
/// la comprobación previa y el INSERT/UPDATE
fn write_error(e: sqlx::Error, vehicle: &Vehicle, context: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            conflict_error("Vehicle", "license_plate", &vehicle.license_plate)
        }
        _ => AppError::Database(format!("{}: {}", context, e)),
    }
}
