use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::vehicle::Vehicle;

// Response de vehículo
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    pub vehicle_type: String,
    pub current_distance: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            brand: vehicle.brand,
            model: vehicle.model,
            year: vehicle.year,
            license_plate: vehicle.license_plate,
            vehicle_type: vehicle.vehicle_type,
            current_distance: vehicle.current_distance,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}
