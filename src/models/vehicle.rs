//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::engine::MaintenanceType;

/// Tipo de vehículo; decide qué mantenimientos se siguen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    Motorcycle,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Car => "car",
            VehicleType::Motorcycle => "motorcycle",
        }
    }

    /// Tipos de mantenimiento que se crean al registrar el vehículo
    pub fn tracked_maintenance(&self) -> Vec<MaintenanceType> {
        let excluded = match self {
            VehicleType::Car => MaintenanceType::Chain,
            VehicleType::Motorcycle => MaintenanceType::Alignment,
        };
        MaintenanceType::ALL
            .iter()
            .copied()
            .filter(|t| *t != excluded)
            .collect()
    }
}

/// Vehicle - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub user_id: Uuid,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    pub vehicle_type: String,
    pub current_distance: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Nombre corto para mensajes ("Honda CB500 (1234-ABC)")
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.license_plate)
    }
}

/// Request para registrar un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub brand: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,

    #[validate(custom = "crate::utils::validation::validate_license_plate")]
    pub license_plate: String,

    pub vehicle_type: VehicleType,

    #[validate(range(min = 0))]
    pub current_distance: i64,
}

/// Request para actualizar un vehículo existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1900, max = 2100))]
    pub year: Option<i32>,

    #[validate(custom = "crate::utils::validation::validate_license_plate")]
    pub license_plate: Option<String>,
}

/// Request para actualizar el odómetro
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDistanceRequest {
    #[validate(range(min = 0))]
    pub current_distance: i64,
}
