use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::maintenance_dto::DistanceUpdateResponse;
use crate::dto::vehicle_dto::VehicleResponse;
use crate::models::vehicle::{CreateVehicleRequest, UpdateDistanceRequest, UpdateVehicleRequest, Vehicle};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::maintenance_service::{to_item_responses, MaintenanceService};
use crate::state::AppState;
use crate::utils::errors::{conflict_error, not_found_error, AppError};
use crate::utils::validation::normalize_license_plate;

pub struct VehicleController {
    state: AppState,
    repository: VehicleRepository,
    maintenance: MaintenanceService,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
            repository: VehicleRepository::new(state.pool.clone()),
            maintenance: state.maintenance_service(),
        }
    }

    /// Vehículo del usuario o 404, también cuando pertenece a otro usuario
    pub async fn find_owned(&self, id: Uuid, user_id: Uuid) -> Result<Vehicle, AppError> {
        self.repository
            .find_for_user(id, user_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let license_plate = normalize_license_plate(&request.license_plate);
        if self.repository.license_plate_exists(&license_plate, user_id, None).await? {
            return Err(conflict_error("Vehicle", "license_plate", &license_plate));
        }

        let now = Utc::now();
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            user_id,
            brand: request.brand.trim().to_string(),
            model: request.model.trim().to_string(),
            year: request.year,
            license_plate,
            vehicle_type: request.vehicle_type.as_str().to_string(),
            current_distance: request.current_distance,
            created_at: now,
            updated_at: now,
        };

        // Vehículo y estados iniciales en la misma transacción
        let mut tx = self.state.pool.begin().await?;
        let vehicle = VehicleRepository::create(&mut *tx, &vehicle).await?;
        self.maintenance
            .register_states(&mut *tx, &vehicle, &request.vehicle_type.tracked_maintenance())
            .await?;
        tx.commit().await?;

        info!("🚗 Vehículo registrado: {}", vehicle.display_name());
        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid, user_id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self.find_owned(id, user_id).await?;
        Ok(VehicleResponse::from(vehicle))
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.find_by_user(user_id).await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let mut vehicle = self.find_owned(id, user_id).await?;

        if let Some(plate) = request.license_plate {
            let plate = normalize_license_plate(&plate);
            if self.repository.license_plate_exists(&plate, user_id, Some(id)).await? {
                return Err(conflict_error("Vehicle", "license_plate", &plate));
            }
            vehicle.license_plate = plate;
        }
        if let Some(brand) = request.brand {
            vehicle.brand = brand.trim().to_string();
        }
        if let Some(model) = request.model {
            vehicle.model = model.trim().to_string();
        }
        if let Some(year) = request.year {
            vehicle.year = year;
        }

        let vehicle = self.repository.update_details(&vehicle).await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(id, user_id).await? {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }

        info!("🗑️ Vehículo eliminado: {}", id);
        Ok(())
    }

    pub async fn update_distance(
        &self,
        id: Uuid,
        user_id: Uuid,
        request: UpdateDistanceRequest,
    ) -> Result<DistanceUpdateResponse, AppError> {
        request.validate()?;

        let vehicle = self.find_owned(id, user_id).await?;
        let outcome = self
            .maintenance
            .update_distance(&vehicle, request.current_distance)
            .await?;

        let maintenance = to_item_responses(
            &outcome.states,
            outcome.vehicle.current_distance,
            &self.state.intervals,
        );

        Ok(DistanceUpdateResponse {
            vehicle: VehicleResponse::from(outcome.vehicle),
            maintenance,
            notifications_created: outcome.notifications.len(),
        })
    }
}
