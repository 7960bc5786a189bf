use uuid::Uuid;
use validator::Validate;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::maintenance_dto::{
    CompleteServiceResponse, MaintenanceItemResponse, MaintenanceSummaryResponse,
};
use crate::models::maintenance::{CompleteServiceRequest, MaintenanceRecord};
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::services::maintenance_service::{summarize, to_item_responses, MaintenanceService};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::parse_maintenance_type;

pub struct MaintenanceController {
    vehicles: VehicleController,
    service: MaintenanceService,
    repository: MaintenanceRepository,
}

impl MaintenanceController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: VehicleController::new(state),
            service: state.maintenance_service(),
            repository: MaintenanceRepository::new(state.pool.clone()),
        }
    }

    pub async fn list(&self, vehicle_id: Uuid, user_id: Uuid) -> Result<Vec<MaintenanceItemResponse>, AppError> {
        let vehicle = self.vehicles.find_owned(vehicle_id, user_id).await?;
        let states = self.service.states_for(&vehicle).await?;

        Ok(to_item_responses(&states, vehicle.current_distance, self.service.intervals()))
    }

    pub async fn summary(&self, vehicle_id: Uuid, user_id: Uuid) -> Result<MaintenanceSummaryResponse, AppError> {
        let vehicle = self.vehicles.find_owned(vehicle_id, user_id).await?;
        let states = self.service.states_for(&vehicle).await?;

        Ok(summarize(&vehicle, &states))
    }

    pub async fn history(&self, vehicle_id: Uuid, user_id: Uuid) -> Result<Vec<MaintenanceRecord>, AppError> {
        let vehicle = self.vehicles.find_owned(vehicle_id, user_id).await?;
        self.repository.find_history(vehicle.id).await
    }

    pub async fn complete(
        &self,
        vehicle_id: Uuid,
        user_id: Uuid,
        maintenance_type: &str,
        request: CompleteServiceRequest,
    ) -> Result<CompleteServiceResponse, AppError> {
        // Un tipo desconocido es un error del cliente aunque el vehículo no exista
        let maintenance_type = parse_maintenance_type(maintenance_type)?;
        request.validate()?;

        let vehicle = self.vehicles.find_owned(vehicle_id, user_id).await?;
        let outcome = self
            .service
            .complete_service(&vehicle, maintenance_type, request)
            .await?;

        let item = MaintenanceItemResponse::from_state(
            &outcome.state,
            outcome.vehicle.current_distance,
            self.service.intervals(),
        );

        Ok(CompleteServiceResponse {
            record: outcome.record,
            item,
            current_distance: outcome.vehicle.current_distance,
        })
    }
}
