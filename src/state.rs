//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::engine::IntervalTable;
use crate::services::MaintenanceService;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: EnvironmentConfig,
    pub intervals: Arc<IntervalTable>,
    pub jwt: JwtConfig,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: EnvironmentConfig, intervals: IntervalTable) -> Self {
        let jwt = JwtConfig::from(&config);
        Self {
            pool,
            config,
            intervals: Arc::new(intervals),
            jwt,
        }
    }

    pub fn maintenance_service(&self) -> MaintenanceService {
        MaintenanceService::new(self.pool.clone(), Arc::clone(&self.intervals))
    }
}
