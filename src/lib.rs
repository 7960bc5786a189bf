//! Vehicle maintenance backend
//!
//! API HTTP para registrar vehículos, seguir el desgaste de cada elemento
//! de mantenimiento según el odómetro y avisar cuando algo se acerca a su
//! próximo servicio. El cálculo vive en `engine` y no depende de la base
//! de datos ni de axum.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod engine;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::Router;

use crate::state::AppState;

/// Router completo listo para servir
pub fn build_app(state: AppState) -> Router {
    routes::create_router(state)
}
