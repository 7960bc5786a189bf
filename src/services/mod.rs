//! Services module
//!
//! Lógica de negocio que combina varios repositorios con el motor de
//! mantenimiento.

pub mod maintenance_service;

pub use maintenance_service::MaintenanceService;
