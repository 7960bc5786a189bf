//! Controladores
//!
//! Cada controlador valida la entrada, aplica las reglas de negocio y
//! devuelve DTOs listos para serializar.

pub mod auth_controller;
pub mod maintenance_controller;
pub mod notification_controller;
pub mod vehicle_controller;
