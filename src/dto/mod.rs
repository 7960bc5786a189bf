//! DTOs de la API
//!
//! Estructuras de respuesta serializadas a JSON por las rutas.

pub mod auth_dto;
pub mod common_dto;
pub mod maintenance_dto;
pub mod notification_dto;
pub mod vehicle_dto;
