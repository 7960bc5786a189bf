//! Repositorios
//!
//! Acceso a SQLite con consultas simples por tabla. Las operaciones que
//! participan en una transacción reciben la conexión explícitamente.

pub mod maintenance_repository;
pub mod notification_repository;
pub mod user_repository;
pub mod vehicle_repository;
