//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema SQLite, junto con los formularios validados.

pub mod maintenance;
pub mod notification;
pub mod user;
pub mod vehicle;
