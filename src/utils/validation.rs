//! Utilidades de validación
//!
//! Este módulo contiene validadores personalizados para los formularios
//! y helpers de conversión de tipos.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::engine::MaintenanceType;
use crate::utils::errors::AppError;

lazy_static! {
    // Letras, números, espacios y guiones; al menos un dígito
    static ref LICENSE_PLATE_RE: Regex = Regex::new(r"^[A-Z0-9][A-Z0-9 \-]{1,13}[A-Z0-9]$")
        .expect("regex de matrícula válida");
}

/// Validar formato de matrícula de vehículo
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    let plate = normalize_license_plate(value);
    let clean_len = plate.chars().filter(|c| c.is_ascii_alphanumeric()).count();

    if !LICENSE_PLATE_RE.is_match(&plate)
        || clean_len < 4
        || clean_len > 10
        || !plate.chars().any(|c| c.is_ascii_digit())
    {
        let mut error = ValidationError::new("license_plate");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Normaliza la matrícula para almacenarla y compararla
pub fn normalize_license_plate(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Convierte el segmento de ruta en un tipo de mantenimiento conocido
pub fn parse_maintenance_type(value: &str) -> Result<MaintenanceType, AppError> {
    MaintenanceType::from_str(value).ok_or_else(|| {
        AppError::BadRequest(format!("Tipo de mantenimiento desconocido: '{}'", value))
    })
}
