//! Tabla de intervalos de mantenimiento
//!
//! Cada tipo de mantenimiento tiene un intervalo recomendado en unidades de
//! distancia. Los identificadores que ya no existen (datos guardados con un
//! tipo retirado) usan el intervalo por defecto en lugar de fallar.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::EngineError;

/// Intervalo usado para identificadores desconocidos
pub const DEFAULT_INTERVAL: i64 = 10_000;

/// Tipos de mantenimiento soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceType {
    Oil,
    Tires,
    Brakes,
    Battery,
    Coolant,
    AirFilter,
    Alignment,
    Chain,
    SparkPlug,
}

impl MaintenanceType {
    pub const ALL: [Self; 9] = [
        Self::Oil,
        Self::Tires,
        Self::Brakes,
        Self::Battery,
        Self::Coolant,
        Self::AirFilter,
        Self::Alignment,
        Self::Chain,
        Self::SparkPlug,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Oil => "oil",
            Self::Tires => "tires",
            Self::Brakes => "brakes",
            Self::Battery => "battery",
            Self::Coolant => "coolant",
            Self::AirFilter => "air_filter",
            Self::Alignment => "alignment",
            Self::Chain => "chain",
            Self::SparkPlug => "spark_plug",
        }
    }

    /// Nombre para mostrar al usuario
    pub const fn label(self) -> &'static str {
        match self {
            Self::Oil => "Cambio de aceite",
            Self::Tires => "Neumáticos",
            Self::Brakes => "Frenos",
            Self::Battery => "Batería",
            Self::Coolant => "Refrigerante",
            Self::AirFilter => "Filtro de aire",
            Self::Alignment => "Alineación",
            Self::Chain => "Cadena",
            Self::SparkPlug => "Bujías",
        }
    }

    /// Intervalo de fábrica en unidades de distancia
    pub const fn builtin_interval(self) -> i64 {
        match self {
            Self::Oil => 5_000,
            Self::Tires => 40_000,
            Self::Brakes => 30_000,
            Self::Battery => 50_000,
            Self::Coolant => 40_000,
            Self::AirFilter => 15_000,
            Self::Alignment => 20_000,
            Self::Chain => 10_000,
            Self::SparkPlug => 30_000,
        }
    }

    /// Acepta mayúsculas y guiones (`Air-Filter` == `air_filter`)
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == normalized)
    }

    fn env_key(self) -> String {
        format!("MAINTENANCE_INTERVAL_{}", self.as_str().to_uppercase())
    }
}

impl fmt::Display for MaintenanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identificador de mantenimiento tal como se guarda en la base de datos.
///
/// Los registros antiguos pueden referenciar tipos retirados; se conservan
/// tal cual para no perder el dato y se tratan con el intervalo por defecto.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MaintenanceKind {
    Known(MaintenanceType),
    Retired(String),
}

impl MaintenanceKind {
    pub fn parse(id: &str) -> Self {
        match MaintenanceType::from_str(id) {
            Some(t) => Self::Known(t),
            None => Self::Retired(id.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(t) => t.as_str(),
            Self::Retired(id) => id.as_str(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Known(t) => t.label(),
            Self::Retired(id) => id.as_str(),
        }
    }
}

impl From<MaintenanceType> for MaintenanceKind {
    fn from(t: MaintenanceType) -> Self {
        Self::Known(t)
    }
}

impl From<String> for MaintenanceKind {
    fn from(id: String) -> Self {
        Self::parse(&id)
    }
}

impl From<MaintenanceKind> for String {
    fn from(kind: MaintenanceKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for MaintenanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tabla tipo de mantenimiento -> intervalo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalTable {
    intervals: HashMap<MaintenanceType, i64>,
    default_interval: i64,
}

impl Default for IntervalTable {
    fn default() -> Self {
        Self {
            intervals: MaintenanceType::ALL
                .iter()
                .map(|t| (*t, t.builtin_interval()))
                .collect(),
            default_interval: DEFAULT_INTERVAL,
        }
    }
}

impl IntervalTable {
    /// Tabla de fábrica con overrides `MAINTENANCE_INTERVAL_<TIPO>` del entorno
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables arbitraria
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EngineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut table = Self::default();

        for t in MaintenanceType::ALL {
            let key = t.env_key();
            let Some(raw) = lookup(&key) else {
                continue;
            };

            let interval: i64 = raw.trim().parse().map_err(|_| EngineError::InvalidIntervalConfig {
                key: key.clone(),
                value: raw.clone(),
            })?;

            table = table.with_interval(t, interval)?;
        }

        Ok(table)
    }

    /// Devuelve una tabla nueva con el intervalo de `t` reemplazado
    pub fn with_interval(mut self, t: MaintenanceType, interval: i64) -> Result<Self, EngineError> {
        if interval <= 0 {
            return Err(EngineError::InvalidInterval(interval));
        }
        self.intervals.insert(t, interval);
        Ok(self)
    }

    pub fn interval_for_type(&self, t: MaintenanceType) -> i64 {
        self.intervals
            .get(&t)
            .copied()
            .unwrap_or(self.default_interval)
    }

    pub fn interval_for(&self, kind: &MaintenanceKind) -> i64 {
        match kind {
            MaintenanceKind::Known(t) => self.interval_for_type(*t),
            MaintenanceKind::Retired(_) => self.default_interval,
        }
    }
}
