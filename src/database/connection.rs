//! Conexión a SQLite
//!
//! Este módulo abre el pool de conexiones y crea el schema al arrancar.
//! El pool se inyecta en `AppState`; no hay conexión global.

use sqlx::SqlitePool;
use tracing::info;

use crate::config::database::DatabaseConfig;
use crate::database::schema::SCHEMA;

/// Conexión a la base de datos
#[derive(Clone)]
pub struct DatabaseConnection {
    pool: SqlitePool,
}

impl DatabaseConnection {
    /// Crear el pool y aplicar el schema
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        info!("🗄️ Conectando a la base de datos: {}", mask_database_url(&config.url));

        let pool = config.create_pool().await?;
        let connection = Self { pool };
        connection.run_migrations().await?;

        info!("✅ Base de datos lista");
        Ok(connection)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Ejecutar migraciones de la base de datos
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        for statement in SCHEMA {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await
    }
}

/// Función helper para enmascarar la URL de la base de datos en logs
fn mask_database_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if url[..at_pos].rfind(':').is_some() {
            let protocol_end = url.find("://").map(|p| p + 3).unwrap_or(0);
            let protocol = &url[..protocol_end];
            let host = &url[at_pos + 1..];
            return format!("{}***:***@{}", protocol, host);
        }
    }
    url.to_string()
}
