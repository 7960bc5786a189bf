//! Schema SQLite
//!
//! Cada sentencia es idempotente (`IF NOT EXISTS`). Los estados, el historial
//! y las notificaciones se borran en cascada con el vehículo.

pub const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BLOB PRIMARY KEY NOT NULL,
        full_name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS vehicles (
        id BLOB PRIMARY KEY NOT NULL,
        user_id BLOB NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        brand TEXT NOT NULL,
        model TEXT NOT NULL,
        year INTEGER NOT NULL,
        license_plate TEXT NOT NULL,
        vehicle_type TEXT NOT NULL,
        current_distance INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        UNIQUE (user_id, license_plate)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS maintenance_states (
        id BLOB PRIMARY KEY NOT NULL,
        vehicle_id BLOB NOT NULL REFERENCES vehicles(id) ON DELETE CASCADE,
        maintenance_type TEXT NOT NULL,
        last_serviced_at TEXT NOT NULL,
        due_at_distance INTEGER NOT NULL,
        percentage INTEGER NOT NULL CHECK (percentage BETWEEN 0 AND 100),
        updated_at TEXT NOT NULL,
        UNIQUE (vehicle_id, maintenance_type)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS maintenance_records (
        id BLOB PRIMARY KEY NOT NULL,
        vehicle_id BLOB NOT NULL REFERENCES vehicles(id) ON DELETE CASCADE,
        maintenance_type TEXT NOT NULL,
        distance_at_service INTEGER NOT NULL,
        serviced_at TEXT NOT NULL,
        cost REAL,
        notes TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS notifications (
        id BLOB PRIMARY KEY NOT NULL,
        user_id BLOB NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        vehicle_id BLOB NOT NULL REFERENCES vehicles(id) ON DELETE CASCADE,
        maintenance_type TEXT NOT NULL,
        priority TEXT NOT NULL,
        percentage INTEGER NOT NULL,
        message TEXT NOT NULL,
        is_read INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_vehicles_user ON vehicles (user_id)",
    "CREATE INDEX IF NOT EXISTS idx_records_vehicle ON maintenance_records (vehicle_id, serviced_at)",
    "CREATE INDEX IF NOT EXISTS idx_notifications_user ON notifications (user_id, is_read)",
];
