//! Database module for SQLite persistence.
//!
//! SQLite is the source of truth for equipment and maintenance records.

mod repository;
mod seed;

pub use repository::*;
pub use seed::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    tracing::debug!("Database schema ready at {}", db_path.display());

    Ok(pool)
}

/// Run database migrations.
///
/// Ids use AUTOINCREMENT so a deleted equipment id is never handed out
/// again; orphaned maintenance rows keep pointing at nothing.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS equipment (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            equipment_type TEXT NOT NULL,
            usage_hours INTEGER NOT NULL DEFAULT 0 CHECK (usage_hours >= 0),
            maintenance_limit INTEGER NOT NULL CHECK (maintenance_limit > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // No FOREIGN KEY: deleting equipment leaves its history in place.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS maintenance (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            equipment_id INTEGER NOT NULL,
            service_date TEXT NOT NULL,
            maintenance_type TEXT NOT NULL,
            technician TEXT NOT NULL,
            description TEXT NOT NULL,
            usage_at_service INTEGER NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_maintenance_equipment_id ON maintenance(equipment_id);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
