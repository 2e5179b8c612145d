//! Database Module
//!
//! Handles SQLite connection pools and migrations

pub mod foods;
pub mod models;
pub mod seed;
pub mod staff;
pub mod tables;

use crate::common::AppError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;

/// Database service — owns the SQLite connection pools.
///
/// Two pools over one WAL-mode database file:
///
/// - `reader`: concurrent read connections; WAL readers never block.
/// - `writer`: a single connection, so write transactions queue behind each
///   other. A transition that begins on the writer holds the only write slot
///   until commit or rollback — the SQLite analogue of a row-level exclusive
///   lock, with `busy_timeout` bounding how long a queued writer waits.
#[derive(Clone)]
pub struct DbService {
    pub reader: SqlitePool,
    pub writer: SqlitePool,
}

impl DbService {
    /// Open the database with WAL mode, run migrations, and build both pools
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_millis(5000))
            .pragma("foreign_keys", "ON");

        let writer = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        let reader = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options.read_only(false))
            .await
            .map_err(|e| AppError::database(format!("Failed to open read pool: {e}")))?;

        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        sqlx::migrate!("./migrations")
            .run(&writer)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self { reader, writer })
    }
}
