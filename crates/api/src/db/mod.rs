//! Database operations for the `SQLite` store.
//!
//! ## Tables
//!
//! - `usuario` - user records (FK to `rol`)
//! - `rol` - role records (FK to `permiso`)
//! - `permiso` - permission records
//! - `sesion` - session records, keyed by token
//!
//! Every identifying column carries a uniqueness constraint, so the advisory
//! check-then-insert sequence in the controllers degrades to a store-level
//! rejection under concurrent creates. The gateway translates that rejection
//! into [`RepositoryError::Conflict`].
//!
//! Migrations are embedded from `crates/api/migrations/` and run at startup.

pub mod permisos;
pub mod roles;
pub mod sesiones;
pub mod usuarios;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use permisos::PermisoRepository;
pub use roles::RolRepository;
pub use sesiones::SesionRepository;
pub use usuarios::UsuarioRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate id or token).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// Enables foreign-key enforcement and creates the database file on first use.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Map a unique-constraint violation on insert to [`RepositoryError::Conflict`].
pub(crate) fn conflict_on_unique(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}
