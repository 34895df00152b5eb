//! Session repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::{RepositoryError, conflict_on_unique};
use crate::models::Sesion;

/// Internal row type for session queries.
#[derive(Debug, sqlx::FromRow)]
struct SesionRow {
    token: String,
    expiracion: DateTime<Utc>,
}

impl From<SesionRow> for Sesion {
    fn from(row: SesionRow) -> Self {
        Self {
            token: row.token,
            expiracion: row.expiracion,
        }
    }
}

/// Repository for session database operations.
pub struct SesionRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SesionRepository<'a> {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all sessions in store order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Sesion>, RepositoryError> {
        let rows = sqlx::query_as::<_, SesionRow>(
            "SELECT token, expiracion FROM sesion ORDER BY rowid",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Whether a session with this token exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists_by_token(&self, token: &str) -> Result<bool, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sesion WHERE token = ?")
            .bind(token)
            .fetch_one(self.pool)
            .await?;

        Ok(count > 0)
    }

    /// Insert a new session exactly as given.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the token already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, sesion: Sesion) -> Result<Sesion, RepositoryError> {
        sqlx::query("INSERT INTO sesion (token, expiracion) VALUES (?, ?)")
            .bind(&sesion.token)
            .bind(sesion.expiracion)
            .execute(self.pool)
            .await
            .map_err(|e| conflict_on_unique(e, "sesion"))?;

        Ok(sesion)
    }
}
