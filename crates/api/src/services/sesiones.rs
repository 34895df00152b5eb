//! Session entity service.

use sqlx::SqlitePool;

use crate::db::{RepositoryError, SesionRepository};
use crate::models::Sesion;

/// Pass-through service over the session repository.
pub struct SesionService<'a> {
    repo: SesionRepository<'a>,
}

impl<'a> SesionService<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            repo: SesionRepository::new(pool),
        }
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the store.
    pub async fn find_all(&self) -> Result<Vec<Sesion>, RepositoryError> {
        self.repo.list_all().await
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the store.
    pub async fn exists_by_token(&self, token: &str) -> Result<bool, RepositoryError> {
        self.repo.exists_by_token(token).await
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the store.
    pub async fn create(&self, sesion: Sesion) -> Result<Sesion, RepositoryError> {
        self.repo.create(sesion).await
    }
}
