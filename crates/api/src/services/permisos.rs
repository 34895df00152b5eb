//! Permission entity service.

use sqlx::SqlitePool;

use gestion_core::PermisoId;

use crate::db::{PermisoRepository, RepositoryError};
use crate::models::Permiso;

/// Pass-through service over the permission repository.
pub struct PermisoService<'a> {
    repo: PermisoRepository<'a>,
}

impl<'a> PermisoService<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            repo: PermisoRepository::new(pool),
        }
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the store.
    pub async fn find_all(&self) -> Result<Vec<Permiso>, RepositoryError> {
        self.repo.list_all().await
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the store.
    pub async fn exists(&self, id: PermisoId) -> Result<bool, RepositoryError> {
        self.repo.exists(id).await
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the store.
    pub async fn create(&self, permiso: Permiso) -> Result<Permiso, RepositoryError> {
        self.repo.create(permiso).await
    }
}
