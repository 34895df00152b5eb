//! Role entity service.

use sqlx::SqlitePool;

use gestion_core::RolId;

use crate::db::{RepositoryError, RolRepository};
use crate::models::Rol;

/// Pass-through service over the role repository.
pub struct RolService<'a> {
    repo: RolRepository<'a>,
}

impl<'a> RolService<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            repo: RolRepository::new(pool),
        }
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the store.
    pub async fn find_all(&self) -> Result<Vec<Rol>, RepositoryError> {
        self.repo.list_all().await
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the store.
    pub async fn exists(&self, id: RolId) -> Result<bool, RepositoryError> {
        self.repo.exists(id).await
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the store.
    pub async fn create(&self, rol: Rol) -> Result<Rol, RepositoryError> {
        self.repo.create(rol).await
    }
}
