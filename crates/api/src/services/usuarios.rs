//! User entity service.

use sqlx::SqlitePool;

use gestion_core::UsuarioId;

use crate::db::{RepositoryError, UsuarioRepository};
use crate::models::Usuario;

/// Pass-through service over the user repository.
pub struct UsuarioService<'a> {
    repo: UsuarioRepository<'a>,
}

impl<'a> UsuarioService<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            repo: UsuarioRepository::new(pool),
        }
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the store.
    pub async fn find_all(&self) -> Result<Vec<Usuario>, RepositoryError> {
        self.repo.list_all().await
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the store.
    pub async fn find_by_id(&self, id: UsuarioId) -> Result<Option<Usuario>, RepositoryError> {
        self.repo.get_by_id(id).await
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the store.
    pub async fn exists(&self, id: UsuarioId) -> Result<bool, RepositoryError> {
        self.repo.exists(id).await
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the store.
    pub async fn create(&self, usuario: Usuario) -> Result<Usuario, RepositoryError> {
        self.repo.create(usuario).await
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the store.
    pub async fn update(&self, usuario: Usuario) -> Result<Usuario, RepositoryError> {
        self.repo.update(usuario).await
    }

    /// # Errors
    ///
    /// Propagates [`RepositoryError`] from the store.
    pub async fn delete(&self, id: UsuarioId) -> Result<(), RepositoryError> {
        self.repo.delete(id).await
    }
}
