//! User repository for database operations.
//!
//! Reads left-join the role and permission tables so a user record always
//! carries its nested role. Writes cascade: a nested role (and its nested
//! permission) is saved in the same transaction as the user row.

use sqlx::SqlitePool;

use gestion_core::{PermisoId, RolId, UsuarioId};

use super::{RepositoryError, conflict_on_unique, roles};
use crate::models::{Permiso, Rol, Usuario};

/// Internal row type for user queries, left-joined with rol and permiso.
#[derive(Debug, sqlx::FromRow)]
struct UsuarioRow {
    id_usuario: i64,
    nombre: String,
    rut_usuario: String,
    email: String,
    contrasena: String,
    telefono: Option<String>,
    activo: bool,
    rol_id: Option<i64>,
    rol_nombre: Option<String>,
    permiso_id: Option<i64>,
    permiso_nombre: Option<String>,
    permiso_descripcion: Option<String>,
}

impl From<UsuarioRow> for Usuario {
    fn from(row: UsuarioRow) -> Self {
        let permiso = match (row.permiso_id, row.permiso_nombre) {
            (Some(id), Some(nombre)) => Some(Permiso {
                id_permiso: PermisoId::new(id),
                nombre,
                descripcion: row.permiso_descripcion,
            }),
            _ => None,
        };

        let rol = match (row.rol_id, row.rol_nombre) {
            (Some(id), Some(nombre_rol)) => Some(Rol {
                id_rol: RolId::new(id),
                nombre_rol,
                permiso,
            }),
            _ => None,
        };

        Self {
            id_usuario: UsuarioId::new(row.id_usuario),
            nombre: row.nombre,
            rut_usuario: row.rut_usuario,
            email: row.email,
            contrasena: row.contrasena,
            telefono: row.telefono,
            activo: row.activo,
            rol,
        }
    }
}

const SELECT_USUARIO: &str = "\
    SELECT u.id_usuario, u.nombre, u.rut_usuario, u.email, u.contrasena, \
           u.telefono, u.activo, \
           r.id_rol AS rol_id, r.nombre_rol AS rol_nombre, \
           p.id_permiso AS permiso_id, p.nombre AS permiso_nombre, \
           p.descripcion AS permiso_descripcion \
    FROM usuario u \
    LEFT JOIN rol r ON r.id_rol = u.id_rol \
    LEFT JOIN permiso p ON p.id_permiso = r.id_permiso";

/// Repository for user database operations.
pub struct UsuarioRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UsuarioRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all users in store order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Usuario>, RepositoryError> {
        let rows = sqlx::query_as::<_, UsuarioRow>(&format!("{SELECT_USUARIO} ORDER BY u.id_usuario"))
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a user by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UsuarioId) -> Result<Option<Usuario>, RepositoryError> {
        let row = sqlx::query_as::<_, UsuarioRow>(&format!("{SELECT_USUARIO} WHERE u.id_usuario = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// Whether a user with this id exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: UsuarioId) -> Result<bool, RepositoryError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM usuario WHERE id_usuario = ?")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        Ok(count > 0)
    }

    /// Insert a new user exactly as given; the store assigns an id when the
    /// submitted id is the `0` sentinel. A nested role cascades in the same
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the id or rut already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, usuario: Usuario) -> Result<Usuario, RepositoryError> {
        let Usuario {
            id_usuario,
            nombre,
            rut_usuario,
            email,
            contrasena,
            telefono,
            activo,
            rol,
        } = usuario;

        let mut tx = self.pool.begin().await?;

        let rol = match rol {
            Some(r) => Some(roles::save_rol(&mut *tx, r).await?),
            None => None,
        };
        let rol_fk = rol.as_ref().map(|r| r.id_rol);

        let id_usuario = if id_usuario.is_unassigned() {
            let id = sqlx::query_scalar::<_, i64>(
                "INSERT INTO usuario (nombre, rut_usuario, email, contrasena, telefono, activo, id_rol) \
                 VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id_usuario",
            )
            .bind(&nombre)
            .bind(&rut_usuario)
            .bind(&email)
            .bind(&contrasena)
            .bind(&telefono)
            .bind(activo)
            .bind(rol_fk)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| conflict_on_unique(e, "usuario"))?;
            UsuarioId::new(id)
        } else {
            sqlx::query(
                "INSERT INTO usuario (id_usuario, nombre, rut_usuario, email, contrasena, telefono, activo, id_rol) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(id_usuario)
            .bind(&nombre)
            .bind(&rut_usuario)
            .bind(&email)
            .bind(&contrasena)
            .bind(&telefono)
            .bind(activo)
            .bind(rol_fk)
            .execute(&mut *tx)
            .await
            .map_err(|e| conflict_on_unique(e, "usuario"))?;
            id_usuario
        };

        tx.commit().await?;

        Ok(Usuario {
            id_usuario,
            nombre,
            rut_usuario,
            email,
            contrasena,
            telefono,
            activo,
            rol,
        })
    }

    /// Overwrite an existing user (full replacement, not a merge). A nested
    /// role cascades in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new rut collides.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, usuario: Usuario) -> Result<Usuario, RepositoryError> {
        let Usuario {
            id_usuario,
            nombre,
            rut_usuario,
            email,
            contrasena,
            telefono,
            activo,
            rol,
        } = usuario;

        let mut tx = self.pool.begin().await?;

        let rol = match rol {
            Some(r) => Some(roles::save_rol(&mut *tx, r).await?),
            None => None,
        };
        let rol_fk = rol.as_ref().map(|r| r.id_rol);

        let result = sqlx::query(
            "UPDATE usuario \
             SET nombre = ?, rut_usuario = ?, email = ?, contrasena = ?, \
                 telefono = ?, activo = ?, id_rol = ? \
             WHERE id_usuario = ?",
        )
        .bind(&nombre)
        .bind(&rut_usuario)
        .bind(&email)
        .bind(&contrasena)
        .bind(&telefono)
        .bind(activo)
        .bind(rol_fk)
        .bind(id_usuario)
        .execute(&mut *tx)
        .await
        .map_err(|e| conflict_on_unique(e, "usuario"))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;

        Ok(Usuario {
            id_usuario,
            nombre,
            rut_usuario,
            email,
            contrasena,
            telefono,
            activo,
            rol,
        })
    }

    /// Delete a user by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: UsuarioId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM usuario WHERE id_usuario = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
