//! Role repository for database operations.

use sqlx::{SqliteConnection, SqlitePool};

use gestion_core::{PermisoId, RolId};

use super::{RepositoryError, conflict_on_unique, permisos};
use crate::models::{Permiso, Rol};

/// Internal row type for role queries, left-joined with its permission.
#[derive(Debug, sqlx::FromRow)]
struct RolRow {
    id_rol: i64,
    nombre_rol: String,
    permiso_id: Option<i64>,
    permiso_nombre: Option<String>,
    permiso_descripcion: Option<String>,
}

impl From<RolRow> for Rol {
    fn from(row: RolRow) -> Self {
        let permiso = match (row.permiso_id, row.permiso_nombre) {
            (Some(id), Some(nombre)) => Some(Permiso {
                id_permiso: PermisoId::new(id),
                nombre,
                descripcion: row.permiso_descripcion,
            }),
            _ => None,
        };

        Self {
            id_rol: RolId::new(row.id_rol),
            nombre_rol: row.nombre_rol,
            permiso,
        }
    }
}

const SELECT_ROL: &str = "\
    SELECT r.id_rol, r.nombre_rol, \
           p.id_permiso AS permiso_id, p.nombre AS permiso_nombre, \
           p.descripcion AS permiso_descripcion \
    FROM rol r \
    LEFT JOIN permiso p ON p.id_permiso = r.id_permiso";

/// Repository for role database operations.
pub struct RolRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> RolRepository<'a> {
    /// Create a new role repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all roles in store order, with their permission attached.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Rol>, RepositoryError> {
        let rows = sqlx::query_as::<_, RolRow>(&format!("{SELECT_ROL} ORDER BY r.id_rol"))
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Whether a role with this id exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: RolId) -> Result<bool, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM rol WHERE id_rol = ?")
            .bind(id)
            .fetch_one(self.pool)
            .await?;

        Ok(count > 0)
    }

    /// Insert a new role; a nested permission is saved first in the same
    /// transaction (cascading write).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the id already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, rol: Rol) -> Result<Rol, RepositoryError> {
        let Rol {
            id_rol,
            nombre_rol,
            permiso,
        } = rol;

        let mut tx = self.pool.begin().await?;

        let permiso = match permiso {
            Some(p) => Some(permisos::save_permiso(&mut *tx, p).await?),
            None => None,
        };
        let permiso_fk = permiso.as_ref().map(|p| p.id_permiso);

        let id_rol = if id_rol.is_unassigned() {
            let id = sqlx::query_scalar::<_, i64>(
                "INSERT INTO rol (nombre_rol, id_permiso) VALUES (?, ?) RETURNING id_rol",
            )
            .bind(&nombre_rol)
            .bind(permiso_fk)
            .fetch_one(&mut *tx)
            .await?;
            RolId::new(id)
        } else {
            sqlx::query("INSERT INTO rol (id_rol, nombre_rol, id_permiso) VALUES (?, ?, ?)")
                .bind(id_rol)
                .bind(&nombre_rol)
                .bind(permiso_fk)
                .execute(&mut *tx)
                .await
                .map_err(|e| conflict_on_unique(e, "rol"))?;
            id_rol
        };

        tx.commit().await?;

        Ok(Rol {
            id_rol,
            nombre_rol,
            permiso,
        })
    }
}

/// Upsert a role as part of a cascading save from a user record.
///
/// The nested permission, if any, is saved first. An unassigned role id
/// inserts a fresh row, an assigned one overwrites the existing row.
pub(crate) async fn save_rol(
    conn: &mut SqliteConnection,
    rol: Rol,
) -> Result<Rol, RepositoryError> {
    let Rol {
        id_rol,
        nombre_rol,
        permiso,
    } = rol;

    let permiso = match permiso {
        Some(p) => Some(permisos::save_permiso(&mut *conn, p).await?),
        None => None,
    };
    let permiso_fk = permiso.as_ref().map(|p| p.id_permiso);

    let id_rol = if id_rol.is_unassigned() {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO rol (nombre_rol, id_permiso) VALUES (?, ?) RETURNING id_rol",
        )
        .bind(&nombre_rol)
        .bind(permiso_fk)
        .fetch_one(&mut *conn)
        .await?;
        RolId::new(id)
    } else {
        sqlx::query(
            "INSERT INTO rol (id_rol, nombre_rol, id_permiso) VALUES (?, ?, ?) \
             ON CONFLICT (id_rol) DO UPDATE \
             SET nombre_rol = excluded.nombre_rol, id_permiso = excluded.id_permiso",
        )
        .bind(id_rol)
        .bind(&nombre_rol)
        .bind(permiso_fk)
        .execute(&mut *conn)
        .await?;
        id_rol
    };

    Ok(Rol {
        id_rol,
        nombre_rol,
        permiso,
    })
}
