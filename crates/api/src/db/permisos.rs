//! Permission repository for database operations.

use sqlx::{SqliteConnection, SqlitePool};

use gestion_core::PermisoId;

use super::{RepositoryError, conflict_on_unique};
use crate::models::Permiso;

/// Internal row type for permission queries.
#[derive(Debug, sqlx::FromRow)]
struct PermisoRow {
    id_permiso: i64,
    nombre: String,
    descripcion: Option<String>,
}

impl From<PermisoRow> for Permiso {
    fn from(row: PermisoRow) -> Self {
        Self {
            id_permiso: PermisoId::new(row.id_permiso),
            nombre: row.nombre,
            descripcion: row.descripcion,
        }
    }
}

/// Repository for permission database operations.
pub struct PermisoRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PermisoRepository<'a> {
    /// Create a new permission repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all permissions in store order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Permiso>, RepositoryError> {
        let rows = sqlx::query_as::<_, PermisoRow>(
            "SELECT id_permiso, nombre, descripcion FROM permiso ORDER BY id_permiso",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Whether a permission with this id exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(&self, id: PermisoId) -> Result<bool, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM permiso WHERE id_permiso = ?",
        )
        .bind(id)
        .fetch_one(self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Insert a new permission exactly as given; the store assigns an id when
    /// the submitted id is the `0` sentinel.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the id already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, permiso: Permiso) -> Result<Permiso, RepositoryError> {
        let Permiso {
            id_permiso,
            nombre,
            descripcion,
        } = permiso;

        let id_permiso = if id_permiso.is_unassigned() {
            let id = sqlx::query_scalar::<_, i64>(
                "INSERT INTO permiso (nombre, descripcion) VALUES (?, ?) RETURNING id_permiso",
            )
            .bind(&nombre)
            .bind(&descripcion)
            .fetch_one(self.pool)
            .await?;
            PermisoId::new(id)
        } else {
            sqlx::query("INSERT INTO permiso (id_permiso, nombre, descripcion) VALUES (?, ?, ?)")
                .bind(id_permiso)
                .bind(&nombre)
                .bind(&descripcion)
                .execute(self.pool)
                .await
                .map_err(|e| conflict_on_unique(e, "permiso"))?;
            id_permiso
        };

        Ok(Permiso {
            id_permiso,
            nombre,
            descripcion,
        })
    }
}

/// Upsert a permission as part of a cascading save from a parent record.
///
/// Mirrors the upstream cascade-on-save: an unassigned id inserts a fresh
/// row, an assigned id overwrites the existing one.
pub(crate) async fn save_permiso(
    conn: &mut SqliteConnection,
    permiso: Permiso,
) -> Result<Permiso, RepositoryError> {
    let Permiso {
        id_permiso,
        nombre,
        descripcion,
    } = permiso;

    let id_permiso = if id_permiso.is_unassigned() {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO permiso (nombre, descripcion) VALUES (?, ?) RETURNING id_permiso",
        )
        .bind(&nombre)
        .bind(&descripcion)
        .fetch_one(&mut *conn)
        .await?;
        PermisoId::new(id)
    } else {
        sqlx::query(
            "INSERT INTO permiso (id_permiso, nombre, descripcion) VALUES (?, ?, ?) \
             ON CONFLICT (id_permiso) DO UPDATE \
             SET nombre = excluded.nombre, descripcion = excluded.descripcion",
        )
        .bind(id_permiso)
        .bind(&nombre)
        .bind(&descripcion)
        .execute(&mut *conn)
        .await?;
        id_permiso
    };

    Ok(Permiso {
        id_permiso,
        nombre,
        descripcion,
    })
}
