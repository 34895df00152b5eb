//! Permission domain type.

use serde::{Deserialize, Serialize};

use gestion_core::PermisoId;

/// A permission record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permiso {
    /// Unique permission ID, store-assigned when submitted as the `0` sentinel.
    #[serde(default)]
    pub id_permiso: PermisoId,
    /// Display name.
    pub nombre: String,
    /// Optional free-form description.
    #[serde(default)]
    pub descripcion: Option<String>,
}
