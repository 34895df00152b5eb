//! Role domain type.

use serde::{Deserialize, Serialize};

use gestion_core::RolId;

use super::permiso::Permiso;

/// A role record; single-valued link to at most one permission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rol {
    /// Unique role ID, store-assigned when submitted as the `0` sentinel.
    #[serde(default)]
    pub id_rol: RolId,
    /// Display name.
    pub nombre_rol: String,
    /// Optional permission; many roles may reference the same permission.
    #[serde(default)]
    pub permiso: Option<Permiso>,
}
