//! User domain type.

use serde::{Deserialize, Serialize};

use gestion_core::UsuarioId;

use super::rol::Rol;

/// A user record.
///
/// `contrasena` is stored and echoed as a plain string. That is the upstream
/// contract this API preserves; callers relying on the field shape would break
/// if it were hashed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    /// Unique user ID, store-assigned when submitted as the `0` sentinel.
    #[serde(default)]
    pub id_usuario: UsuarioId,
    /// Display name.
    pub nombre: String,
    /// National-id-like string, unique per user.
    pub rut_usuario: String,
    /// Email address.
    pub email: String,
    /// Credential string (clear text, see type docs).
    pub contrasena: String,
    /// Optional phone number.
    #[serde(default)]
    pub telefono: Option<String>,
    /// Whether the account is active.
    pub activo: bool,
    /// Optional role; many users may reference the same role.
    #[serde(default)]
    pub rol: Option<Rol>,
}
