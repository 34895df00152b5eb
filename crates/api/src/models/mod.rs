//! Domain types for the four API resources.
//!
//! These structs double as wire representations: serde renames preserve the
//! upstream JSON field names (`idUsuario`, `nombreRol`, ...).

pub mod links;
pub mod permiso;
pub mod rol;
pub mod sesion;
pub mod usuario;

pub use permiso::Permiso;
pub use rol::Rol;
pub use sesion::Sesion;
pub use usuario::Usuario;
