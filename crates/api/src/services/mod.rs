//! Entity services: one per resource, delegating to the repositories.
//!
//! The services add no behavior of their own; they exist to keep the
//! controller -> service -> repository seam explicit.

pub mod permisos;
pub mod roles;
pub mod sesiones;
pub mod usuarios;

pub use permisos::PermisoService;
pub use roles::RolService;
pub use sesiones::SesionService;
pub use usuarios::UsuarioService;
