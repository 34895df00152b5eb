//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! # Usuarios
//! GET    /api/usuario          - List users (204 when empty)
//! GET    /api/usuario/{id}     - Fetch user by id, decorated with links
//! POST   /api/usuario          - Existence-checked create (406 on duplicate)
//! DELETE /api/usuario/{id}     - Existence-checked delete (404 when absent)
//!
//! # Usuarios, hypermedia variant (application/hal+json)
//! GET    /api/usuarioV2        - HAL collection of decorated users
//! GET    /api/usuarioV2/{id}   - Decorated user
//! POST   /api/usuarioV2        - Create, 201 + Location on success
//! PUT    /api/usuarioV2/{id}   - Full overwrite, body id forced to path id
//! DELETE /api/usuarioV2/{id}   - Existence-checked delete
//!
//! # Roles
//! GET    /api/rol              - List roles (204 when empty)
//! POST   /api/rol              - Existence-checked create
//!
//! # Permisos
//! GET    /api/permiso          - List permissions (204 when empty)
//! POST   /api/permiso          - Existence-checked create
//!
//! # Sesiones
//! GET    /api/sesion           - List sessions (204 when empty)
//! POST   /api/sesion           - Existence-checked create (by token)
//! ```

pub mod permisos;
pub mod roles;
pub mod sesiones;
pub mod usuarios;
pub mod usuarios_v2;

use axum::Router;

use crate::state::AppState;

/// Build the full API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(usuarios::router())
        .merge(usuarios_v2::router())
        .merge(roles::router())
        .merge(permisos::router())
        .merge(sesiones::router())
}
