//! Role resource handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    error::{AppError, AppJson},
    models::Rol,
    services::RolService,
    state::AppState,
};

/// Build the role router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/rol", get(list).post(create))
}

/// List all roles; 204 when the store holds none.
async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let roles = RolService::new(state.pool()).find_all().await?;

    if roles.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(Json(roles).into_response())
}

/// Create a role unless its id is already taken.
async fn create(
    State(state): State<AppState>,
    AppJson(rol): AppJson<Rol>,
) -> Result<Response, AppError> {
    let service = RolService::new(state.pool());

    if service.exists(rol.id_rol).await? {
        return Err(AppError::AlreadyExists(format!(
            "rol {} already exists",
            rol.id_rol
        )));
    }

    let creado = service.create(rol).await?;
    Ok(Json(creado).into_response())
}
