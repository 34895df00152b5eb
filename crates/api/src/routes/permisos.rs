//! Permission resource handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    error::{AppError, AppJson},
    models::Permiso,
    services::PermisoService,
    state::AppState,
};

/// Build the permission router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/permiso", get(list).post(create))
}

/// List all permissions; 204 when the store holds none.
async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let permisos = PermisoService::new(state.pool()).find_all().await?;

    if permisos.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(Json(permisos).into_response())
}

/// Create a permission unless its id is already taken.
async fn create(
    State(state): State<AppState>,
    AppJson(permiso): AppJson<Permiso>,
) -> Result<Response, AppError> {
    let service = PermisoService::new(state.pool());

    if service.exists(permiso.id_permiso).await? {
        return Err(AppError::AlreadyExists(format!(
            "permiso {} already exists",
            permiso.id_permiso
        )));
    }

    let creado = service.create(permiso).await?;
    Ok(Json(creado).into_response())
}
