//! Session resource handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    error::{AppError, AppJson},
    models::Sesion,
    services::SesionService,
    state::AppState,
};

/// Build the session router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/sesion", get(list).post(create))
}

/// List all sessions; 204 when the store holds none.
async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let sesiones = SesionService::new(state.pool()).find_all().await?;

    if sesiones.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(Json(sesiones).into_response())
}

/// Create a session unless its token is already taken.
///
/// An empty token is rejected outright; no generation policy exists, so a
/// blank identifying key would otherwise poison the table.
async fn create(
    State(state): State<AppState>,
    AppJson(sesion): AppJson<Sesion>,
) -> Result<Response, AppError> {
    if sesion.token.trim().is_empty() {
        return Err(AppError::BadRequest("token must not be empty".to_owned()));
    }

    let service = SesionService::new(state.pool());

    if service.exists_by_token(&sesion.token).await? {
        return Err(AppError::AlreadyExists(format!(
            "sesion {} already exists",
            sesion.token
        )));
    }

    let creada = service.create(sesion).await?;
    Ok(Json(creada).into_response())
}
