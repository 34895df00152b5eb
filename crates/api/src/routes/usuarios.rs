//! User resource handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use gestion_core::UsuarioId;

use crate::{
    error::{AppError, AppJson},
    models::{Usuario, links},
    services::UsuarioService,
    state::AppState,
};

/// Build the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/usuario", get(list).post(create))
        .route("/api/usuario/{id}", get(get_by_id).delete(delete))
}

/// List all users; 204 when the store holds none.
async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let usuarios = UsuarioService::new(state.pool()).find_all().await?;

    if usuarios.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(Json(usuarios).into_response())
}

/// Fetch a user by id, decorated with self and collection links.
async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let id = UsuarioId::new(id);
    let service = UsuarioService::new(state.pool());

    if !service.exists(id).await? {
        return Err(AppError::NotFound(format!("usuario {id} does not exist")));
    }

    // The record can vanish between the check and the fetch; that secondary
    // absence is still a plain 404.
    let usuario = service
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("usuario {id} does not exist")))?;

    Ok(Json(links::to_model(usuario)).into_response())
}

/// Create a user unless its id is already taken.
///
/// The existence check is advisory; the store's uniqueness constraints close
/// the race and also surface as 406.
async fn create(
    State(state): State<AppState>,
    AppJson(usuario): AppJson<Usuario>,
) -> Result<Response, AppError> {
    let service = UsuarioService::new(state.pool());

    if service.exists(usuario.id_usuario).await? {
        return Err(AppError::AlreadyExists(format!(
            "usuario {} already exists",
            usuario.id_usuario
        )));
    }

    let creado = service.create(usuario).await?;
    Ok(Json(creado).into_response())
}

/// Existence-checked delete: 204 when present, 404 when absent.
async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let id = UsuarioId::new(id);
    let service = UsuarioService::new(state.pool());

    if !service.exists(id).await? {
        return Err(AppError::NotFound(format!("usuario {id} does not exist")));
    }

    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
