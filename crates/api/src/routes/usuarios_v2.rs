//! Hypermedia (HAL) variant of the user resource.
//!
//! Same store operations as the plain variant, but every record is wrapped
//! by the link assembler and responses negotiate `application/hal+json`.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};

use gestion_core::UsuarioId;

use crate::{
    error::{AppError, AppJson},
    models::{
        Usuario,
        links::{self, HAL_JSON},
    },
    services::UsuarioService,
    state::AppState,
};

/// Build the hypermedia user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/usuarioV2", get(list).post(create))
        .route(
            "/api/usuarioV2/{id}",
            get(get_by_id).put(update).delete(delete),
        )
}

fn hal(body: impl serde::Serialize) -> Response {
    ([(header::CONTENT_TYPE, HAL_JSON)], Json(body)).into_response()
}

/// HAL collection of all users; 204 when the store holds none.
async fn list(State(state): State<AppState>) -> Result<Response, AppError> {
    let usuarios = UsuarioService::new(state.pool()).find_all().await?;

    if usuarios.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(hal(links::to_collection(usuarios)))
}

/// Fetch a decorated user by id.
async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let id = UsuarioId::new(id);
    let usuario = UsuarioService::new(state.pool())
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("usuario {id} does not exist")))?;

    Ok(hal(links::to_model(usuario)))
}

/// Existence-checked create; 201 with a Location header on success.
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
    let location = format!("/api/usuario/{}", creado.id_usuario);

    Ok((
        StatusCode::CREATED,
        [
            (header::LOCATION, location),
            (header::CONTENT_TYPE, HAL_JSON.to_owned()),
        ],
        Json(links::to_model(creado)),
    )
        .into_response())
}

/// Full overwrite of an existing user; the path id wins over any body id.
async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    AppJson(mut usuario): AppJson<Usuario>,
) -> Result<Response, AppError> {
    usuario.id_usuario = UsuarioId::new(id);
    let service = UsuarioService::new(state.pool());

    if !service.exists(usuario.id_usuario).await? {
        return Err(AppError::NotFound(format!("usuario {id} does not exist")));
    }

    let actualizado = service.update(usuario).await?;
    Ok(hal(links::to_model(actualizado)))
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
