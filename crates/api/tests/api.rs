//! In-process API tests over an in-memory `SQLite` store.
//!
//! Each test builds a fresh router with its own database, then drives it
//! through `tower::ServiceExt::oneshot` - no network, no external services.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use secrecy::SecretString;
use serde_json::{Value, json};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use gestion_api::{app, config::ApiConfig, db, state::AppState};

/// Build an app over a fresh in-memory database.
///
/// A single never-recycled connection keeps the in-memory database alive for
/// the whole test.
async fn test_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");

    db::MIGRATOR.run(&pool).await.expect("migrations");

    let config = ApiConfig {
        database_url: SecretString::from("sqlite::memory:"),
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
    };

    app(AppState::new(config, pool))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&Value>) -> axum::response::Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    app.clone().oneshot(request).await.expect("response")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

fn ana(id: i64) -> Value {
    json!({
        "idUsuario": id,
        "nombre": "Ana",
        "rutUsuario": "1-9",
        "email": "a@b.com",
        "contrasena": "x",
        "activo": true
    })
}

#[tokio::test]
async fn health_endpoints_respond() {
    let app = test_app().await;

    let response = send(&app, "GET", "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "GET", "/health/ready", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn list_returns_204_for_every_empty_resource() {
    let app = test_app().await;

    for uri in [
        "/api/usuario",
        "/api/usuarioV2",
        "/api/rol",
        "/api/permiso",
        "/api/sesion",
    ] {
        let response = send(&app, "GET", uri, None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT, "{uri}");
    }
}

#[tokio::test]
async fn create_usuario_with_sentinel_id_assigns_store_id() {
    let app = test_app().await;

    let response = send(&app, "POST", "/api/usuario", Some(&ana(0))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let creado = body_json(response).await;
    let assigned = creado["idUsuario"].as_i64().unwrap();
    assert_ne!(assigned, 0);
    assert_eq!(creado["nombre"], "Ana");

    // Second POST with the now-taken id is rejected and leaves the store alone.
    let mut duplicate = ana(assigned);
    duplicate["nombre"] = json!("Impostora");
    let response = send(&app, "POST", "/api/usuario", Some(&duplicate)).await;
    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);

    let response = send(&app, "GET", "/api/usuario", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let lista = body_json(response).await;
    let lista = lista.as_array().unwrap();
    assert_eq!(lista.len(), 1);
    assert_eq!(lista[0]["nombre"], "Ana");
}

#[tokio::test]
async fn create_usuario_preserves_explicit_id() {
    let app = test_app().await;

    let response = send(&app, "POST", "/api/usuario", Some(&ana(7))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let creado = body_json(response).await;
    assert_eq!(creado["idUsuario"], 7);
}

#[tokio::test]
async fn fetch_usuario_decorates_links() {
    let app = test_app().await;
    send(&app, "POST", "/api/usuario", Some(&ana(5))).await;

    let response = send(&app, "GET", "/api/usuario/5", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let usuario = body_json(response).await;
    assert_eq!(usuario["idUsuario"], 5);
    assert_eq!(usuario["rutUsuario"], "1-9");
    assert_eq!(usuario["_links"]["self"]["href"], "/api/usuario/5");
    assert_eq!(usuario["_links"]["usuarios"]["href"], "/api/usuario");
}

#[tokio::test]
async fn fetch_unknown_usuario_returns_404() {
    let app = test_app().await;

    let response = send(&app, "GET", "/api/usuario/99", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_usuarios_preserves_store_order() {
    let app = test_app().await;

    let mut primera = ana(0);
    primera["rutUsuario"] = json!("1-9");
    let mut segunda = ana(0);
    segunda["rutUsuario"] = json!("2-7");
    segunda["nombre"] = json!("Maria");

    send(&app, "POST", "/api/usuario", Some(&primera)).await;
    send(&app, "POST", "/api/usuario", Some(&segunda)).await;

    let response = send(&app, "GET", "/api/usuario", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let lista = body_json(response).await;
    let lista = lista.as_array().unwrap();
    assert_eq!(lista.len(), 2);
    assert_eq!(lista[0]["nombre"], "Ana");
    assert_eq!(lista[1]["nombre"], "Maria");
    assert!(lista[0]["idUsuario"].as_i64().unwrap() < lista[1]["idUsuario"].as_i64().unwrap());
}

#[tokio::test]
async fn update_forces_body_id_to_path_id() {
    let app = test_app().await;
    send(&app, "POST", "/api/usuario", Some(&ana(3))).await;

    let mut reemplazo = ana(999);
    reemplazo["nombre"] = json!("Ana Maria");
    reemplazo["telefono"] = json!("911111111");

    let response = send(&app, "PUT", "/api/usuarioV2/3", Some(&reemplazo)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let actualizado = body_json(response).await;
    assert_eq!(actualizado["idUsuario"], 3);
    assert_eq!(actualizado["nombre"], "Ana Maria");
    assert_eq!(actualizado["_links"]["self"]["href"], "/api/usuario/3");

    // Full overwrite is visible on a subsequent fetch.
    let response = send(&app, "GET", "/api/usuario/3", None).await;
    let usuario = body_json(response).await;
    assert_eq!(usuario["nombre"], "Ana Maria");
    assert_eq!(usuario["telefono"], "911111111");
}

#[tokio::test]
async fn update_unknown_usuario_returns_404() {
    let app = test_app().await;

    let response = send(&app, "PUT", "/api/usuarioV2/42", Some(&ana(42))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_is_existence_checked() {
    let app = test_app().await;
    send(&app, "POST", "/api/usuario", Some(&ana(4))).await;

    let response = send(&app, "DELETE", "/api/usuario/4", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Second delete of the same id finds nothing.
    let response = send(&app, "DELETE", "/api/usuario/4", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_body_is_rejected_at_transport_boundary() {
    let app = test_app().await;

    // Syntactically broken JSON
    let request = Request::builder()
        .method("POST")
        .uri("/api/usuario")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Missing required fields
    let response = send(&app, "POST", "/api/usuario", Some(&json!({"idUsuario": 1}))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Absent body entirely
    let response = send(&app, "POST", "/api/usuario", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rol_create_cascades_nested_permiso() {
    let app = test_app().await;

    let rol = json!({
        "idRol": 0,
        "nombreRol": "Administrador",
        "permiso": {
            "idPermiso": 0,
            "nombre": "Admin",
            "descripcion": "Acceso completo."
        }
    });

    let response = send(&app, "POST", "/api/rol", Some(&rol)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let creado = body_json(response).await;
    assert_ne!(creado["idRol"].as_i64().unwrap(), 0);
    assert_ne!(creado["permiso"]["idPermiso"].as_i64().unwrap(), 0);

    // The nested permission landed in its own table.
    let response = send(&app, "GET", "/api/permiso", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let permisos = body_json(response).await;
    assert_eq!(permisos.as_array().unwrap().len(), 1);
    assert_eq!(permisos[0]["nombre"], "Admin");

    let response = send(&app, "GET", "/api/rol", None).await;
    let roles = body_json(response).await;
    assert_eq!(roles[0]["nombreRol"], "Administrador");
    assert_eq!(roles[0]["permiso"]["descripcion"], "Acceso completo.");
}

#[tokio::test]
async fn duplicate_rol_id_returns_406() {
    let app = test_app().await;

    let rol = json!({"idRol": 1, "nombreRol": "Administrador"});
    let response = send(&app, "POST", "/api/rol", Some(&rol)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, "POST", "/api/rol", Some(&rol)).await;
    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
}

#[tokio::test]
async fn usuario_with_nested_rol_roundtrips() {
    let app = test_app().await;

    let mut usuario = ana(0);
    usuario["rol"] = json!({
        "idRol": 0,
        "nombreRol": "Usuario Registrado",
        "permiso": {"idPermiso": 0, "nombre": "Lectura"}
    });

    let response = send(&app, "POST", "/api/usuario", Some(&usuario)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let creado = body_json(response).await;
    assert_ne!(creado["rol"]["idRol"].as_i64().unwrap(), 0);

    let response = send(&app, "GET", "/api/usuario", None).await;
    let lista = body_json(response).await;
    assert_eq!(lista[0]["rol"]["nombreRol"], "Usuario Registrado");
    assert_eq!(lista[0]["rol"]["permiso"]["nombre"], "Lectura");
}

#[tokio::test]
async fn sesion_duplicate_token_returns_406() {
    let app = test_app().await;

    let sesion = json!({"token": "abc", "expiracion": "2030-01-01T00:00:00Z"});

    let response = send(&app, "POST", "/api/sesion", Some(&sesion)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let creada = body_json(response).await;
    assert_eq!(creada["token"], "abc");

    let response = send(&app, "POST", "/api/sesion", Some(&sesion)).await;
    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);

    let response = send(&app, "GET", "/api/sesion", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let sesiones = body_json(response).await;
    assert_eq!(sesiones.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn sesion_blank_token_returns_400() {
    let app = test_app().await;

    let sesion = json!({"token": "  ", "expiracion": "2030-01-01T00:00:00Z"});
    let response = send(&app, "POST", "/api/sesion", Some(&sesion)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Missing token never reaches the handler.
    let sesion = json!({"expiracion": "2030-01-01T00:00:00Z"});
    let response = send(&app, "POST", "/api/sesion", Some(&sesion)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn hal_collection_shape_and_content_type() {
    let app = test_app().await;
    send(&app, "POST", "/api/usuario", Some(&ana(5))).await;

    let response = send(&app, "GET", "/api/usuarioV2", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/hal+json"
    );
    let collection = body_json(response).await;
    let list = collection["_embedded"]["usuarioList"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["_links"]["self"]["href"], "/api/usuario/5");
    assert_eq!(collection["_links"]["self"]["href"], "/api/usuario");

    let response = send(&app, "GET", "/api/usuarioV2/5", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/hal+json"
    );

    let response = send(&app, "GET", "/api/usuarioV2/99", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn v2_create_returns_201_with_location() {
    let app = test_app().await;

    let response = send(&app, "POST", "/api/usuarioV2", Some(&ana(0))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[header::LOCATION].to_str().unwrap().to_owned();
    let creado = body_json(response).await;
    let assigned = creado["idUsuario"].as_i64().unwrap();
    assert_eq!(location, format!("/api/usuario/{assigned}"));
    assert_eq!(creado["_links"]["self"]["href"], location);

    // The duplicate-create policy holds on the hypermedia variant too.
    let response = send(&app, "POST", "/api/usuarioV2", Some(&ana(assigned))).await;
    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
}

#[tokio::test]
async fn v2_delete_is_existence_checked() {
    let app = test_app().await;
    send(&app, "POST", "/api/usuario", Some(&ana(8))).await;

    let response = send(&app, "DELETE", "/api/usuarioV2/8", None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "DELETE", "/api/usuarioV2/8", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
