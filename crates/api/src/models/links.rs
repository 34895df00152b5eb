//! Link assembly for the hypermedia (HAL) user representation.
//!
//! Pure functions: they decorate an already-persisted record with
//! navigational links and never touch the store.

use serde::Serialize;

use super::usuario::Usuario;

/// Content type negotiated by the hypermedia variant.
pub const HAL_JSON: &str = "application/hal+json";

/// A single navigational reference.
#[derive(Debug, Clone, Serialize)]
pub struct Link {
    pub href: String,
}

impl Link {
    fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// Links carried by a decorated user record.
#[derive(Debug, Serialize)]
pub struct UsuarioLinks {
    /// The fetch-by-id operation for this record.
    #[serde(rename = "self")]
    pub self_link: Link,
    /// The list operation for the collection.
    pub usuarios: Link,
}

/// A user record decorated with navigational links.
#[derive(Debug, Serialize)]
pub struct UsuarioModel {
    #[serde(flatten)]
    pub usuario: Usuario,
    #[serde(rename = "_links")]
    pub links: UsuarioLinks,
}

/// Decorate a persisted user with self and collection links.
#[must_use]
pub fn to_model(usuario: Usuario) -> UsuarioModel {
    let links = UsuarioLinks {
        self_link: Link::new(format!("/api/usuario/{}", usuario.id_usuario)),
        usuarios: Link::new("/api/usuario"),
    };
    UsuarioModel { usuario, links }
}

/// A HAL collection of decorated user records.
#[derive(Debug, Serialize)]
pub struct UsuarioCollection {
    #[serde(rename = "_embedded")]
    pub embedded: EmbeddedUsuarios,
    #[serde(rename = "_links")]
    pub links: CollectionLinks,
}

#[derive(Debug, Serialize)]
pub struct EmbeddedUsuarios {
    #[serde(rename = "usuarioList")]
    pub usuario_list: Vec<UsuarioModel>,
}

#[derive(Debug, Serialize)]
pub struct CollectionLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
}

/// Wrap a list of users in a HAL collection with a self link.
#[must_use]
pub fn to_collection(usuarios: Vec<Usuario>) -> UsuarioCollection {
    UsuarioCollection {
        embedded: EmbeddedUsuarios {
            usuario_list: usuarios.into_iter().map(to_model).collect(),
        },
        links: CollectionLinks {
            self_link: Link::new("/api/usuario"),
        },
    }
}
