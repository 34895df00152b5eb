//! Session domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A session record, keyed by its token string rather than a numeric id.
///
/// The token is client-supplied; no generation policy exists server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sesion {
    /// Unique session token (primary identifier).
    pub token: String,
    /// Expiration timestamp, RFC 3339 on the wire.
    pub expiracion: DateTime<Utc>,
}
