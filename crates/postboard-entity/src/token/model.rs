//! Access token value type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::scope::TokenScope;

/// A credential handed to a client.
///
/// Only `hash` is ever persisted. `plaintext` exists on the value returned
/// from issuance and is shown to the client exactly once.
#[derive(Debug, Clone, Serialize)]
pub struct AccessToken {
    /// Base32 plaintext given to the client.
    #[serde(rename = "token")]
    pub plaintext: String,
    /// SHA-256 of the plaintext.
    #[serde(skip)]
    pub hash: Vec<u8>,
    /// Owning user.
    #[serde(skip)]
    pub user_id: i64,
    /// When the token stops resolving.
    pub expiry: DateTime<Utc>,
    /// What the token may be used for.
    #[serde(skip)]
    pub scope: TokenScope,
}
