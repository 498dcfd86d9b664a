//! Opaque token generation.
//!
//! A token is 16 bytes from the OS RNG, base32-encoded without padding
//! (26 characters). Only the SHA-256 of that text is ever stored.

use chrono::{Duration, Utc};
use data_encoding::BASE32_NOPAD;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use postboard_core::error::AppError;
use postboard_entity::token::{AccessToken, TokenScope};

/// Random bytes per token.
pub const TOKEN_RANDOM_BYTES: usize = 16;

/// Create a new token for `user_id` valid for `ttl` in `scope`.
pub fn generate(user_id: i64, ttl: Duration, scope: TokenScope) -> Result<AccessToken, AppError> {
    let mut random = [0u8; TOKEN_RANDOM_BYTES];
    OsRng
        .try_fill_bytes(&mut random)
        .map_err(|e| AppError::internal(format!("Failed to read random bytes: {e}")))?;

    let plaintext = BASE32_NOPAD.encode(&random);
    let hash = hash_plaintext(&plaintext);

    Ok(AccessToken {
        plaintext,
        hash,
        user_id,
        expiry: Utc::now() + ttl,
        scope,
    })
}

/// SHA-256 of a token's plaintext.
pub fn hash_plaintext(plaintext: &str) -> Vec<u8> {
    Sha256::digest(plaintext.as_bytes()).to_vec()
}
