//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Token lifetime and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Lifetime of `authentication` scope tokens in hours.
    #[serde(default = "default_authentication_ttl")]
    pub authentication_token_ttl_hours: i64,
    /// Lifetime of `activation` scope tokens in hours.
    #[serde(default = "default_activation_ttl")]
    pub activation_token_ttl_hours: i64,
    /// Bearer tokens longer than this are rejected before any lookup.
    #[serde(default = "default_max_token_length")]
    pub max_token_length: usize,
    /// Capability codes granted to every newly registered user.
    #[serde(default = "default_permissions")]
    pub default_permissions: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            authentication_token_ttl_hours: default_authentication_ttl(),
            activation_token_ttl_hours: default_activation_ttl(),
            max_token_length: default_max_token_length(),
            default_permissions: default_permissions(),
        }
    }
}

fn default_authentication_ttl() -> i64 {
    24
}

fn default_activation_ttl() -> i64 {
    72
}

fn default_max_token_length() -> usize {
    26
}

fn default_permissions() -> Vec<String> {
    vec!["posts:read".to_string()]
}
