//! Token scope enumeration.

use serde::{Deserialize, Serialize};

/// The single purpose a token may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenScope {
    /// One-shot account activation.
    Activation,
    /// API authentication.
    Authentication,
}

impl TokenScope {
    /// Return the scope as stored in the tokens table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activation => "activation",
            Self::Authentication => "authentication",
        }
    }
}

impl std::fmt::Display for TokenScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TokenScope {
    type Err = postboard_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "activation" => Ok(Self::Activation),
            "authentication" => Ok(Self::Authentication),
            _ => Err(postboard_core::AppError::internal(format!(
                "Unknown token scope: '{s}'"
            ))),
        }
    }
}
