//! Unified application error types for Postboard.
//!
//! Every crate maps its internal failures into [`AppError`] so that the
//! HTTP layer can translate a single type into a status code. Client-facing
//! kinds carry the message shown to the caller; server-class kinds carry an
//! internal message that is logged and never returned.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The request could not be parsed (bad JSON, bad header, bad query string).
    BadRequest,
    /// Input parsed but failed field validation.
    Validation,
    /// Email/password pair did not match.
    InvalidCredentials,
    /// Bearer token was malformed, expired, or of the wrong scope.
    InvalidToken,
    /// An anonymous principal reached a protected route.
    AuthenticationRequired,
    /// The principal has not activated their account.
    AccountInactive,
    /// The principal lacks the required capability code.
    NotPermitted,
    /// The requested resource was not found.
    NotFound,
    /// The caller's view of a versioned record was stale.
    EditConflict,
    /// The client exceeded its admission budget.
    RateLimitExceeded,
    /// An unexpected internal failure.
    Internal,
    /// A backing store failure or timeout.
    Database,
    /// A configuration error.
    Configuration,
}

impl ErrorKind {
    /// Whether this kind is a server-side failure whose detail must not leak.
    pub fn is_server_error(self) -> bool {
        matches!(self, Self::Internal | Self::Database | Self::Configuration)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::Validation => write!(f, "VALIDATION_ERROR"),
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::InvalidToken => write!(f, "INVALID_TOKEN"),
            Self::AuthenticationRequired => write!(f, "AUTHENTICATION_REQUIRED"),
            Self::AccountInactive => write!(f, "ACCOUNT_INACTIVE"),
            Self::NotPermitted => write!(f, "NOT_PERMITTED"),
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::EditConflict => write!(f, "EDIT_CONFLICT"),
            Self::RateLimitExceeded => write!(f, "RATE_LIMIT_EXCEEDED"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
        }
    }
}

/// The unified application error used throughout Postboard.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Per-field messages for validation failures.
    pub details: Option<BTreeMap<String, String>>,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a bad-request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    /// Create a validation error carrying one message per offending field.
    pub fn failed_validation(fields: BTreeMap<String, String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: "the request contains invalid fields".to_string(),
            details: Some(fields),
            source: None,
        }
    }

    /// Create a validation error for a single field.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.into(), message.into());
        Self::failed_validation(fields)
    }

    /// Create an invalid-credentials error.
    pub fn invalid_credentials() -> Self {
        Self::new(
            ErrorKind::InvalidCredentials,
            "invalid authentication credentials",
        )
    }

    /// Create an invalid-token error.
    pub fn invalid_token() -> Self {
        Self::new(
            ErrorKind::InvalidToken,
            "invalid or missing authentication token",
        )
    }

    /// Create an authentication-required error.
    pub fn authentication_required() -> Self {
        Self::new(
            ErrorKind::AuthenticationRequired,
            "you must be authenticated to access this resource",
        )
    }

    /// Create an inactive-account error.
    pub fn account_inactive() -> Self {
        Self::new(
            ErrorKind::AccountInactive,
            "your user account must be activated to access this resource",
        )
    }

    /// Create a not-permitted error.
    pub fn not_permitted() -> Self {
        Self::new(
            ErrorKind::NotPermitted,
            "your account does not have the necessary permissions to access this resource",
        )
    }

    /// Create a not-found error with the standard message.
    pub fn not_found() -> Self {
        Self::new(
            ErrorKind::NotFound,
            "the requested resource could not be found",
        )
    }

    /// Create an edit-conflict error.
    pub fn edit_conflict() -> Self {
        Self::new(
            ErrorKind::EditConflict,
            "unable to update the record due to an edit conflict, please try again",
        )
    }

    /// Create a rate-limit error.
    pub fn rate_limit_exceeded() -> Self {
        Self::new(ErrorKind::RateLimitExceeded, "rate limit exceeded")
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            details: self.details.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Internal,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
