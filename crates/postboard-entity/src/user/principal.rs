//! The identity attached to a request after authentication.

use serde::Serialize;

use super::model::User;

/// Who is making a request.
///
/// Every request carries exactly one principal once it has passed the
/// authentication stage. `Anonymous` holds no capabilities and is never
/// activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "user", rename_all = "lowercase")]
pub enum Principal {
    /// No credentials were presented.
    Anonymous,
    /// A user resolved from a valid bearer token.
    User(User),
}

impl Principal {
    /// Whether this is the anonymous principal.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// The authenticated user, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::User(user) => Some(user),
        }
    }

    /// Whether the principal is an activated user.
    pub fn is_activated(&self) -> bool {
        self.user().is_some_and(|u| u.activated)
    }
}
