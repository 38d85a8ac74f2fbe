//! Identity of the caller.
//!
//! The transport layer authenticates the caller and hands over an
//! [`AppUser`]. Write actions require a registered user; guests may only
//! read.

use crate::error::PickGitError;

/// The authenticated caller.
#[derive(Clone, PartialEq, Eq)]
pub enum AppUser {
    /// Authenticated but not registered.
    Guest,
    /// A registered user with the GitHub token used for remote calls.
    Registered {
        /// Username of the registered user.
        username: String,
        /// OAuth access token.
        access_token: String,
    },
}

impl AppUser {
    /// Creates a registered identity.
    #[must_use]
    pub fn registered(username: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self::Registered {
            username: username.into(),
            access_token: access_token.into(),
        }
    }

    /// Returns true for guests.
    #[must_use]
    pub const fn is_guest(&self) -> bool {
        matches!(self, Self::Guest)
    }

    /// Returns the username and access token of a registered caller.
    ///
    /// # Errors
    ///
    /// Returns [`PickGitError::Authorization`] for guests.
    pub fn require_registered(&self) -> Result<(&str, &str), PickGitError> {
        match self {
            Self::Registered {
                username,
                access_token,
            } => Ok((username.as_str(), access_token.as_str())),
            Self::Guest => {
                tracing::warn!("guest attempted a write action");
                Err(PickGitError::Authorization {
                    message: "guests cannot perform this action".to_owned(),
                })
            }
        }
    }
}

impl std::fmt::Debug for AppUser {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Guest => formatter.write_str("Guest"),
            Self::Registered { username, .. } => formatter
                .debug_struct("Registered")
                .field("username", username)
                .field("access_token", &"***")
                .finish(),
        }
    }
}
