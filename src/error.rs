//! Error taxonomy shared by the comment, repository, and post layers.
//!
//! Every variant carries a stable machine-readable code and the HTTP status a
//! transport layer would surface, so callers never need to inspect messages.

use http::StatusCode;
use thiserror::Error;

use crate::persistence::PersistenceError;

/// Code attached to malformed comment content.
pub const COMMENT_FORMAT_CODE: &str = "F0002";

/// Code attached to missing or rejected access tokens.
pub const INVALID_TOKEN_CODE: &str = "A0001";

/// Code attached to guests attempting a write action.
pub const UNAUTHORIZED_CODE: &str = "A0002";

/// Code attached to invalid caller input other than comments.
pub const INVALID_INPUT_CODE: &str = "V0001";

/// Code attached to infrastructure failures.
pub const INTERNAL_CODE: &str = "I0001";

/// The kind of resource that could not be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// A registered user or a remote GitHub account.
    User,
    /// A stored post.
    Post,
    /// A remote repository.
    Repository,
}

impl Resource {
    /// Returns the stable error code for a missing resource of this kind.
    #[must_use]
    pub const fn not_found_code(self) -> &'static str {
        match self {
            Self::User => "U0001",
            Self::Post => "P0002",
            Self::Repository => "R0001",
        }
    }

    /// Returns a lower-case label used in messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Post => "post",
            Self::Repository => "repository",
        }
    }
}

/// Errors surfaced by pickgit operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PickGitError {
    /// Comment content was missing, blank, or too long.
    #[error("F0002")]
    CommentFormat,

    /// A user, post, or repository does not exist.
    #[error("{kind} not found: {message}", kind = .resource.as_str())]
    NotFound {
        /// What kind of resource was missing.
        resource: Resource,
        /// Identifier or remote message describing the lookup.
        message: String,
    },

    /// No access token accompanied the request.
    #[error("access token is required")]
    MissingToken,

    /// The access token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// Remote message returned with the 401/403 response.
        message: String,
    },

    /// A guest attempted a write action.
    #[error("not authorised: {message}")]
    Authorization {
        /// Description of the rejected action.
        message: String,
    },

    /// GitHub returned an error that is neither authentication nor not-found.
    #[error("GitHub API error ({status}): {message}")]
    Api {
        /// HTTP status reported by GitHub.
        status: u16,
        /// Response detail from GitHub.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// A URL could not be parsed.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// Search paging parameters were out of range.
    #[error("invalid pagination: {message}")]
    InvalidPagination {
        /// Description of the invalid parameter.
        message: String,
    },

    /// Caller input such as a search keyword or username was rejected.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of the invalid input.
        message: String,
    },

    /// Image storage failed.
    #[error("image storage failed: {message}")]
    Storage {
        /// Error detail from the storage backend.
        message: String,
    },

    /// The persistence layer failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Configuration could not be loaded or was incomplete.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl PickGitError {
    /// Builds a [`PickGitError::NotFound`] for `resource`.
    pub fn not_found(resource: Resource, message: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            message: message.into(),
        }
    }

    /// Returns the stable machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::CommentFormat => COMMENT_FORMAT_CODE,
            Self::NotFound { resource, .. } => resource.not_found_code(),
            Self::MissingToken | Self::Authentication { .. } => INVALID_TOKEN_CODE,
            Self::Authorization { .. } => UNAUTHORIZED_CODE,
            Self::InvalidUrl(_) | Self::InvalidPagination { .. } | Self::InvalidInput { .. } => {
                INVALID_INPUT_CODE
            }
            Self::Api { .. }
            | Self::Network { .. }
            | Self::Storage { .. }
            | Self::Persistence(_)
            | Self::Configuration { .. }
            | Self::Io { .. } => INTERNAL_CODE,
        }
    }

    /// Returns the HTTP status a transport layer should answer with.
    ///
    /// Remote API failures keep the status GitHub reported.
    #[must_use]
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::CommentFormat
            | Self::InvalidUrl(_)
            | Self::InvalidPagination { .. }
            | Self::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::MissingToken | Self::Authentication { .. } => StatusCode::UNAUTHORIZED,
            Self::Authorization { .. } => StatusCode::FORBIDDEN,
            Self::Api { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Network { .. } => StatusCode::BAD_GATEWAY,
            Self::Storage { .. }
            | Self::Persistence(_)
            | Self::Configuration { .. }
            | Self::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
