//! Maps Octocrab failures onto [`PickGitError`].
//!
//! Remote 401/403 and 404 answers keep their meaning: the first becomes an
//! authentication error, the second a not-found error for the resource the
//! operation was looking up.

use http::StatusCode;

use crate::error::{PickGitError, Resource};

/// Checks if a GitHub error status indicates an authentication failure.
const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if an octocrab error represents a network/transport issue.
const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// A 403 carrying a rate-limit message is throttling, not a bad token.
fn is_rate_limit_error(source: &octocrab::GitHubError) -> bool {
    let is_rate_limit_status = matches!(
        source.status_code,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    );

    let message_indicates_rate_limit = source.message.to_lowercase().contains("rate limit")
        || source
            .documentation_url
            .as_deref()
            .is_some_and(|url| url.contains("rate-limit"));

    is_rate_limit_status && message_indicates_rate_limit
}

/// Maps an error raised while calling GitHub for `resource`.
pub(super) fn map_octocrab_error(
    operation: &str,
    resource: Resource,
    error: &octocrab::Error,
) -> PickGitError {
    if let octocrab::Error::GitHub { source, .. } = error {
        let status = source.status_code;
        let message = format!(
            "{operation} failed: GitHub returned {status} {message}",
            message = source.message
        );

        if is_rate_limit_error(source) {
            return PickGitError::Api {
                status: status.as_u16(),
                message,
            };
        }

        if is_auth_failure(status) {
            return PickGitError::Authentication { message };
        }

        if status == StatusCode::NOT_FOUND {
            return PickGitError::NotFound { resource, message };
        }

        return PickGitError::Api {
            status: status.as_u16(),
            message,
        };
    }

    if is_network_error(error) {
        return PickGitError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    PickGitError::Api {
        status: StatusCode::BAD_GATEWAY.as_u16(),
        message: format!("{operation} failed: {error}"),
    }
}

/// Maps an error raised while constructing the client.
pub(super) fn map_client_error(operation: &str, error: &dyn std::fmt::Display) -> PickGitError {
    PickGitError::Configuration {
        message: format!("{operation} failed: {error}"),
    }
}
