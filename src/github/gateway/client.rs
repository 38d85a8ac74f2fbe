//! Octocrab client construction.

use http::Uri;
use octocrab::Octocrab;
use url::Url;

use crate::error::PickGitError;
use crate::github::locator::AccessToken;

use super::error_mapping::map_client_error;

/// Builds an Octocrab client authenticated with `token` against `api_base`.
///
/// # Errors
///
/// Returns `PickGitError::InvalidUrl` when the base URI cannot be parsed or
/// `PickGitError::Api` when Octocrab fails to construct a client.
pub(super) fn build_octocrab_client(
    token: &AccessToken,
    api_base: &Url,
) -> Result<Octocrab, PickGitError> {
    let base_uri: Uri = api_base
        .as_str()
        .trim_end_matches('/')
        .parse::<Uri>()
        .map_err(|error| PickGitError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .personal_token(token.value())
        .base_uri(base_uri)
        .map_err(|error| map_client_error("build client", &error))?
        .build()
        .map_err(|error| map_client_error("build client", &error))
}
