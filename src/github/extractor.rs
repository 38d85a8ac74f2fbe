//! High-level repository extraction facade used by the post service.

use crate::error::PickGitError;

use super::gateway::RepositoryGateway;
use super::locator::{AccessToken, GithubUsername, RepositoryLocator};
use super::models::RepositoryMetadata;
use super::search::RepositorySearchQuery;

/// Turns tokens, usernames, and repository URLs into repository metadata.
///
/// Nothing is cached: every call queries the gateway again.
pub struct RepositoryExtractor<'client, Gateway>
where
    Gateway: RepositoryGateway + ?Sized,
{
    client: &'client Gateway,
}

impl<'client, Gateway> RepositoryExtractor<'client, Gateway>
where
    Gateway: RepositoryGateway + ?Sized,
{
    /// Create a new extractor using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// List the repositories owned by `username`.
    ///
    /// # Errors
    ///
    /// Returns [`PickGitError::MissingToken`] without calling GitHub when the
    /// token is absent, and propagates gateway failures unchanged: a rejected
    /// token surfaces as [`PickGitError::Authentication`] and an unknown user
    /// as [`PickGitError::NotFound`].
    pub async fn list_repositories(
        &self,
        token: Option<&str>,
        username: &str,
    ) -> Result<Vec<RepositoryMetadata>, PickGitError> {
        let access_token = AccessToken::from_optional(token)?;
        let login = GithubUsername::new(username)?;
        self.client.user_repositories(&access_token, &login).await
    }

    /// Search repositories by keyword.
    ///
    /// # Errors
    ///
    /// Returns [`PickGitError::MissingToken`] when the token is absent, before
    /// any request is made; otherwise propagates gateway failures.
    pub async fn search_repositories(
        &self,
        token: Option<&str>,
        query: &RepositorySearchQuery,
    ) -> Result<Vec<RepositoryMetadata>, PickGitError> {
        let access_token = AccessToken::from_optional(token)?;
        self.client.search_repositories(&access_token, query).await
    }

    /// Resolve the repository a post links to.
    ///
    /// Returns `Ok(None)` when no URL, or a blank one, was supplied.
    ///
    /// # Errors
    ///
    /// Returns [`PickGitError::InvalidUrl`] for unparseable URLs,
    /// [`PickGitError::MissingToken`] for absent tokens, and propagates
    /// gateway failures.
    pub async fn extract_for_post(
        &self,
        token: Option<&str>,
        repo_url: Option<&str>,
    ) -> Result<Option<RepositoryMetadata>, PickGitError> {
        let Some(url) = repo_url.filter(|url| !url.trim().is_empty()) else {
            return Ok(None);
        };

        let locator = RepositoryLocator::parse(url)?;
        let access_token = AccessToken::from_optional(token)?;
        self.client
            .repository(&access_token, &locator)
            .await
            .map(Some)
    }
}
