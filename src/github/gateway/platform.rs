//! Octocrab implementation of the repository and profile gateways.

use async_trait::async_trait;
use octocrab::Octocrab;
use url::Url;

use crate::error::{PickGitError, Resource};
use crate::github::locator::{AccessToken, GithubUsername, RepositoryLocator, parse_api_base};
use crate::github::models::{
    ApiRepository, ApiRepositorySearch, ApiUserProfile, GithubUserProfile, RepositoryMetadata,
};
use crate::github::search::RepositorySearchQuery;

use super::client::build_octocrab_client;
use super::error_mapping::map_octocrab_error;
use super::{ProfileGateway, RepositoryGateway};

/// Page size used when listing a user's repositories.
const USER_REPOSITORIES_PER_PAGE: &str = "100";

/// Octocrab-backed gateway.
///
/// Tokens differ per caller, so a client is built for every request against
/// the configured API base.
#[derive(Debug, Clone)]
pub struct OctocrabPlatformGateway {
    api_base: Url,
}

impl OctocrabPlatformGateway {
    /// Creates a gateway for an already parsed API base.
    #[must_use]
    pub const fn new(api_base: Url) -> Self {
        Self { api_base }
    }

    /// Creates a gateway from an API base string such as
    /// `https://api.github.com`.
    ///
    /// # Errors
    ///
    /// Returns [`PickGitError::InvalidUrl`] when the base is not an absolute
    /// http(s) URL.
    pub fn for_api_base(api_base: &str) -> Result<Self, PickGitError> {
        parse_api_base(api_base).map(Self::new)
    }

    /// API base the gateway talks to.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    fn client(&self, token: &AccessToken) -> Result<Octocrab, PickGitError> {
        build_octocrab_client(token, &self.api_base)
    }
}

#[async_trait]
impl RepositoryGateway for OctocrabPlatformGateway {
    async fn user_repositories(
        &self,
        token: &AccessToken,
        username: &GithubUsername,
    ) -> Result<Vec<RepositoryMetadata>, PickGitError> {
        let client = self.client(token)?;
        let route = format!("/users/{}/repos", username.as_str());
        tracing::debug!(username = username.as_str(), "listing repositories");

        let repositories: Vec<ApiRepository> = client
            .get(route, Some(&[("per_page", USER_REPOSITORIES_PER_PAGE)]))
            .await
            .map_err(|error| map_octocrab_error("list repositories", Resource::User, &error))?;

        Ok(repositories
            .into_iter()
            .map(RepositoryMetadata::from)
            .collect())
    }

    async fn search_repositories(
        &self,
        token: &AccessToken,
        query: &RepositorySearchQuery,
    ) -> Result<Vec<RepositoryMetadata>, PickGitError> {
        let client = self.client(token)?;
        let qualifier = query.qualifier();
        let page = query.api_page().to_string();
        let per_page = query.limit().to_string();
        tracing::debug!(query = qualifier.as_str(), page = query.page(), "searching repositories");

        let params = [
            ("q", qualifier.as_str()),
            ("page", page.as_str()),
            ("per_page", per_page.as_str()),
        ];

        let result: ApiRepositorySearch = client
            .get("/search/repositories", Some(&params))
            .await
            .map_err(|error| map_octocrab_error("search repositories", Resource::User, &error))?;

        Ok(result
            .items
            .into_iter()
            .map(RepositoryMetadata::from)
            .collect())
    }

    async fn repository(
        &self,
        token: &AccessToken,
        locator: &RepositoryLocator,
    ) -> Result<RepositoryMetadata, PickGitError> {
        let client = self.client(token)?;
        tracing::debug!(
            owner = locator.owner(),
            repository = locator.name(),
            "fetching repository"
        );

        client
            .get::<ApiRepository, _, _>(locator.repository_path(), None::<&()>)
            .await
            .map(RepositoryMetadata::from)
            .map_err(|error| map_octocrab_error("fetch repository", Resource::Repository, &error))
    }
}

#[async_trait]
impl ProfileGateway for OctocrabPlatformGateway {
    async fn authenticated_profile(
        &self,
        token: &AccessToken,
    ) -> Result<GithubUserProfile, PickGitError> {
        let client = self.client(token)?;

        client
            .get::<ApiUserProfile, _, _>("/user", None::<&()>)
            .await
            .map(GithubUserProfile::from)
            .map_err(|error| map_octocrab_error("fetch profile", Resource::User, &error))
    }
}
