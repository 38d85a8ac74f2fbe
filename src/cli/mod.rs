//! CLI operation mode handlers.
//!
//! - [`migrations`]: Database schema migrations
//! - [`users`]: Registration of the token owner
//! - [`repositories`]: Repository listing and search
//! - [`posts`]: Writing, showing, and commenting on posts
//!
//! Output formatting utilities are in [`output`].

use async_trait::async_trait;
use pickgit::github::{
    AccessToken, GithubUsername, RepositoryGateway, RepositoryLocator, RepositoryMetadata,
    RepositorySearchQuery,
};
use pickgit::{LocalImageStorage, OctocrabPlatformGateway, PickGitConfig, PickGitError, SqliteStore};

pub mod migrations;
pub mod output;
pub mod posts;
pub mod repositories;
pub mod users;

/// Builds the GitHub gateway for the configured API base.
///
/// # Errors
///
/// Returns [`PickGitError::InvalidUrl`] for an unusable API base.
pub fn gateway(config: &PickGitConfig) -> Result<OctocrabPlatformGateway, PickGitError> {
    OctocrabPlatformGateway::for_api_base(&config.api_base)
}

/// Repository gateway that resolves the configured API base on each call.
///
/// Post commands hold one of these so that only requests which actually
/// reach GitHub depend on a usable `api_base`.
pub struct DeferredGateway<'a> {
    api_base: &'a str,
}

impl<'a> DeferredGateway<'a> {
    /// Defers gateway construction for the configured API base.
    #[must_use]
    pub const fn new(config: &'a PickGitConfig) -> Self {
        Self {
            api_base: config.api_base.as_str(),
        }
    }

    fn resolve(&self) -> Result<OctocrabPlatformGateway, PickGitError> {
        OctocrabPlatformGateway::for_api_base(self.api_base)
    }
}

#[async_trait]
impl RepositoryGateway for DeferredGateway<'_> {
    async fn user_repositories(
        &self,
        token: &AccessToken,
        username: &GithubUsername,
    ) -> Result<Vec<RepositoryMetadata>, PickGitError> {
        self.resolve()?.user_repositories(token, username).await
    }

    async fn search_repositories(
        &self,
        token: &AccessToken,
        query: &RepositorySearchQuery,
    ) -> Result<Vec<RepositoryMetadata>, PickGitError> {
        self.resolve()?.search_repositories(token, query).await
    }

    async fn repository(
        &self,
        token: &AccessToken,
        locator: &RepositoryLocator,
    ) -> Result<RepositoryMetadata, PickGitError> {
        self.resolve()?.repository(token, locator).await
    }
}

/// Opens the store at the configured database URL.
///
/// # Errors
///
/// Returns [`PickGitError::Configuration`] when the URL is missing or blank.
pub fn store(config: &PickGitConfig) -> Result<SqliteStore, PickGitError> {
    let database_url = config.require_database_url()?;
    SqliteStore::new(database_url).map_err(|error| PickGitError::Configuration {
        message: error.to_string(),
    })
}

/// Builds image storage from the configured directory and base URL.
pub fn image_storage(config: &PickGitConfig) -> LocalImageStorage {
    LocalImageStorage::new(config.image_dir.as_str(), config.image_base_url.as_str())
}
