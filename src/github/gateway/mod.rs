//! Gateways for reading repositories and profiles through Octocrab.
//!
//! The traits are the seam the services depend on; tests substitute mocks
//! while [`OctocrabPlatformGateway`] performs real HTTP requests.

mod client;
mod error_mapping;
mod platform;

pub use platform::OctocrabPlatformGateway;

use async_trait::async_trait;

use crate::error::PickGitError;
use crate::github::locator::{AccessToken, GithubUsername, RepositoryLocator};
use crate::github::models::{GithubUserProfile, RepositoryMetadata};
use crate::github::search::RepositorySearchQuery;

/// Gateway for repository lookups on a GitHub-compatible API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositoryGateway: Send + Sync {
    /// List the public repositories owned by `username`.
    async fn user_repositories(
        &self,
        token: &AccessToken,
        username: &GithubUsername,
    ) -> Result<Vec<RepositoryMetadata>, PickGitError>;

    /// Search repositories by keyword.
    async fn search_repositories(
        &self,
        token: &AccessToken,
        query: &RepositorySearchQuery,
    ) -> Result<Vec<RepositoryMetadata>, PickGitError>;

    /// Fetch a single repository.
    async fn repository(
        &self,
        token: &AccessToken,
        locator: &RepositoryLocator,
    ) -> Result<RepositoryMetadata, PickGitError>;
}

/// Gateway for the profile of the token owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileGateway: Send + Sync {
    /// Fetch the profile of the account that owns `token`.
    async fn authenticated_profile(
        &self,
        token: &AccessToken,
    ) -> Result<GithubUserProfile, PickGitError>;
}
