//! GitHub repository extraction.
//!
//! This module wraps Octocrab to list, search, and resolve repositories on a
//! GitHub-compatible API and to read the profile behind an access token.
//! Remote failures are mapped onto [`crate::PickGitError`] so callers keep the
//! 401/404 meaning without handling Octocrab types.

pub mod extractor;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod search;

pub use extractor::RepositoryExtractor;
pub use gateway::{OctocrabPlatformGateway, ProfileGateway, RepositoryGateway};
pub use locator::{AccessToken, DEFAULT_API_BASE, GithubUsername, RepositoryLocator};
pub use models::{GithubUserProfile, RepositoryMetadata};
pub use search::{MAX_SEARCH_LIMIT, RepositorySearchQuery};

#[cfg(test)]
pub use gateway::{MockProfileGateway, MockRepositoryGateway};

#[cfg(test)]
mod tests;
