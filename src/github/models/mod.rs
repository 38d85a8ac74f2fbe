//! Data models representing repositories and profiles returned by GitHub.
//!
//! Types prefixed with `Api` are internal deserialisation targets that convert
//! into public domain types.

use serde::{Deserialize, Serialize};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Repository metadata relayed to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepositoryMetadata {
    /// Repository name.
    pub name: String,
    /// `owner/name`.
    pub full_name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Primary language.
    pub language: Option<String>,
    /// HTML URL.
    pub url: Option<String>,
    /// Star count.
    pub stars: u64,
    /// Fork count.
    pub forks: u64,
}

/// Profile of the account that owns an access token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GithubUserProfile {
    /// Login name.
    pub login: String,
    /// Avatar URL.
    pub avatar_url: Option<String>,
    /// Bio.
    pub bio: Option<String>,
    /// Profile URL.
    pub html_url: Option<String>,
    /// Company.
    pub company: Option<String>,
    /// Location.
    pub location: Option<String>,
    /// Blog or website.
    pub blog: Option<String>,
    /// Twitter handle.
    pub twitter_username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiRepository {
    pub(super) name: String,
    pub(super) full_name: Option<String>,
    pub(super) description: Option<String>,
    pub(super) language: Option<String>,
    pub(super) html_url: Option<String>,
    #[serde(default)]
    pub(super) stargazers_count: u64,
    #[serde(default)]
    pub(super) forks_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiRepositorySearch {
    #[serde(default)]
    pub(super) items: Vec<ApiRepository>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUserProfile {
    pub(super) login: String,
    pub(super) avatar_url: Option<String>,
    pub(super) bio: Option<String>,
    pub(super) html_url: Option<String>,
    pub(super) company: Option<String>,
    pub(super) location: Option<String>,
    pub(super) blog: Option<String>,
    pub(super) twitter_username: Option<String>,
}

impl From<ApiRepository> for RepositoryMetadata {
    fn from(value: ApiRepository) -> Self {
        Self {
            name: value.name,
            full_name: value.full_name,
            description: value.description,
            language: value.language,
            url: value.html_url,
            stars: value.stargazers_count,
            forks: value.forks_count,
        }
    }
}

impl From<ApiUserProfile> for GithubUserProfile {
    fn from(value: ApiUserProfile) -> Self {
        // GitHub reports an unset blog as an empty string.
        let blog = value.blog.filter(|blog| !blog.trim().is_empty());
        Self {
            login: value.login,
            avatar_url: value.avatar_url,
            bio: value.bio,
            html_url: value.html_url,
            company: value.company,
            location: value.location,
            blog,
            twitter_username: value.twitter_username,
        }
    }
}
