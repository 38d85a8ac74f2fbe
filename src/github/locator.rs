//! Identity wrappers and URL parsing for repository extraction.

use url::Url;

use crate::error::PickGitError;

/// Default GitHub REST API base.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// OAuth or personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`PickGitError::MissingToken`] when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, PickGitError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PickGitError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Validates an optional token, treating absence as a missing token.
    ///
    /// # Errors
    ///
    /// Returns [`PickGitError::MissingToken`] when the token is absent or blank.
    pub fn from_optional(token: Option<&str>) -> Result<Self, PickGitError> {
        token.map_or(Err(PickGitError::MissingToken), Self::new)
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("AccessToken(***)")
    }
}

/// GitHub login name.
///
/// Only path safety is checked locally; whether the account exists, or is
/// even a name GitHub would accept, is left to the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GithubUsername(String);

impl GithubUsername {
    /// Trims a login and checks it is safe to use as a single URL path
    /// segment, search qualifier, and directory name.
    ///
    /// # Errors
    ///
    /// Returns [`PickGitError::InvalidInput`] when the login is blank, is a
    /// dot segment, or contains separators, whitespace, or control
    /// characters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, PickGitError> {
        let trimmed = value.as_ref().trim();
        let is_safe = !trimmed.is_empty()
            && trimmed != "."
            && trimmed != ".."
            && !trimmed.chars().any(is_unsafe_login_char);

        if !is_safe {
            return Err(PickGitError::InvalidInput {
                message: format!("`{trimmed}` cannot be used as a GitHub username"),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the login.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for GithubUsername {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0)
    }
}

fn is_unsafe_login_char(ch: char) -> bool {
    matches!(ch, '/' | '\\' | '?' | '#' | '%') || ch.is_whitespace() || ch.is_control()
}

/// Owner and name of a repository referenced by a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    owner: String,
    name: String,
}

impl RepositoryLocator {
    /// Parses a repository URL such as
    /// `https://github.com/woowacourse-teams/2021-pick-git/`.
    ///
    /// Trailing path segments (`/tree/main`, `/pulls`) and a `.git` suffix are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PickGitError::InvalidUrl`] when the URL cannot be parsed or
    /// lacks the owner and repository segments.
    pub fn parse(input: &str) -> Result<Self, PickGitError> {
        let parsed =
            Url::parse(input.trim()).map_err(|error| PickGitError::InvalidUrl(error.to_string()))?;

        let mut segments = parsed
            .path_segments()
            .ok_or_else(|| PickGitError::InvalidUrl(format!("`{input}` has no path")))?
            .filter(|segment| !segment.is_empty());

        let (Some(owner), Some(raw_name)) = (segments.next(), segments.next()) else {
            return Err(PickGitError::InvalidUrl(format!(
                "`{input}` must match /<owner>/<repository>"
            )));
        };

        let name = raw_name.strip_suffix(".git").unwrap_or(raw_name);
        if name.is_empty() {
            return Err(PickGitError::InvalidUrl(format!(
                "`{input}` has an empty repository name"
            )));
        }

        Ok(Self {
            owner: owner.to_owned(),
            name: name.to_owned(),
        })
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &str {
        self.owner.as_str()
    }

    /// Repository name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// API path for the repository resource.
    #[must_use]
    pub fn repository_path(&self) -> String {
        format!("/repos/{}/{}", self.owner, self.name)
    }
}

/// Parses and normalises an API base URL.
///
/// # Errors
///
/// Returns [`PickGitError::InvalidUrl`] when the value is not an absolute
/// http(s) URL.
pub fn parse_api_base(input: &str) -> Result<Url, PickGitError> {
    let parsed =
        Url::parse(input.trim()).map_err(|error| PickGitError::InvalidUrl(error.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(PickGitError::InvalidUrl(format!(
            "API base `{input}` must use http or https"
        )));
    }
    Ok(parsed)
}
