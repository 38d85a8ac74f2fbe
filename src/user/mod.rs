//! Registered users and their profiles.
//!
//! A user is identified by username and carries two profiles: the basic
//! profile shown in the feed and the GitHub profile mirrored at registration.

mod registration;

pub use registration::UserRegistration;

use serde::Serialize;

/// Generated identifier of a stored user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UserId(i64);

impl UserId {
    /// Wraps a raw row identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw row identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// Name, avatar, and self-description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BasicProfile {
    /// Username; unique across users.
    pub name: String,
    /// Avatar image URL.
    pub image: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
}

/// Public details mirrored from GitHub.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GithubProfile {
    /// Profile URL on GitHub.
    pub github_url: Option<String>,
    /// Company.
    pub company: Option<String>,
    /// Location.
    pub location: Option<String>,
    /// Personal website or blog.
    pub website: Option<String>,
    /// Twitter handle.
    pub twitter: Option<String>,
}

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Generated identifier.
    pub id: UserId,
    /// Basic profile.
    pub basic_profile: BasicProfile,
    /// GitHub profile.
    pub github_profile: GithubProfile,
}

impl User {
    /// Returns the username.
    #[must_use]
    pub fn name(&self) -> &str {
        self.basic_profile.name.as_str()
    }
}

/// A user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Basic profile; `name` is the upsert key.
    pub basic_profile: BasicProfile,
    /// GitHub profile.
    pub github_profile: GithubProfile,
}
