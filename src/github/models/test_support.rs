//! Test helpers for constructing repository fixtures.
//!
//! ```
//! use pickgit::github::models::test_support::repository;
//!
//! let metadata = repository("pick-git");
//! assert_eq!(metadata.name, "pick-git");
//! ```

use super::RepositoryMetadata;

/// Constructs a `RepositoryMetadata` with only the name and URL set.
#[must_use]
pub fn repository(name: &str) -> RepositoryMetadata {
    RepositoryMetadata {
        name: name.to_owned(),
        url: Some(format!("https://github.com/jipark3/{name}")),
        ..Default::default()
    }
}

/// Builds the JSON GitHub returns for a repository, for mock servers.
#[must_use]
pub fn repository_json(owner: &str, name: &str, stars: u64) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "full_name": format!("{owner}/{name}"),
        "description": format!("{name} description"),
        "language": "Rust",
        "html_url": format!("https://github.com/{owner}/{name}"),
        "stargazers_count": stars,
        "forks_count": 0
    })
}
