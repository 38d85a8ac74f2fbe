//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.pickgit.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `PICKGIT_USERNAME`, `PICKGIT_TOKEN`, or
//!    legacy `GITHUB_TOKEN`
//! 4. **Command-line arguments** – `--username`/`-u`, `--token`/`-t`, ...
//!
//! # Configuration File
//!
//! ```toml
//! token = "ghp_example"
//! username = "jipark3"
//! database_url = "pickgit.sqlite"
//! api_base = "https://api.github.com"
//! image_dir = "images"
//! image_base_url = "https://images.example"
//! ```

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::auth::AppUser;
use crate::error::PickGitError;
use crate::github::DEFAULT_API_BASE;
use crate::persistence::PersistenceError;
use crate::post::PostId;

const DEFAULT_IMAGE_DIR: &str = "images";
const DEFAULT_IMAGE_BASE_URL: &str = "/images";
const DEFAULT_SEARCH_LIMIT: u8 = 10;

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Apply database migrations and exit.
    MigrateDatabase,
    /// Register the owner of the token as a user.
    RegisterUser,
    /// Add a comment to a post.
    AddComment,
    /// Show a single post.
    ShowPost,
    /// Search repositories by keyword.
    SearchRepositories,
    /// Write a post.
    WritePost,
    /// List the repositories of a user.
    ListRepositories,
    /// Nothing to do; print usage.
    Usage,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use pickgit::PickGitConfig;
///
/// let config = PickGitConfig::load().expect("failed to load configuration");
/// let mode = config.operation_mode();
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PICKGIT",
    discovery(
        dotfile_name = ".pickgit.toml",
        config_file_name = "pickgit.toml",
        app_name = "pickgit"
    )
)]
pub struct PickGitConfig {
    /// GitHub OAuth access token.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `PICKGIT_TOKEN` or `GITHUB_TOKEN` (legacy)
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Username of the caller, or the owner whose repositories are listed.
    #[ortho_config(cli_short = 'u')]
    pub username: Option<String>,

    /// Local sqlite database path used for persistence.
    #[ortho_config()]
    pub database_url: Option<String>,

    /// Runs database migrations and exits.
    #[ortho_config()]
    pub migrate_db: bool,

    /// Base URL of the GitHub-compatible REST API.
    #[ortho_config()]
    pub api_base: String,

    /// Directory uploaded images are written to.
    #[ortho_config(cli_short = 'D')]
    pub image_dir: String,

    /// Public base URL stored image references start with.
    #[ortho_config(cli_short = 'B')]
    pub image_base_url: String,

    /// Registers the owner of the token as a user.
    #[ortho_config(cli_short = 'R')]
    pub register: bool,

    /// Repository name keyword to search for.
    #[ortho_config(cli_short = 'k')]
    pub keyword: Option<String>,

    /// Zero-based search page.
    #[ortho_config(cli_short = 'P')]
    pub page: u32,

    /// Search page size (1 to 100).
    #[ortho_config()]
    pub limit: u8,

    /// Post to show or comment on.
    #[ortho_config(cli_short = 'p')]
    pub post_id: Option<i64>,

    /// Comment content to add to `post_id`.
    #[ortho_config(cli_short = 'c')]
    pub comment: Option<String>,

    /// Content of a new post.
    #[ortho_config(cli_short = 'C')]
    pub content: Option<String>,

    /// Repository URL linked to a new post.
    #[ortho_config(cli_short = 'r')]
    pub repo_url: Option<String>,

    /// Comma-separated tags of a new post.
    #[ortho_config(cli_short = 'T')]
    pub tags: Option<String>,

    /// Comma-separated image file paths of a new post.
    #[ortho_config(cli_short = 'i')]
    pub images: Option<String>,

    /// Acts as an unregistered guest.
    #[ortho_config(cli_short = 'g')]
    pub guest: bool,
}

impl Default for PickGitConfig {
    fn default() -> Self {
        Self {
            token: None,
            username: None,
            database_url: None,
            migrate_db: false,
            api_base: DEFAULT_API_BASE.to_owned(),
            image_dir: DEFAULT_IMAGE_DIR.to_owned(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_owned(),
            register: false,
            keyword: None,
            page: 0,
            limit: DEFAULT_SEARCH_LIMIT,
            post_id: None,
            comment: None,
            content: None,
            repo_url: None,
            tags: None,
            images: None,
            guest: false,
        }
    }
}

impl PickGitConfig {
    /// Resolves the token from configuration or the legacy `GITHUB_TOKEN`
    /// environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`PickGitError::MissingToken`] when no token source provides a
    /// value.
    pub fn resolve_token(&self) -> Result<String, PickGitError> {
        self.optional_token().ok_or(PickGitError::MissingToken)
    }

    /// Returns the configured token, falling back to `GITHUB_TOKEN`.
    #[must_use]
    pub fn optional_token(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
    }

    /// Returns the username or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`PickGitError::Configuration`] when no username is configured.
    pub fn require_username(&self) -> Result<&str, PickGitError> {
        self.username
            .as_deref()
            .ok_or_else(|| PickGitError::Configuration {
                message: "username is required (use --username or -u)".to_owned(),
            })
    }

    /// Returns the database URL or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`PickGitError::Configuration`] when no database URL is
    /// configured.
    pub fn require_database_url(&self) -> Result<&str, PickGitError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| PickGitError::Configuration {
                message: PersistenceError::MissingDatabaseUrl.to_string(),
            })
    }

    /// Returns the post identifier or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`PickGitError::Configuration`] when no post id is configured.
    pub fn require_post_id(&self) -> Result<PostId, PickGitError> {
        self.post_id
            .map(PostId::new)
            .ok_or_else(|| PickGitError::Configuration {
                message: "post id is required (use --post-id or -p)".to_owned(),
            })
    }

    /// Builds the caller identity.
    ///
    /// # Errors
    ///
    /// Returns [`PickGitError::Configuration`] or
    /// [`PickGitError::MissingToken`] when a registered caller lacks a
    /// username or token.
    pub fn app_user(&self) -> Result<AppUser, PickGitError> {
        if self.guest {
            return Ok(AppUser::Guest);
        }
        Ok(AppUser::registered(
            self.require_username()?,
            self.resolve_token()?,
        ))
    }

    /// Tags split on commas.
    #[must_use]
    pub fn tag_list(&self) -> Vec<String> {
        split_list(self.tags.as_deref())
    }

    /// Image paths split on commas.
    #[must_use]
    pub fn image_paths(&self) -> Vec<String> {
        split_list(self.images.as_deref())
    }

    /// Determines the operation mode based on provided configuration.
    ///
    /// Flags are checked in a fixed order: migrations, registration,
    /// comments, post display, search, post writing, and finally repository
    /// listing.
    #[must_use]
    pub fn operation_mode(&self) -> OperationMode {
        if self.migrate_db {
            OperationMode::MigrateDatabase
        } else if self.register {
            OperationMode::RegisterUser
        } else if self.post_id.is_some() && self.comment.is_some() {
            OperationMode::AddComment
        } else if self.post_id.is_some() {
            OperationMode::ShowPost
        } else if self.keyword.is_some() {
            OperationMode::SearchRepositories
        } else if self.content.is_some() || self.images.is_some() || self.repo_url.is_some() {
            OperationMode::WritePost
        } else if self.username.is_some() {
            OperationMode::ListRepositories
        } else {
            OperationMode::Usage
        }
    }
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests;
