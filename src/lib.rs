//! Pickgit library crate: the core of a developer social feed.
//!
//! Users write posts with images, tags, and a linked GitHub repository, and
//! comment on each other's posts. Repository metadata is relayed from a
//! GitHub-compatible API through Octocrab; users, posts, and comments are
//! stored in a local sqlite database.

pub mod auth;
pub mod config;
pub mod error;
pub mod github;
pub mod persistence;
pub mod post;
pub mod storage;
pub mod telemetry;
pub mod user;

pub use auth::AppUser;
pub use config::{OperationMode, PickGitConfig};
pub use error::{PickGitError, Resource};
pub use github::{
    AccessToken, OctocrabPlatformGateway, RepositoryExtractor, RepositoryLocator,
    RepositoryMetadata, RepositorySearchQuery,
};
pub use persistence::SqliteStore;
pub use post::{
    AddCommentRequest, CommentResponse, PostId, PostResponse, PostService, RepositoriesRequest,
    SearchRepositoriesRequest, WritePostRequest, validate_comment,
};
pub use storage::{ImageStorage, ImageUpload, LocalImageStorage};
pub use user::UserRegistration;
