//! Post assembly: writing posts, adding comments, and relaying repository
//! listings for the author.

use crate::error::{PickGitError, Resource};
use crate::github::{
    GithubUsername, RepositoryExtractor, RepositoryGateway, RepositoryMetadata,
    RepositorySearchQuery,
};
use crate::persistence::{PostStore, UserStore};
use crate::storage::{ImageStorage, ImageUpload};
use crate::telemetry::{TelemetryEvent, TelemetrySink};
use crate::user::User;

use super::comment::CommentContent;
use super::model::{CommentResponse, NewComment, NewPost, Post, PostId, PostResponse, Tags};

/// Input for [`PostService::write`].
#[derive(Debug, Clone, Default)]
pub struct WritePostRequest {
    /// Token used to resolve the linked repository.
    pub access_token: Option<String>,
    /// Author username.
    pub username: String,
    /// Images in display order.
    pub images: Vec<ImageUpload>,
    /// Linked repository URL.
    pub github_repo_url: Option<String>,
    /// Raw tags; normalised into a set.
    pub tags: Vec<String>,
    /// Free-text content.
    pub content: String,
}

/// Input for [`PostService::add_comment`].
#[derive(Debug, Clone)]
pub struct AddCommentRequest {
    /// Author username.
    pub username: String,
    /// Comment content as supplied.
    pub content: Option<String>,
    /// Post to comment on.
    pub post_id: PostId,
}

/// Input for [`PostService::show_repositories`].
#[derive(Debug, Clone, Default)]
pub struct RepositoriesRequest {
    /// GitHub access token.
    pub access_token: Option<String>,
    /// Owner whose repositories are listed.
    pub username: String,
}

/// Input for [`PostService::search_repositories`].
#[derive(Debug, Clone, Default)]
pub struct SearchRepositoriesRequest {
    /// GitHub access token.
    pub access_token: Option<String>,
    /// Restricts results to repositories owned by this user.
    pub owner: Option<String>,
    /// Name keyword.
    pub keyword: String,
    /// Zero-based page.
    pub page: u32,
    /// Page size.
    pub limit: u8,
}

/// Orchestrates users, images, repositories, and storage into posts and
/// comments.
pub struct PostService<'a> {
    users: &'a dyn UserStore,
    posts: &'a dyn PostStore,
    images: &'a dyn ImageStorage,
    repositories: RepositoryExtractor<'a, dyn RepositoryGateway + 'a>,
    telemetry: &'a dyn TelemetrySink,
}

impl<'a> PostService<'a> {
    /// Creates a service over the given collaborators.
    #[must_use]
    pub const fn new(
        users: &'a dyn UserStore,
        posts: &'a dyn PostStore,
        images: &'a dyn ImageStorage,
        gateway: &'a (dyn RepositoryGateway + 'a),
        telemetry: &'a dyn TelemetrySink,
    ) -> Self {
        Self {
            users,
            posts,
            images,
            repositories: RepositoryExtractor::new(gateway),
            telemetry,
        }
    }

    /// Stores a post for `request.username`.
    ///
    /// The author is looked up first, then the images are stored, then the
    /// linked repository is resolved, and finally the post with its images
    /// and tags is written in one transaction. Images stored by a write that
    /// fails afterwards are removed again.
    ///
    /// # Errors
    ///
    /// Returns [`PickGitError::NotFound`] for an unknown author, and
    /// propagates storage, repository, and persistence failures.
    pub async fn write(&self, request: WritePostRequest) -> Result<PostResponse, PickGitError> {
        let author = self.find_user(&request.username)?;
        let image_urls = self.images.store(&request.images, author.name())?;

        let result = self.publish(&author, request, image_urls.clone()).await;
        if result.is_err() {
            self.discard_images(&image_urls, author.name());
        }
        result
    }

    async fn publish(
        &self,
        author: &User,
        request: WritePostRequest,
        image_urls: Vec<String>,
    ) -> Result<PostResponse, PickGitError> {
        let repository = self
            .repositories
            .extract_for_post(
                request.access_token.as_deref(),
                request.github_repo_url.as_deref(),
            )
            .await?;

        let post = self.posts.save_post(&NewPost {
            user_id: author.id,
            image_urls,
            github_repo_url: request
                .github_repo_url
                .filter(|url| !url.trim().is_empty()),
            tags: request.tags.iter().collect::<Tags>(),
            content: request.content,
        })?;

        tracing::info!(post_id = post.id.get(), author = author.name(), "post written");
        self.telemetry.record(TelemetryEvent::PostPublished {
            post_id: post.id.get(),
            username: author.name().to_owned(),
            image_count: post.image_urls.len(),
            has_repository: post.github_repo_url.is_some(),
        });

        Ok(PostResponse::from_post(post, repository))
    }

    fn discard_images(&self, image_urls: &[String], username: &str) {
        if image_urls.is_empty() {
            return;
        }
        if let Err(error) = self.images.remove(image_urls, username) {
            tracing::warn!(%error, username, "failed to remove images of an unsaved post");
        }
    }

    /// Adds a comment to an existing post.
    ///
    /// # Errors
    ///
    /// Returns [`PickGitError::NotFound`] when the post or author does not
    /// exist and [`PickGitError::CommentFormat`] for invalid content. The
    /// post is checked before the content.
    pub fn add_comment(&self, request: AddCommentRequest) -> Result<CommentResponse, PickGitError> {
        let post = self.find_post(request.post_id)?;
        let content = CommentContent::parse(request.content.as_deref())?;
        let author = self.find_user(&request.username)?;

        let comment = self.posts.save_comment(&NewComment {
            post_id: post.id,
            author_id: author.id,
            content,
        })?;

        tracing::info!(
            post_id = post.id.get(),
            comment_id = comment.id.get(),
            "comment added"
        );
        self.telemetry.record(TelemetryEvent::CommentAdded {
            post_id: post.id.get(),
            comment_id: comment.id.get(),
        });

        Ok(CommentResponse::from(comment))
    }

    /// Lists the repositories owned by `request.username`.
    ///
    /// # Errors
    ///
    /// Propagates [`PickGitError::Authentication`] and
    /// [`PickGitError::NotFound`] from GitHub unchanged.
    pub async fn show_repositories(
        &self,
        request: &RepositoriesRequest,
    ) -> Result<Vec<RepositoryMetadata>, PickGitError> {
        self.repositories
            .list_repositories(request.access_token.as_deref(), &request.username)
            .await
    }

    /// Searches repositories by name keyword.
    ///
    /// # Errors
    ///
    /// Returns validation errors for the query and
    /// [`PickGitError::MissingToken`] without a token; otherwise propagates
    /// GitHub failures.
    pub async fn search_repositories(
        &self,
        request: &SearchRepositoriesRequest,
    ) -> Result<Vec<RepositoryMetadata>, PickGitError> {
        let mut query = RepositorySearchQuery::new(&request.keyword, request.page, request.limit)?;
        if let Some(owner) = request.owner.as_deref() {
            query = query.owned_by(GithubUsername::new(owner)?);
        }

        self.repositories
            .search_repositories(request.access_token.as_deref(), &query)
            .await
    }

    /// Loads a post with its images, tags, and comments.
    ///
    /// # Errors
    ///
    /// Returns [`PickGitError::NotFound`] when the post does not exist.
    pub fn read_post(&self, post_id: PostId) -> Result<PostResponse, PickGitError> {
        let post = self.find_post(post_id)?;
        Ok(PostResponse::from_post(post, None))
    }

    fn find_user(&self, username: &str) -> Result<User, PickGitError> {
        self.users
            .find_user_by_username(username)?
            .ok_or_else(|| PickGitError::not_found(Resource::User, username))
    }

    fn find_post(&self, post_id: PostId) -> Result<Post, PickGitError> {
        self.posts
            .find_post_by_id(post_id)?
            .ok_or_else(|| PickGitError::not_found(Resource::Post, post_id.get().to_string()))
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
