//! Post and comment aggregates plus the projections returned to callers.

use serde::Serialize;

use crate::github::RepositoryMetadata;
use crate::user::UserId;

use super::comment::CommentContent;

/// Generated identifier of a stored post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PostId(i64);

impl PostId {
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

/// Generated identifier of a stored comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CommentId(i64);

impl CommentId {
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

/// Set of tags attached to a post.
///
/// Tags are trimmed, blanks are dropped, and duplicates collapse while the
/// first-occurrence order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tags(Vec<String>);

impl Tags {
    /// Returns the tags in first-occurrence order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns true when no tags are present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the set and returns the tags.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags: Vec<String> = Vec::new();
        for raw in iter {
            let tag = raw.as_ref().trim();
            if tag.is_empty() || tags.iter().any(|existing| existing == tag) {
                continue;
            }
            tags.push(tag.to_owned());
        }
        Self(tags)
    }
}

/// A post that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    /// Author.
    pub user_id: UserId,
    /// Stored image references, in upload order.
    pub image_urls: Vec<String>,
    /// Linked repository URL.
    pub github_repo_url: Option<String>,
    /// Tags.
    pub tags: Tags,
    /// Free-text content.
    pub content: String,
}

/// A stored comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Generated identifier.
    pub id: CommentId,
    /// Owning post.
    pub post_id: PostId,
    /// Author.
    pub author_id: UserId,
    /// Author username.
    pub author_name: String,
    /// Content as supplied.
    pub content: String,
}

/// A comment that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    /// Owning post.
    pub post_id: PostId,
    /// Author.
    pub author_id: UserId,
    /// Validated content.
    pub content: CommentContent,
}

/// A stored post with its images, tags, and comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Generated identifier.
    pub id: PostId,
    /// Author.
    pub author_id: UserId,
    /// Author username.
    pub author_name: String,
    /// Image references in upload order.
    pub image_urls: Vec<String>,
    /// Linked repository URL.
    pub github_repo_url: Option<String>,
    /// Tags.
    pub tags: Tags,
    /// Free-text content.
    pub content: String,
    /// Comments in insertion order.
    pub comments: Vec<Comment>,
}

/// Comment projection returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentResponse {
    /// Comment identifier.
    pub id: CommentId,
    /// Author username.
    pub author_name: String,
    /// Content.
    pub content: String,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            author_name: comment.author_name,
            content: comment.content,
        }
    }
}

/// Post projection returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostResponse {
    /// Post identifier.
    pub id: PostId,
    /// Image references in upload order.
    pub image_urls: Vec<String>,
    /// Linked repository URL.
    pub github_repo_url: Option<String>,
    /// Metadata of the linked repository when it was resolved.
    pub repository: Option<RepositoryMetadata>,
    /// Free-text content.
    pub content: String,
    /// Author username.
    pub author_name: String,
    /// Tags.
    pub tags: Vec<String>,
    /// Comments in insertion order.
    pub comments: Vec<CommentResponse>,
}

impl PostResponse {
    /// Projects a stored post, attaching resolved repository metadata.
    #[must_use]
    pub fn from_post(post: Post, repository: Option<RepositoryMetadata>) -> Self {
        Self {
            id: post.id,
            image_urls: post.image_urls,
            github_repo_url: post.github_repo_url,
            repository,
            content: post.content,
            author_name: post.author_name,
            tags: post.tags.into_vec(),
            comments: post
                .comments
                .into_iter()
                .map(CommentResponse::from)
                .collect(),
        }
    }
}
