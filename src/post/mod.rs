//! Posts, comments, and the service that assembles them.

pub mod comment;
mod model;
mod service;

pub use comment::{CommentContent, MAX_COMMENT_LENGTH, validate_comment};
pub use model::{
    Comment, CommentId, CommentResponse, NewComment, NewPost, Post, PostId, PostResponse, Tags,
};
pub use service::{
    AddCommentRequest, PostService, RepositoriesRequest, SearchRepositoriesRequest,
    WritePostRequest,
};
