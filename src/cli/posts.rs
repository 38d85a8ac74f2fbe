//! Writing, showing, and commenting on posts.

use std::io::Write;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use pickgit::github::RepositoryGateway;
use pickgit::telemetry::StderrJsonlTelemetrySink;
use pickgit::{
    AddCommentRequest, ImageStorage, ImageUpload, PickGitConfig, PickGitError, PostService,
    SqliteStore, WritePostRequest,
};

use super::DeferredGateway;
use super::output::write_json;

/// Collaborators a post operation runs against.
pub struct PostContext<'a> {
    /// User and post store.
    pub store: &'a SqliteStore,
    /// Image storage.
    pub images: &'a dyn ImageStorage,
    /// GitHub gateway.
    pub gateway: &'a dyn RepositoryGateway,
}

impl PostContext<'_> {
    fn service(&self) -> PostService<'_> {
        PostService::new(
            self.store,
            self.store,
            self.images,
            self.gateway,
            &StderrJsonlTelemetrySink,
        )
    }
}

/// Writes a post as the configured user.
///
/// # Errors
///
/// Returns [`PickGitError::Authorization`] for guests, and propagates image,
/// GitHub, and persistence failures.
pub async fn write<W: Write>(config: &PickGitConfig, writer: &mut W) -> Result<(), PickGitError> {
    let store = super::store(config)?;
    let images = super::image_storage(config);
    let gateway = DeferredGateway::new(config);
    let context = PostContext {
        store: &store,
        images: &images,
        gateway: &gateway,
    };
    write_with(config, &context, writer).await
}

/// Adds a comment to the configured post.
///
/// # Errors
///
/// Returns [`PickGitError::Authorization`] for guests and
/// [`PickGitError::CommentFormat`] for invalid content.
pub fn add_comment<W: Write>(config: &PickGitConfig, writer: &mut W) -> Result<(), PickGitError> {
    let store = super::store(config)?;
    let images = super::image_storage(config);
    let gateway = DeferredGateway::new(config);
    let context = PostContext {
        store: &store,
        images: &images,
        gateway: &gateway,
    };
    add_comment_with(config, &context, writer)
}

/// Shows the configured post.
///
/// # Errors
///
/// Returns [`PickGitError::NotFound`] when the post does not exist.
pub fn show<W: Write>(config: &PickGitConfig, writer: &mut W) -> Result<(), PickGitError> {
    let store = super::store(config)?;
    let images = super::image_storage(config);
    let gateway = DeferredGateway::new(config);
    let context = PostContext {
        store: &store,
        images: &images,
        gateway: &gateway,
    };
    show_with(config, &context, writer)
}

/// Writes a post using the given collaborators.
pub async fn write_with<W: Write>(
    config: &PickGitConfig,
    context: &PostContext<'_>,
    writer: &mut W,
) -> Result<(), PickGitError> {
    let app_user = config.app_user()?;
    let (username, access_token) = app_user.require_registered()?;

    let images = config
        .image_paths()
        .iter()
        .map(|path| read_image(Utf8Path::new(path)))
        .collect::<Result<Vec<_>, _>>()?;

    let request = WritePostRequest {
        access_token: Some(access_token.to_owned()),
        username: username.to_owned(),
        images,
        github_repo_url: config.repo_url.clone(),
        tags: config.tag_list(),
        content: config.content.clone().unwrap_or_default(),
    };

    let response = context.service().write(request).await?;
    write_json(writer, &response)
}

/// Adds a comment using the given collaborators.
pub fn add_comment_with<W: Write>(
    config: &PickGitConfig,
    context: &PostContext<'_>,
    writer: &mut W,
) -> Result<(), PickGitError> {
    let app_user = config.app_user()?;
    let (username, _) = app_user.require_registered()?;

    let request = AddCommentRequest {
        username: username.to_owned(),
        content: config.comment.clone(),
        post_id: config.require_post_id()?,
    };

    let response = context.service().add_comment(request)?;
    write_json(writer, &response)
}

/// Shows a post using the given collaborators.
pub fn show_with<W: Write>(
    config: &PickGitConfig,
    context: &PostContext<'_>,
    writer: &mut W,
) -> Result<(), PickGitError> {
    let response = context.service().read_post(config.require_post_id()?)?;
    write_json(writer, &response)
}

/// Reads an image file into an upload.
fn read_image(path: &Utf8Path) -> Result<ImageUpload, PickGitError> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(|| PickGitError::Io {
        message: format!("invalid image path '{path}': no file name"),
    })?;

    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        PickGitError::Io {
            message: format!("failed to open image directory '{parent}': {error}"),
        }
    })?;
    let bytes = dir.read(file_name).map_err(|error| PickGitError::Io {
        message: format!("failed to read image '{path}': {error}"),
    })?;

    Ok(ImageUpload::new(file_name, bytes))
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
