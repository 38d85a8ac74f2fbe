//! Image storage for post uploads.
//!
//! Uploaded files are written under a per-user directory with generated names
//! and referenced by URL from the stored post.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use uuid::Uuid;

use crate::error::PickGitError;
use crate::github::GithubUsername;

const DEFAULT_EXTENSION: &str = "bin";

/// An uploaded image awaiting storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Original file name; only its extension is kept.
    pub file_name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Creates an upload from a file name and its bytes.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// Persists image uploads and returns references to them.
#[cfg_attr(test, mockall::automock)]
pub trait ImageStorage: Send + Sync {
    /// Stores `images` for `username`, returning one reference per image in
    /// input order.
    ///
    /// # Errors
    ///
    /// Returns [`PickGitError::Storage`] when any file cannot be written.
    fn store(&self, images: &[ImageUpload], username: &str) -> Result<Vec<String>, PickGitError>;

    /// Deletes images previously returned by [`ImageStorage::store`] for
    /// `username`. References that no longer exist are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`PickGitError::Storage`] when a file cannot be deleted and
    /// [`PickGitError::InvalidInput`] for references this storage did not
    /// issue.
    fn remove(&self, references: &[String], username: &str) -> Result<(), PickGitError>;
}

/// Stores images on the local filesystem.
///
/// Files land in `<root>/<username>/<uuid>.<ext>` and are referenced as
/// `<base_url>/<username>/<uuid>.<ext>`.
#[derive(Debug, Clone)]
pub struct LocalImageStorage {
    root: Utf8PathBuf,
    base_url: String,
}

impl LocalImageStorage {
    /// Creates storage rooted at `root`, publishing references under
    /// `base_url`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>, base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        Self {
            root: root.into(),
            base_url: base.trim_end_matches('/').to_owned(),
        }
    }

    /// Returns the storage root directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn open_user_dir(&self, username: &GithubUsername) -> Result<Dir, PickGitError> {
        Dir::create_ambient_dir_all(&self.root, ambient_authority()).map_err(|error| {
            PickGitError::Storage {
                message: format!("failed to create image root '{}': {error}", self.root),
            }
        })?;
        let root = Dir::open_ambient_dir(&self.root, ambient_authority()).map_err(|error| {
            PickGitError::Storage {
                message: format!("failed to open image root '{}': {error}", self.root),
            }
        })?;

        root.create_dir_all(username.as_str())
            .map_err(|error| PickGitError::Storage {
                message: format!("failed to create image directory for {username}: {error}"),
            })?;
        root.open_dir(username.as_str())
            .map_err(|error| PickGitError::Storage {
                message: format!("failed to open image directory for {username}: {error}"),
            })
    }

    fn stored_file_name<'r>(
        &self,
        reference: &'r str,
        owner: &GithubUsername,
    ) -> Result<&'r str, PickGitError> {
        reference
            .strip_prefix(self.base_url.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .and_then(|rest| rest.strip_prefix(owner.as_str()))
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| !name.is_empty() && !name.contains('/') && *name != "..")
            .ok_or_else(|| PickGitError::InvalidInput {
                message: format!("`{reference}` is not an image stored for {owner}"),
            })
    }
}

impl ImageStorage for LocalImageStorage {
    fn store(&self, images: &[ImageUpload], username: &str) -> Result<Vec<String>, PickGitError> {
        if images.is_empty() {
            return Ok(Vec::new());
        }

        let owner = GithubUsername::new(username)?;
        let dir = self.open_user_dir(&owner)?;

        images
            .iter()
            .map(|image| {
                let stored_name = format!(
                    "{}.{}",
                    Uuid::new_v4(),
                    extension_of(image.file_name.as_str())
                );
                dir.write(stored_name.as_str(), &image.bytes)
                    .map_err(|error| PickGitError::Storage {
                        message: format!("failed to write image '{}': {error}", image.file_name),
                    })?;
                tracing::debug!(file = %stored_name, %owner, "stored image");
                Ok(format!("{}/{owner}/{stored_name}", self.base_url))
            })
            .collect()
    }

    fn remove(&self, references: &[String], username: &str) -> Result<(), PickGitError> {
        if references.is_empty() {
            return Ok(());
        }

        let owner = GithubUsername::new(username)?;
        let dir = self.open_user_dir(&owner)?;

        for reference in references {
            let file_name = self.stored_file_name(reference, &owner)?;
            match dir.remove_file(file_name) {
                Ok(()) => tracing::debug!(file = %file_name, %owner, "removed image"),
                Err(error) if error.kind() == io::ErrorKind::NotFound => {}
                Err(error) => {
                    return Err(PickGitError::Storage {
                        message: format!("failed to remove image '{file_name}': {error}"),
                    });
                }
            }
        }
        Ok(())
    }
}

fn extension_of(file_name: &str) -> String {
    Utf8Path::new(file_name)
        .extension()
        .filter(|ext| !ext.is_empty() && ext.chars().all(|ch| ch.is_ascii_alphanumeric()))
        .map_or_else(|| DEFAULT_EXTENSION.to_owned(), str::to_ascii_lowercase)
}
