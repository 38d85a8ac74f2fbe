//! Comment content validation.

use crate::error::PickGitError;

/// Trimmed comments must be shorter than this many characters.
pub const MAX_COMMENT_LENGTH: usize = 100;

/// Comment content that passed validation.
///
/// The content is kept exactly as supplied; only the length and blank checks
/// look at the trimmed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentContent(String);

impl CommentContent {
    /// Validates comment content.
    ///
    /// # Errors
    ///
    /// Returns [`PickGitError::CommentFormat`] when the content is missing,
    /// blank, or at least [`MAX_COMMENT_LENGTH`] characters once trimmed.
    pub fn parse(content: Option<&str>) -> Result<Self, PickGitError> {
        let Some(raw) = content else {
            return Err(PickGitError::CommentFormat);
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.chars().count() >= MAX_COMMENT_LENGTH {
            return Err(PickGitError::CommentFormat);
        }

        Ok(Self(raw.to_owned()))
    }

    /// Borrow the content.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Consumes the wrapper and returns the content.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Validates a single comment string.
///
/// # Errors
///
/// See [`CommentContent::parse`].
pub fn validate_comment(content: Option<&str>) -> Result<CommentContent, PickGitError> {
    CommentContent::parse(content)
}
