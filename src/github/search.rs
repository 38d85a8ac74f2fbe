//! Keyword search parameters for repository listing.

use crate::error::PickGitError;

use super::locator::GithubUsername;

/// Largest page size GitHub accepts.
pub const MAX_SEARCH_LIMIT: u8 = 100;

/// Keyword search over repositories.
///
/// `page` is 0-based, as exposed to pickgit callers; GitHub pages start at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySearchQuery {
    keyword: String,
    page: u32,
    limit: u8,
    owner: Option<GithubUsername>,
}

impl RepositorySearchQuery {
    /// Validates a search.
    ///
    /// # Errors
    ///
    /// Returns [`PickGitError::InvalidInput`] for a blank keyword and
    /// [`PickGitError::InvalidPagination`] when `limit` is outside
    /// `1..=100` or `page` overflows.
    pub fn new(keyword: &str, page: u32, limit: u8) -> Result<Self, PickGitError> {
        let trimmed = keyword.trim();
        if trimmed.is_empty() {
            return Err(PickGitError::InvalidInput {
                message: "search keyword must not be blank".to_owned(),
            });
        }

        if limit == 0 {
            return Err(PickGitError::InvalidPagination {
                message: "limit must be at least 1".to_owned(),
            });
        }

        if limit > MAX_SEARCH_LIMIT {
            return Err(PickGitError::InvalidPagination {
                message: format!("limit must not exceed {MAX_SEARCH_LIMIT}"),
            });
        }

        if page == u32::MAX {
            return Err(PickGitError::InvalidPagination {
                message: "page is out of range".to_owned(),
            });
        }

        Ok(Self {
            keyword: trimmed.to_owned(),
            page,
            limit,
            owner: None,
        })
    }

    /// Restricts the search to repositories owned by `owner`.
    #[must_use]
    pub fn owned_by(mut self, owner: GithubUsername) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Keyword as supplied, trimmed.
    #[must_use]
    pub const fn keyword(&self) -> &str {
        self.keyword.as_str()
    }

    /// 0-based page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Page size.
    #[must_use]
    pub const fn limit(&self) -> u8 {
        self.limit
    }

    /// Owner restriction, when set.
    #[must_use]
    pub const fn owner(&self) -> Option<&GithubUsername> {
        self.owner.as_ref()
    }

    /// 1-based page number for the GitHub API.
    #[must_use]
    pub const fn api_page(&self) -> u32 {
        self.page.saturating_add(1)
    }

    /// GitHub search expression, matching repository names.
    #[must_use]
    pub fn qualifier(&self) -> String {
        match &self.owner {
            Some(owner) => format!("{} in:name user:{}", self.keyword, owner.as_str()),
            None => format!("{} in:name", self.keyword),
        }
    }
}
