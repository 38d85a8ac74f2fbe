//! Repository listing and search operations.

use std::io::Write;

use pickgit::github::{GithubUsername, RepositoryGateway};
use pickgit::{PickGitConfig, PickGitError, RepositoryExtractor, RepositorySearchQuery};

use super::output::write_repositories;

/// Lists the repositories of the configured user.
///
/// # Errors
///
/// Returns [`PickGitError::Configuration`] when the username is missing and
/// propagates GitHub failures.
pub async fn list<W: Write>(config: &PickGitConfig, writer: &mut W) -> Result<(), PickGitError> {
    let gateway = super::gateway(config)?;
    list_with_gateway(config, &gateway, writer).await
}

/// Searches repositories by the configured keyword.
///
/// # Errors
///
/// Returns validation errors for the query and propagates GitHub failures.
pub async fn search<W: Write>(config: &PickGitConfig, writer: &mut W) -> Result<(), PickGitError> {
    let gateway = super::gateway(config)?;
    search_with_gateway(config, &gateway, writer).await
}

/// Lists repositories using the given gateway.
///
/// This function is exposed for testing against a mock API.
pub async fn list_with_gateway<G, W>(
    config: &PickGitConfig,
    gateway: &G,
    writer: &mut W,
) -> Result<(), PickGitError>
where
    G: RepositoryGateway,
    W: Write,
{
    let username = config.require_username()?;
    let token = config.optional_token();

    let repositories = RepositoryExtractor::new(gateway)
        .list_repositories(token.as_deref(), username)
        .await?;

    write_repositories(writer, &format!("Repositories of {username}:"), &repositories)
}

/// Searches repositories using the given gateway.
///
/// This function is exposed for testing against a mock API.
pub async fn search_with_gateway<G, W>(
    config: &PickGitConfig,
    gateway: &G,
    writer: &mut W,
) -> Result<(), PickGitError>
where
    G: RepositoryGateway,
    W: Write,
{
    let keyword = config.keyword.as_deref().unwrap_or_default();
    let mut query = RepositorySearchQuery::new(keyword, config.page, config.limit)?;
    if let Some(owner) = config.username.as_deref() {
        query = query.owned_by(GithubUsername::new(owner)?);
    }
    let token = config.optional_token();

    let repositories = RepositoryExtractor::new(gateway)
        .search_repositories(token.as_deref(), &query)
        .await?;

    write_repositories(
        writer,
        &format!("Repositories matching `{keyword}` (page {}):", config.page),
        &repositories,
    )
}
