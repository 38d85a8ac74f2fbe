//! Registration of the token owner.

use std::io::Write;

use pickgit::github::ProfileGateway;
use pickgit::{PickGitConfig, PickGitError, SqliteStore, UserRegistration};

use super::output::write_json;

/// Registers the owner of the configured token and prints the stored user.
///
/// # Errors
///
/// Returns [`PickGitError::MissingToken`] without a token, and propagates
/// GitHub and persistence failures.
pub async fn register<W: Write>(config: &PickGitConfig, writer: &mut W) -> Result<(), PickGitError> {
    let gateway = super::gateway(config)?;
    let store = super::store(config)?;
    register_with(config, &gateway, &store, writer).await
}

/// Registers using the given gateway and store.
pub async fn register_with<G, W>(
    config: &PickGitConfig,
    gateway: &G,
    store: &SqliteStore,
    writer: &mut W,
) -> Result<(), PickGitError>
where
    G: ProfileGateway,
    W: Write,
{
    let token = config.resolve_token()?;
    let user = UserRegistration::new(gateway, store)
        .register(Some(token.as_str()))
        .await?;
    write_json(writer, &user)
}
