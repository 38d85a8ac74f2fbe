//! Database migration operations.

use pickgit::persistence::{PersistenceError, migrate_database};
use pickgit::telemetry::StderrJsonlTelemetrySink;
use pickgit::{PickGitConfig, PickGitError};

/// Runs database migrations.
///
/// # Errors
///
/// Returns [`PickGitError::Configuration`] if the database URL is missing or
/// blank, and [`PickGitError::Persistence`] for connection or migration
/// failures.
pub fn run(config: &PickGitConfig) -> Result<(), PickGitError> {
    let database_url = config.require_database_url()?;

    let telemetry = StderrJsonlTelemetrySink;
    migrate_database(database_url, &telemetry)
        .map(drop)
        .map_err(map_persistence_error)
}

/// Maps a persistence error to an application error.
///
/// Configuration-related errors (blank URL) become
/// [`PickGitError::Configuration`]; runtime failures stay
/// [`PickGitError::Persistence`].
fn map_persistence_error(error: PersistenceError) -> PickGitError {
    if is_configuration_error(&error) {
        PickGitError::Configuration {
            message: error.to_string(),
        }
    } else {
        PickGitError::Persistence(error)
    }
}

/// Returns true if the persistence error is a configuration problem.
const fn is_configuration_error(error: &PersistenceError) -> bool {
    matches!(error, PersistenceError::BlankDatabaseUrl)
}
