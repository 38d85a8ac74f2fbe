//! Embedded schema migrations for the pickgit database.
//!
//! Migrations ship inside the binary. After the pending ones run, every
//! pickgit table must be present; the newest applied version is then reported
//! alongside the number of migrations this run applied.

use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::telemetry::{TelemetryEvent, TelemetrySink};

use super::PersistenceError;
use super::connection::{establish_connection, table_exists};

/// Embedded Diesel migrations shipped with the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Schema version expected by this build.
pub const CURRENT_SCHEMA_VERSION: &str = "20260901000000";

/// Tables making up the pickgit schema, parents before children.
pub const SCHEMA_TABLES: [&str; 5] = ["users", "posts", "post_images", "post_tags", "comments"];

/// A Diesel migration version string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaVersion(String);

impl SchemaVersion {
    /// Returns the inner version string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// What a call to [`migrate_database`] left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    schema_version: SchemaVersion,
    applied_migrations: usize,
}

impl MigrationReport {
    /// Newest migration version recorded in the database.
    #[must_use]
    pub const fn schema_version(&self) -> &SchemaVersion {
        &self.schema_version
    }

    /// Migrations applied by this run; zero when the schema was current.
    #[must_use]
    pub const fn applied_migrations(&self) -> usize {
        self.applied_migrations
    }
}

/// Brings the database at `database_url` up to the current pickgit schema.
///
/// # Errors
///
/// Returns [`PersistenceError`] when the database cannot be opened, a
/// migration fails, a pickgit table is still missing afterwards, or the
/// applied versions cannot be read.
pub fn migrate_database(
    database_url: &str,
    telemetry: &dyn TelemetrySink,
) -> Result<MigrationReport, PersistenceError> {
    let mut connection = establish_connection(database_url)?;

    let applied_migrations = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|error| PersistenceError::MigrationFailed {
            message: error.to_string(),
        })?
        .len();

    ensure_schema_tables(&mut connection)?;
    let schema_version = newest_applied_version(&mut connection)?;

    tracing::info!(
        schema_version = schema_version.as_str(),
        applied_migrations,
        "database migrated"
    );
    telemetry.record(TelemetryEvent::DatabaseMigrated {
        schema_version: schema_version.as_str().to_owned(),
        applied_migrations,
    });

    Ok(MigrationReport {
        schema_version,
        applied_migrations,
    })
}

fn ensure_schema_tables(connection: &mut SqliteConnection) -> Result<(), PersistenceError> {
    for table in SCHEMA_TABLES {
        let present =
            table_exists(connection, table).map_err(|error| PersistenceError::QueryFailed {
                message: format!("checking for table `{table}`: {error}"),
            })?;
        if !present {
            return Err(PersistenceError::MigrationFailed {
                message: format!("table `{table}` is missing after migrations ran"),
            });
        }
    }
    Ok(())
}

fn newest_applied_version(
    connection: &mut SqliteConnection,
) -> Result<SchemaVersion, PersistenceError> {
    let applied = connection.applied_migrations().map_err(|error| {
        PersistenceError::SchemaVersionQueryFailed {
            message: error.to_string(),
        }
    })?;

    applied
        .into_iter()
        .max()
        .map(|version| SchemaVersion(version.to_string()))
        .ok_or(PersistenceError::MissingSchemaVersion)
}
