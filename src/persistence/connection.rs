//! Shared `SQLite` connection setup.

use diesel::Connection;
use diesel::QueryableByName;
use diesel::RunQueryDsl;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Text};
use diesel::sqlite::SqliteConnection;

use super::PersistenceError;

/// Opens a connection to `database_url` with foreign keys enforced.
///
/// # Errors
///
/// Returns [`PersistenceError::BlankDatabaseUrl`] for blank URLs and
/// connection or PRAGMA failures otherwise.
pub(crate) fn establish_connection(
    database_url: &str,
) -> Result<SqliteConnection, PersistenceError> {
    let database_url_trimmed = database_url.trim();
    if database_url_trimmed.is_empty() {
        return Err(PersistenceError::BlankDatabaseUrl);
    }

    let mut connection = SqliteConnection::establish(database_url_trimmed).map_err(|error| {
        PersistenceError::ConnectionFailed {
            message: error.to_string(),
        }
    })?;

    sql_query("PRAGMA foreign_keys = ON;")
        .execute(&mut connection)
        .map(drop)
        .map_err(|error| PersistenceError::ForeignKeysEnableFailed {
            message: error.to_string(),
        })?;

    Ok(connection)
}

/// Reports whether `table` exists in the connected database.
pub(crate) fn table_exists(
    connection: &mut SqliteConnection,
    table: &str,
) -> Result<bool, diesel::result::Error> {
    #[derive(QueryableByName)]
    struct Found {
        #[diesel(sql_type = BigInt)]
        present: i64,
    }

    sql_query(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?) AS present;",
    )
    .bind::<Text, _>(table)
    .get_result::<Found>(connection)
    .map(|found| found.present != 0)
}
