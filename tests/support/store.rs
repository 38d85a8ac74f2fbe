//! Migrated `SQLite` stores seeded with registered users.

use diesel::sql_types::Text;
use diesel::sqlite::SqliteConnection;
use diesel::{Connection, QueryableByName, RunQueryDsl, sql_query};
use pickgit::SqliteStore;
use pickgit::persistence::{UserStore, migrate_database};
use pickgit::telemetry::NoopTelemetrySink;
use pickgit::user::{BasicProfile, GithubProfile, NewUser, User};
use tempfile::TempDir;

/// Creates a migrated database inside `temp_dir`.
///
/// # Panics
///
/// Panics when migrations fail.
pub fn migrated_store(temp_dir: &TempDir) -> SqliteStore {
    let database_url = super::database_url_in(temp_dir);
    migrate_database(&database_url, &NoopTelemetrySink)
        .unwrap_or_else(|error| panic!("migration failed: {error}"));
    SqliteStore::new(database_url).unwrap_or_else(|error| panic!("store failed to open: {error}"))
}

/// Registers `name` with a minimal profile.
///
/// # Panics
///
/// Panics when the user cannot be saved.
pub fn register_user(store: &SqliteStore, name: &str) -> User {
    store
        .save_user(&NewUser {
            basic_profile: BasicProfile {
                name: name.to_owned(),
                image: Some(format!("https://avatars.example/{name}.png")),
                description: None,
            },
            github_profile: GithubProfile {
                github_url: Some(format!("https://github.com/{name}")),
                ..GithubProfile::default()
            },
        })
        .unwrap_or_else(|error| panic!("failed to register {name}: {error}"))
}

/// Names of the tables in the database at `database_url`, sorted.
///
/// # Panics
///
/// Panics when the database cannot be opened or inspected.
pub fn table_names(database_url: &str) -> Vec<String> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let mut connection = SqliteConnection::establish(database_url)
        .unwrap_or_else(|error| panic!("failed to open {database_url}: {error}"));
    sql_query("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name;")
        .load::<TableName>(&mut connection)
        .unwrap_or_else(|error| panic!("failed to list tables: {error}"))
        .into_iter()
        .map(|table| table.name)
        .collect()
}
