//! Shared test utilities.

use tempfile::TempDir;

pub mod cli;
pub mod runtime;
pub mod store;

/// Creates a temporary directory for database and image tests.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
pub fn create_temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|error| panic!("failed to create temporary directory: {error}"))
}

/// `SQLite` database URL for a `pickgit.sqlite` file inside `temp_dir`.
pub fn database_url_in(temp_dir: &TempDir) -> String {
    temp_dir
        .path()
        .join("pickgit.sqlite")
        .to_string_lossy()
        .to_string()
}
