//! Local persistence and database migrations.
//!
//! Users, posts, images, tags, and comments live in a sqlite database. The
//! schema is managed with Diesel migrations so the database can be created
//! and upgraded the same way on every machine.

mod connection;
mod error;
mod migrator;
mod store;

pub use error::PersistenceError;
pub use migrator::{
    CURRENT_SCHEMA_VERSION, MigrationReport, SCHEMA_TABLES, SchemaVersion, migrate_database,
};
pub use store::{PostStore, SqliteStore, UserStore};

#[cfg(test)]
pub use store::{MockPostStore, MockUserStore};
