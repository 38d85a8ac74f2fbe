//! User, post, and comment storage backed by `SQLite`.
//!
//! The traits are the persistence seam used by the services. `SqliteStore`
//! implements both with short-lived Diesel connections; a post is written
//! together with its images and tags in one transaction.

mod rows;

use diesel::Connection;
use diesel::OptionalExtension;
use diesel::RunQueryDsl;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Nullable, Text};
use diesel::sqlite::SqliteConnection;

use crate::post::{Comment, CommentId, NewComment, NewPost, Post, PostId};
use crate::user::{NewUser, User};

use super::PersistenceError;
use super::connection::{establish_connection, table_exists};
use rows::{CommentRow, ImageRow, InsertedId, PostRow, TagRow, UserRow};

const POSTS_TABLE: &str = "posts";

/// Reads and writes users.
#[cfg_attr(test, mockall::automock)]
pub trait UserStore: Send + Sync {
    /// Finds a user by username.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the query fails.
    fn find_user_by_username(&self, username: &str) -> Result<Option<User>, PersistenceError>;

    /// Inserts a user, or refreshes the profiles of an existing username.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the write fails.
    fn save_user(&self, user: &NewUser) -> Result<User, PersistenceError>;
}

/// Reads and writes posts and their comments.
#[cfg_attr(test, mockall::automock)]
pub trait PostStore: Send + Sync {
    /// Finds a post, with images, tags, and comments, by id.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the query fails.
    fn find_post_by_id(&self, post_id: PostId) -> Result<Option<Post>, PersistenceError>;

    /// Stores a post with its images and tags atomically.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the write fails; nothing is stored
    /// in that case.
    fn save_post(&self, post: &NewPost) -> Result<Post, PersistenceError>;

    /// Stores a comment on an existing post.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the write fails.
    fn save_comment(&self, comment: &NewComment) -> Result<Comment, PersistenceError>;
}

/// SQLite-backed store.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    database_url: String,
}

impl SqliteStore {
    /// Create a store targeting the configured `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::BlankDatabaseUrl`] when the URL is blank.
    pub fn new(database_url: impl Into<String>) -> Result<Self, PersistenceError> {
        let database_url_string = database_url.into();
        if database_url_string.trim().is_empty() {
            return Err(PersistenceError::BlankDatabaseUrl);
        }
        Ok(Self {
            database_url: database_url_string,
        })
    }

    fn connection(&self) -> Result<SqliteConnection, PersistenceError> {
        establish_connection(&self.database_url)
    }

    fn load_user(
        connection: &mut SqliteConnection,
        username: &str,
    ) -> Result<Option<User>, diesel::result::Error> {
        sql_query(
            "SELECT id, username, image, description, github_url, company, location, website, \
             twitter \
             FROM users WHERE username = ? LIMIT 1;",
        )
        .bind::<Text, _>(username)
        .get_result::<UserRow>(connection)
        .optional()
        .map(|row| row.map(User::from))
    }

    fn load_post(
        connection: &mut SqliteConnection,
        post_id: i64,
    ) -> Result<Option<Post>, diesel::result::Error> {
        let Some(row) = sql_query(
            "SELECT p.id AS id, p.user_id AS user_id, u.username AS author_name, \
             p.content AS content, p.github_repo_url AS github_repo_url \
             FROM posts p JOIN users u ON u.id = p.user_id \
             WHERE p.id = ? LIMIT 1;",
        )
        .bind::<BigInt, _>(post_id)
        .get_result::<PostRow>(connection)
        .optional()?
        else {
            return Ok(None);
        };

        let images: Vec<ImageRow> = sql_query(
            "SELECT image_url FROM post_images WHERE post_id = ? ORDER BY position;",
        )
        .bind::<BigInt, _>(post_id)
        .load(connection)?;

        let tags: Vec<TagRow> =
            sql_query("SELECT tag FROM post_tags WHERE post_id = ? ORDER BY position;")
                .bind::<BigInt, _>(post_id)
                .load(connection)?;

        let comments: Vec<CommentRow> = sql_query(
            "SELECT c.id AS id, c.post_id AS post_id, c.user_id AS user_id, \
             u.username AS author_name, c.content AS content \
             FROM comments c JOIN users u ON u.id = c.user_id \
             WHERE c.post_id = ? ORDER BY c.id;",
        )
        .bind::<BigInt, _>(post_id)
        .load(connection)?;

        Ok(Some(row.into_post(
            images.into_iter().map(|image| image.image_url).collect(),
            tags.into_iter().map(|tag| tag.tag).collect(),
            comments.into_iter().map(Comment::from).collect(),
        )))
    }

    fn load_comment(
        connection: &mut SqliteConnection,
        comment_id: i64,
    ) -> Result<Option<Comment>, diesel::result::Error> {
        sql_query(
            "SELECT c.id AS id, c.post_id AS post_id, c.user_id AS user_id, \
             u.username AS author_name, c.content AS content \
             FROM comments c JOIN users u ON u.id = c.user_id \
             WHERE c.id = ? LIMIT 1;",
        )
        .bind::<BigInt, _>(comment_id)
        .get_result::<CommentRow>(connection)
        .optional()
        .map(|row| row.map(Comment::from))
    }

    fn last_insert_rowid(connection: &mut SqliteConnection) -> Result<i64, diesel::result::Error> {
        sql_query("SELECT last_insert_rowid() AS id;")
            .get_result::<InsertedId>(connection)
            .map(|row| row.id)
    }

    fn position_to_i64(position: usize) -> i64 {
        i64::try_from(position).unwrap_or(i64::MAX)
    }

    fn map_error_with_schema_check<F>(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
        create_error: F,
    ) -> PersistenceError
    where
        F: Fn(String) -> PersistenceError,
    {
        match table_exists(connection, POSTS_TABLE) {
            Ok(false) => PersistenceError::SchemaNotInitialised,
            Ok(true) => create_error(error.to_string()),
            Err(check_error) => create_error(format!(
                "schema presence check failed: {check_error}; original error: {error}"
            )),
        }
    }

    fn map_query_error(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
    ) -> PersistenceError {
        Self::map_error_with_schema_check(connection, error, |message| {
            PersistenceError::QueryFailed { message }
        })
    }

    fn map_write_error(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
    ) -> PersistenceError {
        Self::map_error_with_schema_check(connection, error, |message| {
            PersistenceError::WriteFailed { message }
        })
    }

    fn missing_after_write(entity: &str) -> PersistenceError {
        PersistenceError::WriteFailed {
            message: format!("{entity} was not readable after it was written"),
        }
    }
}

impl UserStore for SqliteStore {
    fn find_user_by_username(&self, username: &str) -> Result<Option<User>, PersistenceError> {
        let mut connection = self.connection()?;
        Self::load_user(&mut connection, username)
            .map_err(|error| Self::map_query_error(&mut connection, &error))
    }

    fn save_user(&self, user: &NewUser) -> Result<User, PersistenceError> {
        let mut connection = self.connection()?;
        let basic = &user.basic_profile;
        let github = &user.github_profile;

        sql_query(
            "INSERT INTO users \
             (username, image, description, github_url, company, location, website, twitter) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(username) DO UPDATE SET \
               image = excluded.image, \
               description = excluded.description, \
               github_url = excluded.github_url, \
               company = excluded.company, \
               location = excluded.location, \
               website = excluded.website, \
               twitter = excluded.twitter, \
               updated_at = CURRENT_TIMESTAMP;",
        )
        .bind::<Text, _>(basic.name.as_str())
        .bind::<Nullable<Text>, _>(basic.image.as_deref())
        .bind::<Nullable<Text>, _>(basic.description.as_deref())
        .bind::<Nullable<Text>, _>(github.github_url.as_deref())
        .bind::<Nullable<Text>, _>(github.company.as_deref())
        .bind::<Nullable<Text>, _>(github.location.as_deref())
        .bind::<Nullable<Text>, _>(github.website.as_deref())
        .bind::<Nullable<Text>, _>(github.twitter.as_deref())
        .execute(&mut connection)
        .map_err(|error| Self::map_write_error(&mut connection, &error))?;

        Self::load_user(&mut connection, basic.name.as_str())
            .map_err(|error| Self::map_query_error(&mut connection, &error))?
            .ok_or_else(|| Self::missing_after_write("user"))
    }
}

impl PostStore for SqliteStore {
    fn find_post_by_id(&self, post_id: PostId) -> Result<Option<Post>, PersistenceError> {
        let mut connection = self.connection()?;
        Self::load_post(&mut connection, post_id.get())
            .map_err(|error| Self::map_query_error(&mut connection, &error))
    }

    fn save_post(&self, post: &NewPost) -> Result<Post, PersistenceError> {
        let mut connection = self.connection()?;

        let stored = connection
            .transaction::<_, diesel::result::Error, _>(|transaction| {
                sql_query(
                    "INSERT INTO posts (user_id, content, github_repo_url) VALUES (?, ?, ?);",
                )
                .bind::<BigInt, _>(post.user_id.get())
                .bind::<Text, _>(post.content.as_str())
                .bind::<Nullable<Text>, _>(post.github_repo_url.as_deref())
                .execute(transaction)?;

                let post_id = Self::last_insert_rowid(transaction)?;

                for (position, image_url) in post.image_urls.iter().enumerate() {
                    sql_query(
                        "INSERT INTO post_images (post_id, position, image_url) VALUES (?, ?, ?);",
                    )
                    .bind::<BigInt, _>(post_id)
                    .bind::<BigInt, _>(Self::position_to_i64(position))
                    .bind::<Text, _>(image_url.as_str())
                    .execute(transaction)?;
                }

                for (position, tag) in post.tags.as_slice().iter().enumerate() {
                    sql_query("INSERT INTO post_tags (post_id, position, tag) VALUES (?, ?, ?);")
                        .bind::<BigInt, _>(post_id)
                        .bind::<BigInt, _>(Self::position_to_i64(position))
                        .bind::<Text, _>(tag.as_str())
                        .execute(transaction)?;
                }

                Self::load_post(transaction, post_id)
            })
            .map_err(|error| Self::map_write_error(&mut connection, &error))?;

        stored.ok_or_else(|| Self::missing_after_write("post"))
    }

    fn save_comment(&self, comment: &NewComment) -> Result<Comment, PersistenceError> {
        let mut connection = self.connection()?;

        let stored = connection
            .transaction::<_, diesel::result::Error, _>(|transaction| {
                sql_query("INSERT INTO comments (post_id, user_id, content) VALUES (?, ?, ?);")
                    .bind::<BigInt, _>(comment.post_id.get())
                    .bind::<BigInt, _>(comment.author_id.get())
                    .bind::<Text, _>(comment.content.as_str())
                    .execute(transaction)?;

                let comment_id = Self::last_insert_rowid(transaction)?;
                Self::load_comment(transaction, comment_id)
            })
            .map_err(|error| Self::map_write_error(&mut connection, &error))?;

        stored.ok_or_else(|| Self::missing_after_write("comment"))
    }
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: CommentId::new(row.id),
            post_id: PostId::new(row.post_id),
            author_id: crate::user::UserId::new(row.user_id),
            author_name: row.author_name,
            content: row.content,
        }
    }
}
