//! Row shapes read back through `sql_query`.

use diesel::QueryableByName;
use diesel::sql_types::{BigInt, Nullable, Text};

use crate::post::{Comment, Post, PostId, Tags};
use crate::user::{BasicProfile, GithubProfile, User, UserId};

#[derive(Debug, QueryableByName)]
pub(super) struct InsertedId {
    #[diesel(sql_type = BigInt)]
    pub(super) id: i64,
}

#[derive(Debug, QueryableByName)]
pub(super) struct UserRow {
    #[diesel(sql_type = BigInt)]
    id: i64,
    #[diesel(sql_type = Text)]
    username: String,
    #[diesel(sql_type = Nullable<Text>)]
    image: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    description: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    github_url: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    company: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    location: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    website: Option<String>,
    #[diesel(sql_type = Nullable<Text>)]
    twitter: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            basic_profile: BasicProfile {
                name: row.username,
                image: row.image,
                description: row.description,
            },
            github_profile: GithubProfile {
                github_url: row.github_url,
                company: row.company,
                location: row.location,
                website: row.website,
                twitter: row.twitter,
            },
        }
    }
}

#[derive(Debug, QueryableByName)]
pub(super) struct PostRow {
    #[diesel(sql_type = BigInt)]
    id: i64,
    #[diesel(sql_type = BigInt)]
    user_id: i64,
    #[diesel(sql_type = Text)]
    author_name: String,
    #[diesel(sql_type = Text)]
    content: String,
    #[diesel(sql_type = Nullable<Text>)]
    github_repo_url: Option<String>,
}

impl PostRow {
    pub(super) fn into_post(
        self,
        image_urls: Vec<String>,
        tags: Vec<String>,
        comments: Vec<Comment>,
    ) -> Post {
        Post {
            id: PostId::new(self.id),
            author_id: UserId::new(self.user_id),
            author_name: self.author_name,
            image_urls,
            github_repo_url: self.github_repo_url,
            tags: tags.into_iter().collect::<Tags>(),
            content: self.content,
            comments,
        }
    }
}

#[derive(Debug, QueryableByName)]
pub(super) struct ImageRow {
    #[diesel(sql_type = Text)]
    pub(super) image_url: String,
}

#[derive(Debug, QueryableByName)]
pub(super) struct TagRow {
    #[diesel(sql_type = Text)]
    pub(super) tag: String,
}

#[derive(Debug, QueryableByName)]
pub(super) struct CommentRow {
    #[diesel(sql_type = BigInt)]
    pub(super) id: i64,
    #[diesel(sql_type = BigInt)]
    pub(super) post_id: i64,
    #[diesel(sql_type = BigInt)]
    pub(super) user_id: i64,
    #[diesel(sql_type = Text)]
    pub(super) author_name: String,
    #[diesel(sql_type = Text)]
    pub(super) content: String,
}
