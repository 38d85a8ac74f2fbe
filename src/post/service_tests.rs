//! Tests for the post service using mocked collaborators.

use camino::Utf8PathBuf;
use http::StatusCode;
use mockall::predicate::eq;
use rstest::rstest;
use tempfile::TempDir;

use super::{
    AddCommentRequest, PostService, RepositoriesRequest, SearchRepositoriesRequest,
    WritePostRequest,
};
use crate::error::{PickGitError, Resource};
use crate::github::MockRepositoryGateway;
use crate::github::models::test_support::repository;
use crate::persistence::{MockPostStore, MockUserStore, PersistenceError};
use crate::post::{Comment, CommentId, Post, PostId, Tags};
use crate::storage::{ImageUpload, LocalImageStorage, MockImageStorage};
use crate::telemetry::TelemetryEvent;
use crate::telemetry::test_support::RecordingSink;
use crate::user::{BasicProfile, GithubProfile, User, UserId};

const USERNAME: &str = "jipark3";
const ACCESS_TOKEN: &str = "oauth.access.token";
const REPO_URL: &str = "https://github.com/woowacourse-teams/2021-pick-git/";

#[derive(Default)]
struct Collaborators {
    users: MockUserStore,
    posts: MockPostStore,
    images: MockImageStorage,
    gateway: MockRepositoryGateway,
    telemetry: RecordingSink,
}

impl Collaborators {
    fn service(&self) -> PostService<'_> {
        PostService::new(
            &self.users,
            &self.posts,
            &self.images,
            &self.gateway,
            &self.telemetry,
        )
    }
}

fn user(id: i64, name: &str) -> User {
    User {
        id: UserId::new(id),
        basic_profile: BasicProfile {
            name: name.to_owned(),
            ..BasicProfile::default()
        },
        github_profile: GithubProfile::default(),
    }
}

fn stored_post(id: i64, image_urls: Vec<String>, repo_url: Option<&str>) -> Post {
    Post {
        id: PostId::new(id),
        author_id: UserId::new(1),
        author_name: USERNAME.to_owned(),
        image_urls,
        github_repo_url: repo_url.map(str::to_owned),
        tags: ["java", "spring"].into_iter().collect::<Tags>(),
        content: "testContent".to_owned(),
        comments: Vec::new(),
    }
}

fn write_request() -> WritePostRequest {
    WritePostRequest {
        access_token: Some(ACCESS_TOKEN.to_owned()),
        username: USERNAME.to_owned(),
        images: vec![
            ImageUpload::new("testImage1.png", vec![1]),
            ImageUpload::new("testImage2.png", vec![2]),
        ],
        github_repo_url: Some(REPO_URL.to_owned()),
        tags: vec!["java".to_owned(), "spring".to_owned(), "java".to_owned()],
        content: "testContent".to_owned(),
    }
}

fn expect_author(collaborators: &mut Collaborators, name: &'static str) {
    collaborators
        .users
        .expect_find_user_by_username()
        .with(eq(name))
        .returning(move |_| Ok(Some(user(1, name))));
}

#[tokio::test]
async fn write_assembles_post_with_images_tags_and_repository() {
    let mut collaborators = Collaborators::default();
    expect_author(&mut collaborators, USERNAME);
    collaborators
        .images
        .expect_store()
        .withf(|images, username| images.len() == 2 && username == USERNAME)
        .times(1)
        .returning(|_, _| {
            Ok(vec![
                "https://images.example/jipark3/1.png".to_owned(),
                "https://images.example/jipark3/2.png".to_owned(),
            ])
        });
    collaborators
        .gateway
        .expect_repository()
        .withf(|token, locator| {
            token.value() == ACCESS_TOKEN && locator.name() == "2021-pick-git"
        })
        .times(1)
        .returning(|_, _| Ok(repository("2021-pick-git")));
    collaborators
        .posts
        .expect_save_post()
        .withf(|post| {
            post.user_id == UserId::new(1)
                && post.tags.as_slice() == ["java", "spring"]
                && post.image_urls.len() == 2
                && post.github_repo_url.as_deref() == Some(REPO_URL)
        })
        .times(1)
        .returning(|post| {
            Ok(stored_post(
                7,
                post.image_urls.clone(),
                post.github_repo_url.as_deref(),
            ))
        });

    let response = collaborators
        .service()
        .write(write_request())
        .await
        .expect("write should succeed");

    assert_eq!(response.id, PostId::new(7));
    assert_eq!(response.author_name, USERNAME);
    assert_eq!(response.tags, vec!["java".to_owned(), "spring".to_owned()]);
    assert_eq!(
        response.image_urls,
        vec![
            "https://images.example/jipark3/1.png".to_owned(),
            "https://images.example/jipark3/2.png".to_owned(),
        ]
    );
    assert_eq!(
        response.repository.map(|metadata| metadata.name),
        Some("2021-pick-git".to_owned())
    );
    assert_eq!(
        collaborators.telemetry.take(),
        vec![TelemetryEvent::PostPublished {
            post_id: 7,
            username: USERNAME.to_owned(),
            image_count: 2,
            has_repository: true,
        }]
    );
}

#[tokio::test]
async fn write_without_repository_skips_github() {
    let mut collaborators = Collaborators::default();
    expect_author(&mut collaborators, USERNAME);
    collaborators
        .images
        .expect_store()
        .returning(|_, _| Ok(Vec::new()));
    collaborators.gateway.expect_repository().never();
    collaborators
        .posts
        .expect_save_post()
        .withf(|post| post.github_repo_url.is_none())
        .returning(|_| Ok(stored_post(1, Vec::new(), None)));

    let request = WritePostRequest {
        images: Vec::new(),
        github_repo_url: Some("  ".to_owned()),
        ..write_request()
    };
    let response = collaborators
        .service()
        .write(request)
        .await
        .expect("write should succeed");

    assert_eq!(response.repository, None);
    assert_eq!(response.github_repo_url, None);
}

#[tokio::test]
async fn write_for_unknown_author_fails_before_storing_images() {
    let mut collaborators = Collaborators::default();
    collaborators
        .users
        .expect_find_user_by_username()
        .returning(|_| Ok(None));
    collaborators.images.expect_store().never();
    collaborators.posts.expect_save_post().never();

    let error = collaborators
        .service()
        .write(write_request())
        .await
        .expect_err("write should fail");

    assert!(matches!(
        error,
        PickGitError::NotFound {
            resource: Resource::User,
            ..
        }
    ));
    assert_eq!(error.error_code(), "U0001");
    assert_eq!(error.http_status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn write_propagates_rejected_token_without_saving_post() {
    let mut collaborators = Collaborators::default();
    expect_author(&mut collaborators, USERNAME);
    collaborators
        .images
        .expect_store()
        .returning(|_, _| Ok(vec!["https://images.example/jipark3/1.png".to_owned()]));
    collaborators
        .images
        .expect_remove()
        .withf(|references, username| {
            references == ["https://images.example/jipark3/1.png".to_owned()]
                && username == USERNAME
        })
        .times(1)
        .returning(|_, _| Ok(()));
    collaborators.gateway.expect_repository().returning(|_, _| {
        Err(PickGitError::Authentication {
            message: "401 Bad credentials".to_owned(),
        })
    });
    collaborators.posts.expect_save_post().never();

    let error = collaborators
        .service()
        .write(write_request())
        .await
        .expect_err("write should fail");

    assert_eq!(error.http_status(), StatusCode::UNAUTHORIZED);
    assert!(collaborators.telemetry.take().is_empty());
}

fn local_images(temp_dir: &TempDir) -> Result<LocalImageStorage, Box<dyn std::error::Error>> {
    let root = Utf8PathBuf::from_path_buf(temp_dir.path().join("images"))
        .map_err(|_| "temp directory path must be UTF-8")?;
    Ok(LocalImageStorage::new(root, "https://images.example"))
}

#[rstest]
#[case::repository_rejected(true)]
#[case::save_failed(false)]
#[tokio::test]
async fn failed_write_leaves_no_images_behind(
    #[case] repository_rejected: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = TempDir::new()?;
    let images = local_images(&temp_dir)?;
    let mut collaborators = Collaborators::default();
    expect_author(&mut collaborators, USERNAME);
    collaborators.gateway.expect_repository().returning(move |_, _| {
        if repository_rejected {
            Err(PickGitError::Authentication {
                message: "401 Bad credentials".to_owned(),
            })
        } else {
            Ok(repository("2021-pick-git"))
        }
    });
    collaborators.posts.expect_save_post().returning(|_| {
        Err(PersistenceError::WriteFailed {
            message: "disk full".to_owned(),
        })
    });

    let service = PostService::new(
        &collaborators.users,
        &collaborators.posts,
        &images,
        &collaborators.gateway,
        &collaborators.telemetry,
    );
    let result = service.write(write_request()).await;

    assert!(result.is_err(), "write should fail, got {result:?}");
    let leftover = std::fs::read_dir(images.root().join(USERNAME))?.count();
    assert_eq!(leftover, 0, "stored images should be removed");
    assert!(collaborators.telemetry.take().is_empty());
    Ok(())
}

fn expect_post(collaborators: &mut Collaborators, post_id: i64) {
    collaborators
        .posts
        .expect_find_post_by_id()
        .with(eq(PostId::new(post_id)))
        .returning(move |id| Ok(Some(stored_post(id.get(), Vec::new(), None))));
}

fn comment_request(content: Option<&str>) -> AddCommentRequest {
    AddCommentRequest {
        username: "da-nyee".to_owned(),
        content: content.map(str::to_owned),
        post_id: PostId::new(1),
    }
}

#[test]
fn add_comment_returns_author_and_content() {
    let mut collaborators = Collaborators::default();
    expect_post(&mut collaborators, 1);
    expect_author(&mut collaborators, "da-nyee");
    collaborators
        .posts
        .expect_save_comment()
        .withf(|comment| {
            comment.post_id == PostId::new(1) && comment.content.as_str() == "test comment"
        })
        .times(1)
        .returning(|comment| {
            Ok(Comment {
                id: CommentId::new(3),
                post_id: comment.post_id,
                author_id: comment.author_id,
                author_name: "da-nyee".to_owned(),
                content: comment.content.as_str().to_owned(),
            })
        });

    let response = collaborators
        .service()
        .add_comment(comment_request(Some("test comment")))
        .expect("comment should be added");

    assert_eq!(response.id, CommentId::new(3));
    assert_eq!(response.author_name, "da-nyee");
    assert_eq!(response.content, "test comment");
    assert_eq!(
        collaborators.telemetry.take(),
        vec![TelemetryEvent::CommentAdded {
            post_id: 1,
            comment_id: 3,
        }]
    );
}

#[rstest]
#[case::missing(None)]
#[case::empty(Some(String::new()))]
#[case::blank(Some("   ".to_owned()))]
#[case::too_long(Some("a".repeat(100)))]
fn add_comment_rejects_invalid_content(#[case] content: Option<String>) {
    let mut collaborators = Collaborators::default();
    expect_post(&mut collaborators, 1);
    collaborators.posts.expect_save_comment().never();

    let error = collaborators
        .service()
        .add_comment(comment_request(content.as_deref()))
        .expect_err("comment should be rejected");

    assert_eq!(error, PickGitError::CommentFormat);
    assert_eq!(error.to_string(), "F0002");
    assert_eq!(error.http_status(), StatusCode::BAD_REQUEST);
}

#[test]
fn add_comment_checks_the_post_before_the_content() {
    let mut collaborators = Collaborators::default();
    collaborators
        .posts
        .expect_find_post_by_id()
        .returning(|_| Ok(None));
    collaborators.users.expect_find_user_by_username().never();

    let error = collaborators
        .service()
        .add_comment(comment_request(Some("")))
        .expect_err("comment should be rejected");

    assert_eq!(error.error_code(), "P0002");
}

#[test]
fn add_comment_for_unknown_author_fails() {
    let mut collaborators = Collaborators::default();
    expect_post(&mut collaborators, 1);
    collaborators
        .users
        .expect_find_user_by_username()
        .returning(|_| Ok(None));
    collaborators.posts.expect_save_comment().never();

    let error = collaborators
        .service()
        .add_comment(comment_request(Some("hello")))
        .expect_err("comment should be rejected");

    assert_eq!(error.error_code(), "U0001");
}

#[tokio::test]
async fn show_repositories_relays_gateway_listing() {
    let mut collaborators = Collaborators::default();
    collaborators
        .gateway
        .expect_user_repositories()
        .withf(|_, username| username.as_str() == USERNAME)
        .returning(|_, _| Ok(vec![repository("binghe-hi"), repository("doms-react")]));

    let repositories = collaborators
        .service()
        .show_repositories(&RepositoriesRequest {
            access_token: Some(ACCESS_TOKEN.to_owned()),
            username: USERNAME.to_owned(),
        })
        .await
        .expect("listing should succeed");

    assert_eq!(repositories.len(), 2);
}

#[rstest]
#[case::bad_token(
    PickGitError::Authentication { message: "401".to_owned() },
    StatusCode::UNAUTHORIZED
)]
#[case::unknown_user(
    PickGitError::not_found(Resource::User, "404"),
    StatusCode::NOT_FOUND
)]
#[tokio::test]
async fn show_repositories_keeps_remote_status(
    #[case] remote: PickGitError,
    #[case] expected: StatusCode,
) {
    let mut collaborators = Collaborators::default();
    collaborators
        .gateway
        .expect_user_repositories()
        .returning(move |_, _| Err(remote.clone()));

    let error = collaborators
        .service()
        .show_repositories(&RepositoriesRequest {
            access_token: Some("oauth.access.tokenhi".to_owned()),
            username: USERNAME.to_owned(),
        })
        .await
        .expect_err("listing should fail");

    assert_eq!(error.http_status(), expected);
}

#[tokio::test]
async fn show_repositories_for_unconventional_name_reports_remote_not_found() {
    let mut collaborators = Collaborators::default();
    collaborators
        .gateway
        .expect_user_repositories()
        .withf(|_, username| username.as_str() == "jipark3_hi")
        .times(1)
        .returning(|_, _| Err(PickGitError::not_found(Resource::User, "jipark3_hi")));

    let error = collaborators
        .service()
        .show_repositories(&RepositoriesRequest {
            access_token: Some(ACCESS_TOKEN.to_owned()),
            username: "jipark3_hi".to_owned(),
        })
        .await
        .expect_err("listing should fail");

    assert_eq!(error.error_code(), "U0001");
    assert_eq!(error.http_status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_repositories_passes_unconventional_owner_to_github() {
    let mut collaborators = Collaborators::default();
    collaborators
        .gateway
        .expect_search_repositories()
        .withf(|_, query| query.owner().map(|owner| owner.as_str()) == Some("jipark3_hi"))
        .times(1)
        .returning(|_, _| Ok(Vec::new()));

    let repositories = collaborators
        .service()
        .search_repositories(&SearchRepositoriesRequest {
            access_token: Some(ACCESS_TOKEN.to_owned()),
            owner: Some("jipark3_hi".to_owned()),
            keyword: "woowa".to_owned(),
            page: 0,
            limit: 2,
        })
        .await
        .expect("search should reach GitHub");

    assert!(repositories.is_empty());
}

#[tokio::test]
async fn search_repositories_scopes_to_owner() {
    let mut collaborators = Collaborators::default();
    collaborators
        .gateway
        .expect_search_repositories()
        .withf(|_, query| {
            query.keyword() == "woowa"
                && query.page() == 0
                && query.limit() == 2
                && query.owner().map(|owner| owner.as_str()) == Some(USERNAME)
        })
        .returning(|_, _| Ok(vec![repository("woowa-a"), repository("woowa-b")]));

    let repositories = collaborators
        .service()
        .search_repositories(&SearchRepositoriesRequest {
            access_token: Some(ACCESS_TOKEN.to_owned()),
            owner: Some(USERNAME.to_owned()),
            keyword: "woowa".to_owned(),
            page: 0,
            limit: 2,
        })
        .await
        .expect("search should succeed");

    assert_eq!(repositories.len(), 2);
}

#[tokio::test]
async fn search_repositories_without_token_fails() {
    let mut collaborators = Collaborators::default();
    collaborators.gateway.expect_search_repositories().never();

    let error = collaborators
        .service()
        .search_repositories(&SearchRepositoriesRequest {
            access_token: None,
            owner: None,
            keyword: "woowa".to_owned(),
            page: 0,
            limit: 2,
        })
        .await
        .expect_err("search should fail");

    assert_eq!(error.error_code(), "A0001");
}

#[test]
fn read_post_reports_missing_post() {
    let mut collaborators = Collaborators::default();
    collaborators
        .posts
        .expect_find_post_by_id()
        .returning(|_| Ok(None));

    let error = collaborators
        .service()
        .read_post(PostId::new(42))
        .expect_err("read should fail");

    assert_eq!(error, PickGitError::not_found(Resource::Post, "42"));
}
