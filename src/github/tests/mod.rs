//! Unit tests for locators and the repository extractor.

use rstest::rstest;

use super::models::test_support::repository;
use super::{
    AccessToken, GithubUsername, MockRepositoryGateway, RepositoryExtractor, RepositoryLocator,
    RepositorySearchQuery,
};
use crate::error::{PickGitError, Resource};

#[rstest]
#[case::trailing_slash("https://github.com/woowacourse-teams/2021-pick-git/")]
#[case::bare("https://github.com/woowacourse-teams/2021-pick-git")]
#[case::git_suffix("https://github.com/woowacourse-teams/2021-pick-git.git")]
#[case::nested_path("https://github.com/woowacourse-teams/2021-pick-git/tree/main")]
fn parses_repository_urls(#[case] url: &str) {
    let locator = RepositoryLocator::parse(url).expect("URL should parse");

    assert_eq!(locator.owner(), "woowacourse-teams");
    assert_eq!(locator.name(), "2021-pick-git");
    assert_eq!(
        locator.repository_path(),
        "/repos/woowacourse-teams/2021-pick-git"
    );
}

#[rstest]
#[case::owner_only("https://github.com/woowacourse-teams")]
#[case::not_a_url("woowacourse-teams/2021-pick-git")]
fn rejects_incomplete_repository_urls(#[case] url: &str) {
    let result = RepositoryLocator::parse(url);

    assert!(
        matches!(result, Err(PickGitError::InvalidUrl(_))),
        "expected InvalidUrl, got {result:?}"
    );
}

#[rstest]
#[case::empty("")]
#[case::blank("   ")]
fn rejects_blank_tokens(#[case] value: &str) {
    assert_eq!(AccessToken::new(value), Err(PickGitError::MissingToken));
}

#[test]
fn token_debug_output_hides_the_secret() {
    let token = AccessToken::new(" oauth.access.token ").expect("token should be valid");

    assert_eq!(token.value(), "oauth.access.token");
    assert!(!format!("{token:?}").contains("oauth"));
}

#[rstest]
#[case::path_injection("jipark3/../admin")]
#[case::dot_segment("..")]
#[case::query("jipark3?per_page=1")]
#[case::fragment("jipark3#repos")]
#[case::encoded("jipark3%2Fadmin")]
#[case::inner_space("ji park3")]
#[case::blank(" ")]
fn rejects_unsafe_usernames(#[case] value: &str) {
    let result = GithubUsername::new(value);

    assert!(
        matches!(result, Err(PickGitError::InvalidInput { .. })),
        "expected InvalidInput, got {result:?}"
    );
}

#[rstest]
#[case::underscore("jipark3_hi")]
#[case::leading_hyphen("-jipark3")]
#[case::double_hyphen("ji--park")]
fn leaves_login_rules_to_github(#[case] value: &str) {
    let username = GithubUsername::new(value).expect("name should pass through");

    assert_eq!(username.as_str(), value);
}

#[tokio::test]
async fn list_repositories_delegates_to_gateway() {
    let mut gateway = MockRepositoryGateway::new();
    gateway
        .expect_user_repositories()
        .withf(|token, username| {
            token.value() == "oauth.access.token" && username.as_str() == "jipark3"
        })
        .times(1)
        .returning(|_, _| Ok(vec![repository("pick-git"), repository("woowa-shop")]));

    let extractor = RepositoryExtractor::new(&gateway);
    let repositories = extractor
        .list_repositories(Some("oauth.access.token"), "jipark3")
        .await
        .expect("listing should succeed");

    assert_eq!(repositories.len(), 2);
}

#[tokio::test]
async fn list_repositories_passes_remote_errors_through() {
    let mut gateway = MockRepositoryGateway::new();
    gateway.expect_user_repositories().returning(|_, _| {
        Err(PickGitError::Authentication {
            message: "401 Bad credentials".to_owned(),
        })
    });

    let extractor = RepositoryExtractor::new(&gateway);
    let error = extractor
        .list_repositories(Some("oauth.access.tokenhi"), "jipark3")
        .await
        .expect_err("listing should fail");

    assert_eq!(
        error,
        PickGitError::Authentication {
            message: "401 Bad credentials".to_owned(),
        }
    );
}

#[tokio::test]
async fn list_repositories_surfaces_remote_not_found_for_unusual_names() {
    let mut gateway = MockRepositoryGateway::new();
    gateway
        .expect_user_repositories()
        .withf(|_, username| username.as_str() == "jipark3_hi")
        .times(1)
        .returning(|_, username| Err(PickGitError::not_found(Resource::User, username.as_str())));

    let extractor = RepositoryExtractor::new(&gateway);
    let error = extractor
        .list_repositories(Some("oauth.access.token"), "jipark3_hi")
        .await
        .expect_err("listing should fail");

    assert_eq!(error.error_code(), "U0001");
    assert_eq!(error.http_status(), http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_without_token_fails_before_calling_github() {
    let mut gateway = MockRepositoryGateway::new();
    gateway.expect_search_repositories().never();

    let query = RepositorySearchQuery::new("woowa", 0, 2).expect("query should be valid");
    let extractor = RepositoryExtractor::new(&gateway);
    let error = extractor
        .search_repositories(None, &query)
        .await
        .expect_err("search should fail");

    assert_eq!(error, PickGitError::MissingToken);
    assert_eq!(error.error_code(), "A0001");
}

#[rstest]
#[case::absent(None)]
#[case::blank(Some("  "))]
#[tokio::test]
async fn extract_for_post_without_url_returns_none(#[case] repo_url: Option<&str>) {
    let mut gateway = MockRepositoryGateway::new();
    gateway.expect_repository().never();

    let extractor = RepositoryExtractor::new(&gateway);
    let resolved = extractor
        .extract_for_post(Some("oauth.access.token"), repo_url)
        .await
        .expect("extraction should succeed");

    assert_eq!(resolved, None);
}

#[tokio::test]
async fn extract_for_post_resolves_linked_repository() {
    let mut gateway = MockRepositoryGateway::new();
    gateway
        .expect_repository()
        .withf(|_, locator| locator.owner() == "woowacourse-teams" && locator.name() == "pick-git")
        .times(1)
        .returning(|_, _| Ok(repository("pick-git")));

    let extractor = RepositoryExtractor::new(&gateway);
    let resolved = extractor
        .extract_for_post(
            Some("oauth.access.token"),
            Some("https://github.com/woowacourse-teams/pick-git/"),
        )
        .await
        .expect("extraction should succeed");

    assert_eq!(resolved.map(|metadata| metadata.name), Some("pick-git".to_owned()));
}
