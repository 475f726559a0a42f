//! Integration tests for repository commits

use super::*;
use github::{CommitsListOptions, ListOptions, RawType};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header_exists, method, query_param};
use wiremock::{Mock, ResponseTemplate};

const SHA: &str = "6dcb09b5b57875f334f61aebed695e2e4193db5e";

#[tokio::test]
async fn test_list_commits() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", "/repos/o/r/commits")
        .and(query_param("sha", "s"))
        .and(query_param("author", "a"))
        .and(query_param("page", "2"))
        .respond_with(success_response(json!([{"sha": SHA}])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let opts = CommitsListOptions {
        sha: Some("s".into()),
        author: Some("a".into()),
        list_options: ListOptions::new().page(2),
        ..Default::default()
    };
    let (commits, _) = client
        .repositories()
        .list_commits("o", "r", Some(&opts))
        .await
        .unwrap();

    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].sha.as_deref(), Some(SHA));
}

#[tokio::test]
async fn test_get_commit() {
    let mock_server = setup_mock_server().await;

    mock_with_auth("GET", format!("/repos/o/r/commits/{}", SHA).as_str())
        .respond_with(success_response(json!({
            "sha": SHA,
            "commit": {
                "message": "Fix all the bugs",
                "author": {"name": "Monalisa Octocat", "email": "support@github.com", "date": "2011-04-14T16:00:49Z"}
            },
            "author": {"login": "octocat"},
            "parents": [{"sha": "7638417db6d59f3c431d3e1f261cc637155684cd"}],
            "stats": {"additions": 104, "deletions": 4, "total": 108},
            "files": [{"filename": "file1.txt", "additions": 10, "status": "modified"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let (commit, _) = client
        .repositories()
        .get_commit("o", "r", SHA, None)
        .await
        .unwrap();

    let inner = commit.commit.expect("commit body");
    assert_eq!(inner.message.as_deref(), Some("Fix all the bugs"));
    assert_eq!(
        inner.author.and_then(|a| a.date).map(|d| d.to_string()),
        Some("2011-04-14 16:00:49 +0000 UTC".to_string())
    );
    assert_eq!(commit.parents.len(), 1);
    assert_eq!(commit.files[0].filename.as_deref(), Some("file1.txt"));
}

#[tokio::test]
async fn test_get_commit_raw_sets_accept() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/commits/s"))
        .and(header("Accept", "application/vnd.github.v3.diff"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Raw diff"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let (diff, _) = client
        .repositories()
        .get_commit_raw("o", "r", "s", RawType::Diff)
        .await
        .unwrap();

    assert_eq!(diff, "Raw diff");
}

#[tokio::test]
async fn test_get_commit_sha1() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/commits/master"))
        .and(header("Accept", "application/vnd.github.v3.sha"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SHA))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let (sha, response) = client
        .repositories()
        .get_commit_sha1("o", "r", "master", "")
        .await
        .unwrap();

    assert_eq!(sha.as_deref(), Some(SHA));
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn test_get_commit_sha1_not_modified() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/commits/tag/1.0"))
        .and(header("If-None-Match", format!("\"{}\"", SHA).as_str()))
        .respond_with(ResponseTemplate::new(304))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let (sha, response) = client
        .repositories()
        .get_commit_sha1("o", "r", "tag/1.0", SHA)
        .await
        .unwrap();

    assert_eq!(sha, None);
    assert_eq!(response.status().as_u16(), 304);
}

#[tokio::test]
async fn test_get_commit_sha1_escapes_ref_segments() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/commits/feature/a%20b"))
        .and(header_exists("Accept"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SHA))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let (sha, _) = client
        .repositories()
        .get_commit_sha1("o", "r", "feature/a b", "")
        .await
        .unwrap();

    assert_eq!(sha.as_deref(), Some(SHA));
}
