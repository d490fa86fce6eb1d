//! Action run tests

use std::time::Duration;

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vercel_await::app::options::{
    ActionOptions, FinderStrategy, GithubOptions, ReadyOptions, SearchOptions, VercelOptions,
};
use vercel_await::app::run::{await_deployment, run};
use vercel_await::ci::env::CiEnvironment;
use vercel_await::deploy::finder::{BasicFinder, FallbackFinder};
use vercel_await::errors::ActionError;
use vercel_await::logs::LogOptions;
use vercel_await::models::deployment::ReadyState;

use crate::support::{FakeCommits, FakeVercel, SleepRecorder};

fn options(vercel_url: String, strategy: FinderStrategy, github_url: Option<String>) -> ActionOptions {
    ActionOptions {
        vercel: VercelOptions {
            base_url: vercel_url,
            token: SecretString::from("vercel-token".to_string()),
            project_id: "prj_1".to_string(),
            team_id: Some("team_1".to_string()),
        },
        github: github_url.map(|base_url| GithubOptions {
            base_url,
            token: SecretString::from("gh-token".to_string()),
            owner: "acme".to_string(),
            repo: "web".to_string(),
        }),
        strategy,
        search: SearchOptions {
            retries: 1,
            interval: Duration::from_millis(1),
            max_ancestor_depth: 3,
        },
        ready: ReadyOptions {
            retries: 2,
            interval: Duration::from_millis(1),
        },
        logs: LogOptions::default(),
    }
}

#[tokio::test]
async fn test_await_deployment_finds_and_waits() {
    let api = FakeVercel::new()
        .tag("abc", "dpl_1")
        .states("dpl_1", vec![ReadyState::Queued, ReadyState::Building, ReadyState::Ready]);
    let sleeper = SleepRecorder::new();
    let finder = BasicFinder::new(&api, SearchOptions::default());

    let ready = await_deployment(
        &finder,
        &api,
        &ReadyOptions::default(),
        "abc",
        &sleeper.sleep_fn(),
    )
    .await
    .unwrap();

    assert_eq!(ready.url, "dpl_1.vercel.app");
    assert_eq!(
        sleeper.waits(),
        vec![Duration::from_secs(30), Duration::from_secs(30)]
    );
}

#[tokio::test]
async fn test_await_deployment_not_found_after_ancestor_walk() {
    let api = FakeVercel::new();
    let commits = FakeCommits::new().commit("merge", &["main", "feature"]);
    let sleeper = SleepRecorder::new();
    let finder = FallbackFinder::new(
        &api,
        &commits,
        SearchOptions {
            retries: 2,
            ..Default::default()
        },
    );

    let err = await_deployment(
        &finder,
        &api,
        &ReadyOptions::default(),
        "merge",
        &sleeper.sleep_fn(),
    )
    .await
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Could not find any Vercel deployments for the commit with SHA merge."
    );
    assert_eq!(api.listings(), vec!["merge", "merge", "feature"]);
    assert_eq!(commits.lookups(), vec!["merge", "feature"]);
}

#[tokio::test]
async fn test_await_deployment_reports_failed_build() {
    let api = FakeVercel::new()
        .tag("abc", "dpl_1")
        .states("dpl_1", vec![ReadyState::Error]);
    let sleeper = SleepRecorder::new();
    let finder = BasicFinder::new(&api, SearchOptions::default());

    let err = await_deployment(
        &finder,
        &api,
        &ReadyOptions::default(),
        "abc",
        &sleeper.sleep_fn(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ActionError::DeploymentFailed { .. }));
    assert!(sleeper.waits().is_empty());
}

#[tokio::test]
async fn test_run_writes_url_output() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v5/now/deployments"))
        .and(query_param("meta-githubCommitSha", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "deployments": [{ "uid": "dpl_1" }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v11/now/deployments/dpl_1"))
        .and(query_param("teamId", "team_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "dpl_1",
            "url": "web-dpl1.vercel.app",
            "readyState": "READY"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = std::env::temp_dir().join(format!("vercel-await-run-{}", std::process::id()));
    tokio::fs::create_dir_all(&dir).await.unwrap();
    let output_file = dir.join("github_output");

    let ci = CiEnvironment {
        commit_sha: "abc123".to_string(),
        repository: Some("acme/web".to_string()),
        api_url: None,
        output_file: Some(output_file.clone()),
    };

    let deployment = run(&options(server.uri(), FinderStrategy::Basic, None), &ci)
        .await
        .unwrap();

    assert_eq!(deployment.url, "web-dpl1.vercel.app");
    let contents = tokio::fs::read_to_string(&output_file).await.unwrap();
    assert_eq!(contents, "url=web-dpl1.vercel.app\n");

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn test_run_fallback_against_mock_apis() {
    let vercel = MockServer::start().await;
    let github = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v5/now/deployments"))
        .and(query_param("meta-githubCommitSha", "merge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "deployments": [] })))
        .expect(1)
        .mount(&vercel)
        .await;
    Mock::given(method("GET"))
        .and(path("/v5/now/deployments"))
        .and(query_param("meta-githubCommitSha", "feature"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "deployments": [{ "uid": "dpl_feature" }]
        })))
        .expect(1)
        .mount(&vercel)
        .await;
    Mock::given(method("GET"))
        .and(path("/v11/now/deployments/dpl_feature"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "dpl_feature",
            "url": "web-feature.vercel.app",
            "readyState": "READY"
        })))
        .expect(1)
        .mount(&vercel)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/web/commits/merge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sha": "merge",
            "parents": [{ "sha": "main" }, { "sha": "feature" }]
        })))
        .expect(1)
        .mount(&github)
        .await;

    let ci = CiEnvironment {
        commit_sha: "merge".to_string(),
        repository: Some("acme/web".to_string()),
        api_url: None,
        output_file: None,
    };
    let options = options(vercel.uri(), FinderStrategy::Fallback, Some(github.uri()));

    let deployment = run(&options, &ci).await.unwrap();

    assert_eq!(deployment.id, "dpl_feature");
}

#[tokio::test]
async fn test_run_surfaces_upstream_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "code": "forbidden", "message": "Not authorized" }
        })))
        .mount(&server)
        .await;

    let ci = CiEnvironment {
        commit_sha: "abc123".to_string(),
        ..Default::default()
    };

    let err = run(&options(server.uri(), FinderStrategy::Basic, None), &ci)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ActionError::UpstreamFetch { service: "Vercel", status: 401 }
    ));
}
