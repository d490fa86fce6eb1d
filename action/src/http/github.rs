//! GitHub commits API client

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::app::options::GithubOptions;
use crate::errors::ActionError;
use crate::http::client::HttpClient;
use crate::models::commit::Commit;

/// Commits API trait for testability
#[async_trait]
pub trait CommitsApiExt: Send + Sync {
    /// Fetch a commit together with its parents
    async fn get_commit(&self, sha: &str) -> Result<Commit, ActionError>;
}

/// GitHub client scoped to one repository
pub struct GithubClient {
    http_client: HttpClient,
    options: GithubOptions,
}

impl GithubClient {
    pub fn new(options: GithubOptions) -> Result<Self, ActionError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static("2022-11-28"),
        );

        let http_client = HttpClient::with_headers(&options.base_url, "GitHub", headers)?;
        Ok(Self {
            http_client,
            options,
        })
    }
}

#[async_trait]
impl CommitsApiExt for GithubClient {
    async fn get_commit(&self, sha: &str) -> Result<Commit, ActionError> {
        let path = format!(
            "/repos/{}/{}/commits/{}",
            self.options.owner, self.options.repo, sha
        );
        self.http_client
            .get(&path, &[], &self.options.token)
            .await
    }
}
