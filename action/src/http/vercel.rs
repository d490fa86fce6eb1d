//! Vercel deployments API client

use async_trait::async_trait;
use tracing::debug;

use crate::app::options::VercelOptions;
use crate::errors::ActionError;
use crate::http::client::HttpClient;
use crate::models::deployment::{Deployment, DeploymentListResponse, DeploymentSummary};

/// Deployments API trait for testability
#[async_trait]
pub trait DeploymentsApiExt: Send + Sync {
    /// List deployments tagged with `commit_sha`, most recent first
    async fn list_deployments(&self, commit_sha: &str)
        -> Result<Vec<DeploymentSummary>, ActionError>;

    /// Fetch the full record of one deployment
    async fn get_deployment(&self, id: &str) -> Result<Deployment, ActionError>;
}

/// Vercel client scoped to one project (and optionally one team)
pub struct VercelClient {
    http_client: HttpClient,
    options: VercelOptions,
}

impl VercelClient {
    pub fn new(options: VercelOptions) -> Result<Self, ActionError> {
        let http_client = HttpClient::new(&options.base_url, "Vercel")?;
        Ok(Self {
            http_client,
            options,
        })
    }
}

#[async_trait]
impl DeploymentsApiExt for VercelClient {
    async fn list_deployments(
        &self,
        commit_sha: &str,
    ) -> Result<Vec<DeploymentSummary>, ActionError> {
        let mut query = vec![
            ("projectId", self.options.project_id.as_str()),
            ("meta-githubCommitSha", commit_sha),
        ];
        if let Some(team_id) = &self.options.team_id {
            query.push(("teamId", team_id.as_str()));
        }

        let response: DeploymentListResponse = self
            .http_client
            .get("/v5/now/deployments", &query, &self.options.token)
            .await?;
        debug!(
            "Listing for commit {} returned {} deployments",
            commit_sha,
            response.deployments.len()
        );
        Ok(response.deployments)
    }

    async fn get_deployment(&self, id: &str) -> Result<Deployment, ActionError> {
        let path = format!("/v11/now/deployments/{}", id);
        let query: Vec<(&str, &str)> = match &self.options.team_id {
            Some(team_id) => vec![("teamId", team_id.as_str())],
            None => Vec::new(),
        };
        self.http_client
            .get(&path, &query, &self.options.token)
            .await
    }
}
