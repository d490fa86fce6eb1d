//! Main action run: find the deployment, wait for it, publish its URL

use std::future::Future;
use std::time::Duration;

use tracing::info;

use crate::app::options::{ActionOptions, FinderStrategy, ReadyOptions};
use crate::ci::env::CiEnvironment;
use crate::ci::output::set_output;
use crate::deploy::finder::{BasicFinder, DeploymentFinder, FallbackFinder};
use crate::deploy::poller::ReadinessPoller;
use crate::errors::ActionError;
use crate::http::github::GithubClient;
use crate::http::vercel::{DeploymentsApiExt, VercelClient};
use crate::models::deployment::Deployment;

/// Name of the step output carrying the deployment URL
pub const URL_OUTPUT: &str = "url";

/// Run the action for the commit the CI environment points at
pub async fn run(options: &ActionOptions, ci: &CiEnvironment) -> Result<Deployment, ActionError> {
    info!(
        "Waiting for the deployment of commit {} (strategy: {:?}, at most {:?} of waiting)",
        ci.commit_sha,
        options.strategy,
        options.worst_case_wait()
    );

    let vercel = VercelClient::new(options.vercel.clone())?;
    let sleep_fn = tokio::time::sleep;

    let deployment = match options.strategy {
        FinderStrategy::Basic => {
            let finder = BasicFinder::new(&vercel, options.search.clone());
            await_deployment(&finder, &vercel, &options.ready, &ci.commit_sha, &sleep_fn).await?
        }
        FinderStrategy::Fallback => {
            let github_options = options.github.clone().ok_or_else(|| {
                ActionError::ConfigError(
                    "The fallback strategy needs GitHub API access".to_string(),
                )
            })?;
            let github = GithubClient::new(github_options)?;
            let finder = FallbackFinder::new(&vercel, &github, options.search.clone());
            await_deployment(&finder, &vercel, &options.ready, &ci.commit_sha, &sleep_fn).await?
        }
    };

    set_output(ci.output_file.as_deref(), URL_OUTPUT, &deployment.url).await?;
    Ok(deployment)
}

/// Locate the deployment of `commit_sha` and wait until it is ready
pub async fn await_deployment<D, A, S, F>(
    finder: &D,
    api: &A,
    ready: &ReadyOptions,
    commit_sha: &str,
    sleep_fn: &S,
) -> Result<Deployment, ActionError>
where
    D: DeploymentFinder,
    A: DeploymentsApiExt + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    let deployment = finder
        .find(commit_sha, sleep_fn)
        .await?
        .ok_or_else(|| ActionError::DeploymentNotFound {
            commit_sha: commit_sha.to_string(),
        })?;

    info!(
        "Found deployment {} ({}) in state {}",
        deployment.id, deployment.url, deployment.ready_state
    );

    ReadinessPoller::new(api, ready.clone())
        .wait(deployment, sleep_fn)
        .await
}
