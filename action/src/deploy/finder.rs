//! Deployment discovery for a commit

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::app::options::SearchOptions;
use crate::errors::ActionError;
use crate::http::github::CommitsApiExt;
use crate::http::vercel::DeploymentsApiExt;
use crate::models::deployment::Deployment;

/// Locates the deployment built for a commit
#[allow(async_fn_in_trait)]
pub trait DeploymentFinder {
    /// `Ok(None)` means the search ran out without finding anything
    async fn find<S, F>(
        &self,
        commit_sha: &str,
        sleep_fn: &S,
    ) -> Result<Option<Deployment>, ActionError>
    where
        S: Fn(Duration) -> F,
        F: Future<Output = ()>;
}

/// Search the listing for `commit_sha` up to `retries` times, waiting
/// `interval` after every empty listing. The first (most recent) match is
/// fetched in full and returned.
pub async fn find_latest_deployment<A, S, F>(
    api: &A,
    commit_sha: &str,
    retries: u32,
    interval: Duration,
    sleep_fn: &S,
) -> Result<Option<Deployment>, ActionError>
where
    A: DeploymentsApiExt + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    let mut remaining = retries;

    while remaining > 0 {
        info!("Searching for deployments related to commit {}", commit_sha);
        let deployments = api.list_deployments(commit_sha).await?;

        if let Some(latest) = deployments.first() {
            info!(
                "Found {} deployment{}, using the latest one ({})",
                deployments.len(),
                if deployments.len() > 1 { "s" } else { "" },
                latest.uid
            );
            let deployment = api.get_deployment(&latest.uid).await?;
            return Ok(Some(deployment));
        }

        info!(
            "No deployments found yet, waiting for {:?} before trying again ({} retries remaining)",
            interval, remaining
        );
        sleep_fn(interval).await;
        remaining -= 1;
    }

    Ok(None)
}

/// Looks at the commit itself only and fails once retries run out
pub struct BasicFinder<'a, A: ?Sized> {
    api: &'a A,
    options: SearchOptions,
}

impl<'a, A: DeploymentsApiExt + ?Sized> BasicFinder<'a, A> {
    pub fn new(api: &'a A, options: SearchOptions) -> Self {
        Self { api, options }
    }
}

impl<A: DeploymentsApiExt + ?Sized> DeploymentFinder for BasicFinder<'_, A> {
    async fn find<S, F>(
        &self,
        commit_sha: &str,
        sleep_fn: &S,
    ) -> Result<Option<Deployment>, ActionError>
    where
        S: Fn(Duration) -> F,
        F: Future<Output = ()>,
    {
        match find_latest_deployment(
            self.api,
            commit_sha,
            self.options.retries,
            self.options.interval,
            sleep_fn,
        )
        .await?
        {
            Some(deployment) => Ok(Some(deployment)),
            None => Err(ActionError::DeploymentNotFound {
                commit_sha: commit_sha.to_string(),
            }),
        }
    }
}

/// Looks at the commit, then walks the second parents of merge commits.
///
/// Only the original commit gets the full retry budget; every ancestor is
/// probed exactly once. The first parent is never followed.
pub struct FallbackFinder<'a, A: ?Sized, C: ?Sized> {
    api: &'a A,
    commits: &'a C,
    options: SearchOptions,
}

impl<'a, A, C> FallbackFinder<'a, A, C>
where
    A: DeploymentsApiExt + ?Sized,
    C: CommitsApiExt + ?Sized,
{
    pub fn new(api: &'a A, commits: &'a C, options: SearchOptions) -> Self {
        Self {
            api,
            commits,
            options,
        }
    }
}

impl<A, C> DeploymentFinder for FallbackFinder<'_, A, C>
where
    A: DeploymentsApiExt + ?Sized,
    C: CommitsApiExt + ?Sized,
{
    async fn find<S, F>(
        &self,
        commit_sha: &str,
        sleep_fn: &S,
    ) -> Result<Option<Deployment>, ActionError>
    where
        S: Fn(Duration) -> F,
        F: Future<Output = ()>,
    {
        let mut sha = commit_sha.to_string();
        let mut depth: u32 = 0;

        loop {
            let retries = if depth == 0 { self.options.retries } else { 1 };
            if let Some(deployment) =
                find_latest_deployment(self.api, &sha, retries, self.options.interval, sleep_fn)
                    .await?
            {
                if depth > 0 {
                    info!(
                        "Using deployment {} of ancestor {} ({} merge{} above {})",
                        deployment.id,
                        sha,
                        depth,
                        if depth > 1 { "s" } else { "" },
                        commit_sha
                    );
                }
                return Ok(Some(deployment));
            }

            if depth >= self.options.max_ancestor_depth {
                warn!(
                    "Reached the maximum ancestor depth ({}) without finding a deployment",
                    self.options.max_ancestor_depth
                );
                return Ok(None);
            }

            let commit = match self.commits.get_commit(&sha).await {
                Ok(commit) => commit,
                Err(e) => {
                    warn!("Unable to look up the parents of commit {}: {}", sha, e);
                    return Ok(None);
                }
            };

            match commit.second_parent() {
                Some(parent) => {
                    info!(
                        "Commit {} is a merge commit, searching its second parent {}",
                        sha, parent.sha
                    );
                    sha = parent.sha.clone();
                    depth += 1;
                }
                None => {
                    debug!("Commit {} has no second parent, giving up", sha);
                    return Ok(None);
                }
            }
        }
    }
}
