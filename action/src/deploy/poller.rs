//! Readiness polling for a single deployment

use std::future::Future;
use std::time::Duration;

use tracing::info;

use crate::app::options::ReadyOptions;
use crate::errors::ActionError;
use crate::http::vercel::DeploymentsApiExt;
use crate::models::deployment::{Deployment, ReadyState};

/// Waits for a deployment to reach a terminal state
pub struct ReadinessPoller<'a, A: ?Sized> {
    api: &'a A,
    options: ReadyOptions,
}

impl<'a, A: DeploymentsApiExt + ?Sized> ReadinessPoller<'a, A> {
    pub fn new(api: &'a A, options: ReadyOptions) -> Self {
        Self { api, options }
    }

    /// Poll with the configured retry budget
    pub async fn wait<S, F>(
        &self,
        deployment: Deployment,
        sleep_fn: &S,
    ) -> Result<Deployment, ActionError>
    where
        S: Fn(Duration) -> F,
        F: Future<Output = ()>,
    {
        wait_until_ready(
            self.api,
            deployment,
            self.options.retries,
            self.options.interval,
            sleep_fn,
        )
        .await
    }
}

/// Return `deployment` once it is `READY`, re-fetching it after each
/// `interval` while it is in progress.
///
/// A record that is already terminal is resolved without any request.
pub async fn wait_until_ready<A, S, F>(
    api: &A,
    deployment: Deployment,
    retries: u32,
    interval: Duration,
    sleep_fn: &S,
) -> Result<Deployment, ActionError>
where
    A: DeploymentsApiExt + ?Sized,
    S: Fn(Duration) -> F,
    F: Future<Output = ()>,
{
    let mut current = deployment;
    let mut remaining = retries;

    loop {
        if current.ready_state.is_terminal() {
            if current.ready_state == ReadyState::Ready {
                info!("The deployment is ready under {}", current.url);
                return Ok(current);
            }
            return Err(ActionError::DeploymentFailed { id: current.id });
        }

        if remaining == 0 {
            return Err(ActionError::DeploymentNotReady {
                id: current.id,
                state: current.ready_state.to_string(),
            });
        }

        info!(
            "The deployment is still in the '{}' state, waiting for {:?} more ({} retries remaining)",
            current.ready_state, interval, remaining
        );
        sleep_fn(interval).await;
        current = api.get_deployment(&current.id).await?;
        remaining -= 1;
    }
}
