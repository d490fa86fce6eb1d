//! Error types for the action

use thiserror::Error;

/// Main error type for the action
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-success response from an upstream API. The body is logged where
    /// the response is read, the message stays generic.
    #[error(
        "Something went wrong while trying to fetch from the {service} API (status {status}), see the error above."
    )]
    UpstreamFetch { service: &'static str, status: u16 },

    #[error("Could not find any Vercel deployments for the commit with SHA {commit_sha}.")]
    DeploymentNotFound { commit_sha: String },

    #[error("The Vercel deployment {id} did not succeed.")]
    DeploymentFailed { id: String },

    #[error(
        "The Vercel deployment {id} is still not ready after running out of retries (last state: {state})."
    )]
    DeploymentNotReady { id: String, state: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
