//! CI environment provided by the GitHub Actions runner

use std::env;
use std::path::PathBuf;

use crate::errors::ActionError;

/// Values the runner exports for every job
#[derive(Debug, Clone, Default)]
pub struct CiEnvironment {
    /// Commit that triggered the workflow (`GITHUB_SHA`)
    pub commit_sha: String,

    /// `owner/repo` of the workflow repository (`GITHUB_REPOSITORY`)
    pub repository: Option<String>,

    /// REST API root, differs on GitHub Enterprise (`GITHUB_API_URL`)
    pub api_url: Option<String>,

    /// File step outputs are appended to (`GITHUB_OUTPUT`)
    pub output_file: Option<PathBuf>,
}

impl CiEnvironment {
    /// Read the environment of the current process
    pub fn from_env() -> Result<Self, ActionError> {
        let commit_sha = non_empty_var("GITHUB_SHA").ok_or_else(|| {
            ActionError::ConfigError(
                "GITHUB_SHA is not set, is this running in GitHub Actions?".to_string(),
            )
        })?;

        Ok(Self {
            commit_sha,
            repository: non_empty_var("GITHUB_REPOSITORY"),
            api_url: non_empty_var("GITHUB_API_URL"),
            output_file: non_empty_var("GITHUB_OUTPUT").map(PathBuf::from),
        })
    }

    /// Split `repository` into owner and name
    pub fn owner_repo(&self) -> Result<(String, String), ActionError> {
        let repository = self.repository.as_deref().ok_or_else(|| {
            ActionError::ConfigError("GITHUB_REPOSITORY is not set".to_string())
        })?;
        parse_repository(repository)
    }
}

/// Parse an `owner/repo` pair
pub fn parse_repository(repository: &str) -> Result<(String, String), ActionError> {
    match repository.trim().split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(ActionError::ConfigError(format!(
            "Invalid GITHUB_REPOSITORY format: '{}', expected owner/repo",
            repository
        ))),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
