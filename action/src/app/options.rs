//! Action configuration options

use std::time::Duration;

use secrecy::SecretString;

use crate::logs::LogOptions;

pub const DEFAULT_VERCEL_API_URL: &str = "https://api.vercel.com";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Main action options, resolved once at startup
#[derive(Debug, Clone)]
pub struct ActionOptions {
    /// Vercel API access
    pub vercel: VercelOptions,

    /// GitHub API access, only needed by the fallback strategy
    pub github: Option<GithubOptions>,

    /// Deployment discovery strategy
    pub strategy: FinderStrategy,

    /// Deployment search options
    pub search: SearchOptions,

    /// Readiness polling options
    pub ready: ReadyOptions,

    /// Logging options
    pub logs: LogOptions,
}

impl ActionOptions {
    /// Upper bound of the time spent sleeping before the run gives up
    pub fn worst_case_wait(&self) -> Duration {
        let ancestor_probes = match self.strategy {
            FinderStrategy::Basic => 0,
            FinderStrategy::Fallback => self.search.max_ancestor_depth,
        };
        let search_attempts = self.search.retries.saturating_add(ancestor_probes);
        let search = self
            .search
            .interval
            .checked_mul(search_attempts)
            .unwrap_or(Duration::MAX);
        let ready = self
            .ready
            .interval
            .checked_mul(self.ready.retries)
            .unwrap_or(Duration::MAX);
        search.saturating_add(ready)
    }
}

/// Vercel API options
#[derive(Debug, Clone)]
pub struct VercelOptions {
    pub base_url: String,
    pub token: SecretString,
    pub project_id: String,
    pub team_id: Option<String>,
}

/// GitHub API options
#[derive(Debug, Clone)]
pub struct GithubOptions {
    pub base_url: String,
    pub token: SecretString,
    pub owner: String,
    pub repo: String,
}

/// How a deployment is located for a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FinderStrategy {
    /// Only the commit itself; running out of retries fails the run
    Basic,
    /// The commit first, then the second parents of merge commits
    Fallback,
}

/// Deployment search options
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Listing attempts for the original commit
    pub retries: u32,

    /// Wait after each empty listing
    pub interval: Duration,

    /// Maximum number of merge parents walked by the fallback strategy
    pub max_ancestor_depth: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            retries: 3,
            interval: Duration::from_secs(5),
            max_ancestor_depth: 10,
        }
    }
}

/// Readiness polling options
#[derive(Debug, Clone)]
pub struct ReadyOptions {
    /// Re-fetches allowed while the deployment is in progress
    pub retries: u32,

    /// Wait before each re-fetch
    pub interval: Duration,
}

impl Default for ReadyOptions {
    fn default() -> Self {
        Self {
            retries: 10,
            interval: Duration::from_secs(30),
        }
    }
}
