//! Action inputs.
//!
//! The runner exports every input declared in `action.yml` as
//! `INPUT_<NAME>`, using an empty string for inputs the workflow left out,
//! so every value is taken as a raw string and blanks count as absent.

use clap::{Parser, ValueEnum};
use secrecy::SecretString;

use crate::app::options::{
    ActionOptions, FinderStrategy, GithubOptions, ReadyOptions, SearchOptions, VercelOptions,
    DEFAULT_GITHUB_API_URL, DEFAULT_VERCEL_API_URL,
};
use crate::ci::env::CiEnvironment;
use crate::errors::ActionError;
use crate::logs::{LogFormat, LogLevel, LogOptions};

#[derive(Parser, Debug, Default)]
#[command(name = "vercel-await")]
#[command(about = "Wait for the Vercel deployment of the current commit to become ready")]
#[command(version)]
pub struct Cli {
    /// Vercel API token
    #[arg(long, env = "INPUT_VERCEL-TOKEN", hide_env_values = true)]
    pub vercel_token: Option<String>,

    /// GitHub token, used to walk merge commits
    #[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Vercel project ID
    #[arg(long, env = "INPUT_PROJECT-ID")]
    pub project_id: Option<String>,

    /// Vercel team ID
    #[arg(long, env = "INPUT_TEAM-ID")]
    pub team_id: Option<String>,

    /// Listing attempts for the commit [default: 3]
    #[arg(long, env = "INPUT_SEARCH-RETRIES")]
    pub search_retries: Option<String>,

    /// Re-fetches while the deployment builds [default: 10]
    #[arg(long, env = "INPUT_READY-RETRIES")]
    pub ready_retries: Option<String>,

    /// basic or fallback [default: fallback when a GitHub token is set]
    #[arg(long, env = "INPUT_STRATEGY")]
    pub strategy: Option<String>,

    /// Merge parents walked by the fallback strategy [default: 10]
    #[arg(long, env = "INPUT_MAX-ANCESTOR-DEPTH")]
    pub max_ancestor_depth: Option<String>,

    /// Vercel API root [default: https://api.vercel.com]
    #[arg(long, env = "INPUT_VERCEL-API-URL")]
    pub vercel_api_url: Option<String>,

    /// trace, debug, info, warn or error [default: info]
    #[arg(long, env = "INPUT_LOG-LEVEL")]
    pub log_level: Option<String>,

    /// text or json [default: text]
    #[arg(long, env = "INPUT_LOG-FORMAT")]
    pub log_format: Option<String>,
}

impl Cli {
    /// Validate the inputs into the options the action runs with
    pub fn into_options(self, ci: &CiEnvironment) -> Result<ActionOptions, ActionError> {
        let vercel_token = required(self.vercel_token, "vercel-token")?;
        let project_id = required(self.project_id, "project-id")?;
        let github_token = non_empty(self.github_token);

        let strategy = match non_empty(self.strategy) {
            Some(s) => FinderStrategy::from_str(&s, true).map_err(|_| {
                ActionError::ConfigError(format!(
                    "Invalid strategy '{}', expected 'basic' or 'fallback'",
                    s
                ))
            })?,
            None if github_token.is_some() && ci.repository.is_some() => FinderStrategy::Fallback,
            None => FinderStrategy::Basic,
        };

        let github = match strategy {
            FinderStrategy::Basic => None,
            FinderStrategy::Fallback => {
                let token = github_token.ok_or_else(|| {
                    ActionError::ConfigError(
                        "Input required and not supplied: github-token (needed by the fallback strategy)"
                            .to_string(),
                    )
                })?;
                let (owner, repo) = ci.owner_repo()?;
                Some(GithubOptions {
                    base_url: ci
                        .api_url
                        .clone()
                        .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
                    token: SecretString::from(token),
                    owner,
                    repo,
                })
            }
        };

        let search_defaults = SearchOptions::default();
        let search = SearchOptions {
            retries: retry_count(self.search_retries, search_defaults.retries),
            max_ancestor_depth: match non_empty(self.max_ancestor_depth) {
                Some(s) => s.parse().map_err(|_| {
                    ActionError::ConfigError(format!("Invalid max-ancestor-depth '{}'", s))
                })?,
                None => search_defaults.max_ancestor_depth,
            },
            ..search_defaults
        };

        let ready_defaults = ReadyOptions::default();
        let ready = ReadyOptions {
            retries: retry_count(self.ready_retries, ready_defaults.retries),
            ..ready_defaults
        };

        let logs = LogOptions {
            log_level: parse_or_default::<LogLevel>(self.log_level)?,
            format: parse_or_default::<LogFormat>(self.log_format)?,
        };

        Ok(ActionOptions {
            vercel: VercelOptions {
                base_url: non_empty(self.vercel_api_url)
                    .unwrap_or_else(|| DEFAULT_VERCEL_API_URL.to_string()),
                token: SecretString::from(vercel_token),
                project_id,
                team_id: non_empty(self.team_id),
            },
            github,
            strategy,
            search,
            ready,
            logs,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(value: Option<String>, name: &str) -> Result<String, ActionError> {
    non_empty(value).ok_or_else(|| {
        ActionError::ConfigError(format!("Input required and not supplied: {}", name))
    })
}

/// Missing, unparsable and zero counts all fall back to `default`
fn retry_count(value: Option<String>, default: u32) -> u32 {
    non_empty(value)
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

fn parse_or_default<T>(value: Option<String>) -> Result<T, ActionError>
where
    T: std::str::FromStr<Err = String> + Default,
{
    match non_empty(value) {
        Some(s) => s.parse().map_err(ActionError::ConfigError),
        None => Ok(T::default()),
    }
}
