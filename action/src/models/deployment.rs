//! Deployment models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Readiness of a deployment's build pipeline as reported by Vercel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReadyState {
    Queued,
    Building,
    Ready,
    Error,
    /// Any state this client does not know about, kept verbatim
    Other(String),
}

impl ReadyState {
    /// `Ready` and `Error` never change once reached
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReadyState::Ready | ReadyState::Error)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReadyState::Queued => "QUEUED",
            ReadyState::Building => "BUILDING",
            ReadyState::Ready => "READY",
            ReadyState::Error => "ERROR",
            ReadyState::Other(s) => s,
        }
    }
}

impl From<String> for ReadyState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "QUEUED" => ReadyState::Queued,
            "BUILDING" => ReadyState::Building,
            "READY" => ReadyState::Ready,
            "ERROR" => ReadyState::Error,
            _ => ReadyState::Other(s),
        }
    }
}

impl From<ReadyState> for String {
    fn from(state: ReadyState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for ReadyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full deployment record from `/v11/now/deployments/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// Unique deployment ID
    pub id: String,

    /// Public hostname, without scheme
    pub url: String,

    /// Current readiness state
    pub ready_state: ReadyState,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub project_id: Option<String>,

    /// Team or user owning the deployment
    #[serde(default)]
    pub owner_id: Option<String>,

    /// Creation time, Unix epoch milliseconds
    #[serde(default)]
    pub created_at: Option<i64>,
}

/// Entry of the `/v5/now/deployments` listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentSummary {
    pub uid: String,
}

/// Response of the `/v5/now/deployments` listing
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentListResponse {
    #[serde(default)]
    pub deployments: Vec<DeploymentSummary>,
}
