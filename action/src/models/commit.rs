//! Commit models

use serde::{Deserialize, Serialize};

/// Commit as returned by `GET /repos/{owner}/{repo}/commits/{sha}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,

    #[serde(default)]
    pub parents: Vec<CommitParent>,
}

/// Parent reference of a commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitParent {
    pub sha: String,
}

impl Commit {
    /// Parent merged into the first one; only present on merge commits
    pub fn second_parent(&self) -> Option<&CommitParent> {
        self.parents.get(1)
    }
}
