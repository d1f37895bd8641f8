//! Raw repository data supplied by the caller

use crate::error::{HealthError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Everything fetched about one repository, already resolved
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    pub owner: String,
    pub name: String,
    /// Repository-relative file paths, `None` when the listing was not fetched
    #[serde(default)]
    pub files: Option<Vec<String>>,
    /// Commits, most recent first
    #[serde(default)]
    pub commits: Vec<CommitRecord>,
    #[serde(default)]
    pub issues: Vec<IssueRecord>,
    #[serde(default)]
    pub pull_requests: Vec<PullRequestRecord>,
}

/// A single commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCommit")]
pub struct CommitRecord {
    pub authored_at: DateTime<Utc>,
}

/// Accepted input shapes for a commit
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCommit {
    Flat { authored_at: DateTime<Utc> },
    Hosted { commit: RawCommitDetail },
}

#[derive(Debug, Deserialize)]
struct RawCommitDetail {
    author: Option<RawCommitAuthor>,
}

#[derive(Debug, Deserialize)]
struct RawCommitAuthor {
    date: DateTime<Utc>,
}

impl TryFrom<RawCommit> for CommitRecord {
    type Error = String;

    fn try_from(raw: RawCommit) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawCommit::Flat { authored_at } => Ok(Self { authored_at }),
            RawCommit::Hosted { commit } => commit
                .author
                .map(|author| Self {
                    authored_at: author.date,
                })
                .ok_or_else(|| "commit has no author date".to_string()),
        }
    }
}

/// A single issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
}

/// A single pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRecord {
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub review_comments: u32,
}

impl CommitRecord {
    pub fn new(authored_at: DateTime<Utc>) -> Self {
        Self { authored_at }
    }
}

impl RepositorySnapshot {
    /// Parse a snapshot from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        let snapshot: RepositorySnapshot = serde_json::from_str(content)?;
        if snapshot.owner.trim().is_empty() || snapshot.name.trim().is_empty() {
            return Err(HealthError::parse("snapshot must name both owner and repository"));
        }
        Ok(snapshot)
    }

    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading repository snapshot from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
            .map_err(|e| HealthError::parse(format!("{}: {}", path.display(), e)))
    }

    /// `owner/name`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}
