//! Remote collaborator contracts used by the add pipeline.

use async_trait::async_trait;
use thiserror::Error;

use crate::sprint::SprintSummary;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{message} (status {status})")]
    Status { status: u16, message: String },
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("Invalid server URL: {0}")]
    InvalidServer(String),
}

/// Lists candidate sprints for a set of boards.
#[async_trait]
pub trait SprintSource: Send + Sync {
    /// Sprints of `board_ids` matching `state` (comma separated Jira states),
    /// in the remote's native order, at most `limit` entries.
    async fn sprints_in_boards(
        &self,
        board_ids: &[u64],
        state: &str,
        limit: usize,
    ) -> Result<Vec<SprintSummary>, ClientError>;
}

/// Moves issues into a sprint.
#[async_trait]
pub trait SprintSink: Send + Sync {
    async fn add_issues(&self, sprint_id: &str, issue_keys: &[String]) -> Result<(), ClientError>;
}
