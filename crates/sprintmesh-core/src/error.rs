use thiserror::Error;

use crate::client::ClientError;
use crate::prompt::PromptError;

#[derive(Debug, Error)]
pub enum SprintAddError {
    #[error("Only one of --next, --prev or --current may be set (got {})", .0.join(", "))]
    ConflictingModes(Vec<&'static str>),
    #[error("A board id is required to look up sprints (set [board] id in config or pass --board)")]
    MissingBoard,
    #[error("No sprints found in state \"{state}\"")]
    RemoteFetchEmpty { state: String },
    #[error("Failed to fetch sprints: {0}")]
    RemoteFetch(#[source] ClientError),
    #[error("Input aborted: {0}")]
    PromptAborted(#[from] PromptError),
    #[error("Sprint id is required")]
    MissingSprintId,
    #[error("Invalid sprint id \"{0}\": expected a number")]
    InvalidSprintId(String),
    #[error("At least one issue key is required")]
    MissingIssues,
    #[error("Too many issues: {count} given, at most {max} can be added at once")]
    TooManyIssues { count: usize, max: usize },
    #[error("Failed to add issues to sprint {sprint_id}: {source}")]
    RemoteMutation {
        sprint_id: String,
        #[source]
        source: ClientError,
    },
}
