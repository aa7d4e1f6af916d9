use serde::{Deserialize, Serialize};

/// Sprint as returned by the Jira Agile board sprint listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SprintSummary {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// One of "future", "active" or "closed".
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub complete_date: Option<String>,
    #[serde(default)]
    pub origin_board_id: Option<u64>,
}

impl SprintSummary {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            state: None,
            start_date: None,
            end_date: None,
            complete_date: None,
            origin_board_id: None,
        }
    }
}

/// One page of `GET /rest/agile/1.0/board/{id}/sprint`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SprintPage {
    #[serde(default)]
    pub values: Vec<SprintSummary>,
}
