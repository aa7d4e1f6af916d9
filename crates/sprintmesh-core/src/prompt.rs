//! Interactive fallback for fields that arguments and flags left empty.
//!
//! Deciding what to ask is a pure function of the pending intent
//! ([`build_prompts`]); asking is a single call into a [`Prompter`].

use std::collections::BTreeMap;

use thiserror::Error;

use crate::resolve::PendingIntent;

pub const ISSUES_HELP: &str = "Comma separated list of issues key to add. eg: ISSUE-1, ISSUE-2";

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("{field} is required but stdin is not a terminal")]
    NotInteractive { field: PromptField },
    #[error("prompt cancelled")]
    Cancelled,
    #[error("{field} cannot be empty")]
    Empty { field: PromptField },
    #[error("failed to read input: {0}")]
    Io(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PromptField {
    SprintId,
    Issues,
}

impl std::fmt::Display for PromptField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptField::SprintId => write!(f, "Sprint ID"),
            PromptField::Issues => write!(f, "Issues"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSpec {
    pub field: PromptField,
    pub message: &'static str,
    pub help: Option<&'static str>,
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptAnswers(BTreeMap<PromptField, String>);

impl PromptAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: PromptField, value: impl Into<String>) {
        self.0.insert(field, value.into());
    }

    pub fn get(&self, field: PromptField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }
}

/// Asks the operator for the given fields, in order.
pub trait Prompter {
    fn ask(&mut self, prompts: &[PromptSpec]) -> Result<PromptAnswers, PromptError>;
}

/// Prompts needed to complete `intent`: one per field that is still empty.
pub fn build_prompts(intent: &PendingIntent) -> Vec<PromptSpec> {
    let mut prompts = Vec::new();
    if intent.sprint_id.is_empty() {
        prompts.push(PromptSpec {
            field: PromptField::SprintId,
            message: "Sprint ID",
            help: None,
            required: true,
        });
    }
    if intent.issue_keys.is_empty() {
        prompts.push(PromptSpec {
            field: PromptField::Issues,
            message: "Issues",
            help: Some(ISSUES_HELP),
            required: true,
        });
    }
    prompts
}

/// Split a comma separated answer into normalized issue keys.
pub fn parse_issue_list(namespace: &str, answer: &str) -> Vec<String> {
    answer
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| crate::issue_key::normalize_issue_key(namespace, item))
        .collect()
}
