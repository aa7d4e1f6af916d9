//! Turns flags, positional arguments, the remote sprint listing and, when
//! needed, operator input into one [`ResolvedIntent`].

use tracing::{debug, info, warn};

use crate::client::SprintSource;
use crate::error::SprintAddError;
use crate::mode::{resolve_sprint_id, ModeFlags, SelectionMode};
use crate::partition::partition;
use crate::prompt::{build_prompts, parse_issue_list, PromptAnswers, PromptField, Prompter};

/// Candidate sprints fetched per relative-mode lookup.
pub const MAX_SPRINT_RESULTS: usize = 50;
/// Issues accepted per add call.
pub const MAX_ISSUES: usize = 50;

/// Inputs of one `sprint add` invocation.
#[derive(Debug, Clone, Default)]
pub struct AddRequest {
    pub args: Vec<String>,
    pub flags: ModeFlags,
    /// Overrides the mode's default sprint state filter.
    pub state: Option<String>,
    pub debug: bool,
}

/// Configuration values the resolution depends on.
#[derive(Debug, Clone)]
pub struct ResolveContext {
    pub server: String,
    pub project_key: String,
    pub board_ids: Vec<u64>,
}

/// Intent under construction; empty strings/lists mean "not known yet".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingIntent {
    pub sprint_id: String,
    pub issue_keys: Vec<String>,
    pub debug: bool,
}

impl PendingIntent {
    /// Fill the fields that are still empty from prompt answers.
    pub fn apply_answers(&mut self, namespace: &str, answers: &PromptAnswers) {
        if self.sprint_id.is_empty() {
            if let Some(value) = answers.get(PromptField::SprintId) {
                self.sprint_id = value.trim().to_string();
            }
        }
        if self.issue_keys.is_empty() {
            if let Some(value) = answers.get(PromptField::Issues) {
                self.issue_keys.extend(parse_issue_list(namespace, value));
            }
        }
    }

    pub fn finish(self) -> Result<ResolvedIntent, SprintAddError> {
        if self.sprint_id.is_empty() {
            return Err(SprintAddError::MissingSprintId);
        }
        if !self.sprint_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SprintAddError::InvalidSprintId(self.sprint_id));
        }
        if self.issue_keys.is_empty() {
            return Err(SprintAddError::MissingIssues);
        }
        if self.issue_keys.len() > MAX_ISSUES {
            return Err(SprintAddError::TooManyIssues {
                count: self.issue_keys.len(),
                max: MAX_ISSUES,
            });
        }
        Ok(ResolvedIntent {
            sprint_id: self.sprint_id,
            issue_keys: self.issue_keys,
            debug: self.debug,
        })
    }
}

/// Fully resolved target of an add call. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIntent {
    sprint_id: String,
    issue_keys: Vec<String>,
    debug: bool,
}

impl ResolvedIntent {
    pub fn sprint_id(&self) -> &str {
        &self.sprint_id
    }

    pub fn issue_keys(&self) -> &[String] {
        &self.issue_keys
    }

    pub fn debug(&self) -> bool {
        self.debug
    }
}

/// Resolve the sprint and issue keys for an add call.
///
/// Order matters: the mode decides how positional arguments are consumed, so
/// the relative-mode lookup happens before partitioning. The prompter is only
/// called when something is still missing afterwards.
pub async fn resolve_intent<S, P>(
    request: &AddRequest,
    context: &ResolveContext,
    source: &S,
    prompter: &mut P,
) -> Result<ResolvedIntent, SprintAddError>
where
    S: SprintSource + ?Sized,
    P: Prompter + ?Sized,
{
    let mode = SelectionMode::from_flags(request.flags)?;
    debug!(?mode, args = request.args.len(), "resolving sprint add");

    let mut pending = PendingIntent {
        debug: request.debug,
        ..Default::default()
    };

    let state_override = request
        .state
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    if !mode.is_relative() && state_override.is_some() {
        warn!("--state is ignored without --next, --prev or --current");
    }

    if mode.is_relative() {
        if context.board_ids.is_empty() {
            return Err(SprintAddError::MissingBoard);
        }
        let state = state_override
            .or(mode.default_state())
            .unwrap_or_default()
            .to_string();
        info!(state = %state, boards = ?context.board_ids, "Fetching sprints...");
        let candidates = source
            .sprints_in_boards(&context.board_ids, &state, MAX_SPRINT_RESULTS)
            .await
            .map_err(SprintAddError::RemoteFetch)?;
        debug!(count = candidates.len(), "fetched candidate sprints");
        if let Some(id) = resolve_sprint_id(mode, &state, &candidates)? {
            pending.sprint_id = id;
        }
    }

    let split = partition(mode, &request.args);
    if let Some(id) = split.sprint_id {
        pending.sprint_id = id;
    }
    // Positional references may carry the same comma separators as the prompt.
    pending.issue_keys = split
        .item_refs
        .iter()
        .flat_map(|raw| parse_issue_list(&context.project_key, raw))
        .collect();

    let prompts = build_prompts(&pending);
    if !prompts.is_empty() {
        debug!(count = prompts.len(), "prompting for missing fields");
        let answers = prompter.ask(&prompts)?;
        pending.apply_answers(&context.project_key, &answers);
    }

    pending.finish()
}
