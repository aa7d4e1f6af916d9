use serde::Serialize;
use tracing::{debug, info};

use crate::client::{SprintSink, SprintSource};
use crate::error::SprintAddError;
use crate::issue_key::browse_url;
use crate::prompt::Prompter;
use crate::resolve::{resolve_intent, AddRequest, ResolveContext};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AddOutcome {
    pub sprint_id: String,
    pub issues: Vec<String>,
    pub url: String,
}

/// Resolve the target of a `sprint add` call and perform the single mutation.
pub async fn add_to_sprint<C, P>(
    request: &AddRequest,
    context: &ResolveContext,
    client: &C,
    prompter: &mut P,
) -> Result<AddOutcome, SprintAddError>
where
    C: SprintSource + SprintSink + ?Sized,
    P: Prompter + ?Sized,
{
    let intent = resolve_intent(request, context, client, prompter).await?;
    if intent.debug() {
        debug!(?intent, "resolved intent");
    }
    info!(
        sprint_id = intent.sprint_id(),
        issues = intent.issue_keys().len(),
        "Adding issues to the sprint..."
    );
    client
        .add_issues(intent.sprint_id(), intent.issue_keys())
        .await
        .map_err(|source| SprintAddError::RemoteMutation {
            sprint_id: intent.sprint_id().to_string(),
            source,
        })?;

    Ok(AddOutcome {
        sprint_id: intent.sprint_id().to_string(),
        issues: intent.issue_keys().to_vec(),
        url: browse_url(&context.server, &context.project_key),
    })
}
