use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tracing::debug;

use sprintmesh_core::config::{resolve_settings, Overrides};
use sprintmesh_core::jira::JiraClient;
use sprintmesh_core::mode::ModeFlags;
use sprintmesh_core::{add_to_sprint, AddOutcome, AddRequest};

use crate::prompt::TerminalPrompter;

#[derive(Serialize)]
struct AddReport<'a> {
    ok: bool,
    #[serde(flatten)]
    outcome: &'a AddOutcome,
}

#[derive(Subcommand, Debug)]
pub enum SprintCommand {
    /// Add issues to sprint
    #[command(
        visible_alias = "assign",
        long_about = "Add issues to sprint.",
        after_help = "Example:\n  $ sprintmesh sprint add SPRINT_ID ISSUE-1 ISSUE-2"
    )]
    Add(AddArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// ID of the sprint to add issues to (eg: 123), followed by the keys of the
    /// issues to add (max 50 issues at once). With --next/--prev/--current all
    /// arguments are issue keys.
    #[arg(value_name = "SPRINT_ID ISSUE-1 [...ISSUE-N]")]
    pub args: Vec<String>,
    /// Use the next planned sprint
    #[arg(long)]
    pub next: bool,
    /// Use the previous sprint
    #[arg(long)]
    pub prev: bool,
    /// Use the current active sprint
    #[arg(long)]
    pub current: bool,
    /// Filter candidate sprints by state (comma separated: future, active, closed)
    #[arg(long)]
    pub state: Option<String>,
    /// Log requests and responses
    #[arg(long)]
    pub debug: bool,
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl AddArgs {
    fn to_request(&self) -> AddRequest {
        AddRequest {
            args: self.args.clone(),
            flags: ModeFlags {
                next: self.next,
                prev: self.prev,
                current: self.current,
            },
            state: self.state.clone(),
            debug: self.debug,
        }
    }
}

impl SprintCommand {
    pub fn debug(&self) -> bool {
        match self {
            SprintCommand::Add(args) => args.debug,
        }
    }
}

pub async fn run(command: SprintCommand, overrides: Overrides) -> Result<()> {
    match command {
        SprintCommand::Add(args) => add(args, overrides).await,
    }
}

async fn add(args: AddArgs, overrides: Overrides) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let settings = resolve_settings(&cwd, &overrides)?;
    debug!(
        server = %settings.server,
        project = %settings.project_key,
        board = ?settings.board_id,
        auth_type = ?settings.auth_type,
        login = settings.login.as_deref().unwrap_or_default(),
        api_token_set = settings.api_token.is_some(),
        "effective settings"
    );
    let client = JiraClient::new(&settings.server)?
        .with_auth(
            settings.auth_type,
            settings.login.clone(),
            settings.api_token.clone(),
        )
        .with_debug(args.debug);
    let mut prompter = TerminalPrompter::new();

    let outcome = add_to_sprint(
        &args.to_request(),
        &settings.resolve_context(),
        &client,
        &mut prompter,
    )
    .await?;

    if args.json {
        let report = AddReport {
            ok: true,
            outcome: &outcome,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "✓ Issues added to the sprint {}\n{}",
            outcome.sprint_id, outcome.url
        );
    }
    Ok(())
}
