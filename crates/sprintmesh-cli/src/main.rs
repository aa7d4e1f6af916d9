mod logging;
mod prompt;
mod sprint;
mod version;

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use sprintmesh_core::config::Overrides;

use crate::sprint::SprintCommand;

#[derive(Parser)]
#[command(
    name = "sprintmesh",
    version = version::FULL,
    about = "Add issues to Jira sprints"
)]
struct Cli {
    /// Config file to use instead of project/global discovery
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Jira server URL
    #[arg(long, global = true)]
    server: Option<String>,
    /// Project key used to expand bare issue numbers
    #[arg(long, short = 'p', global = true)]
    project: Option<String>,
    /// Board to look up sprints on
    #[arg(long, global = true)]
    board: Option<u64>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print version information
    Version,
    /// Sprint operations
    #[command(subcommand)]
    Sprint(SprintCommand),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let overrides = Overrides {
        config_path: cli.config,
        server: cli.server,
        project: cli.project,
        board: cli.board,
    };
    match cli.command {
        Some(Command::Version) => {
            println!("sprintmesh {}", version::FULL);
        }
        Some(Command::Sprint(command)) => {
            logging::init(command.debug());
            sprint::run(command, overrides).await?;
        }
        None => {
            Cli::command().print_help()?;
            println!();
        }
    }
    Ok(())
}
