//! Core of sprintmesh: resolving which sprint and which issues a
//! `sprint add` call targets, and the Jira client that carries it out.

pub mod add;
pub mod client;
pub mod config;
pub mod error;
pub mod issue_key;
pub mod jira;
pub mod mode;
pub mod partition;
pub mod prompt;
pub mod resolve;
pub mod sprint;

#[cfg(test)]
mod test_env;

pub use add::{add_to_sprint, AddOutcome};
pub use error::SprintAddError;
pub use resolve::{resolve_intent, AddRequest, ResolveContext, ResolvedIntent};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::version;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
