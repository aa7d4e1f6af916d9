use std::io::IsTerminal;

use dialoguer::Input;
use sprintmesh_core::prompt::{PromptAnswers, PromptError, PromptSpec, Prompter};

/// Prompts on the controlling terminal; refuses when stdin is not a TTY.
pub struct TerminalPrompter {
    interactive: bool,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            interactive: std::io::stdin().is_terminal(),
        }
    }

    #[cfg(test)]
    fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompts: &[PromptSpec]) -> Result<PromptAnswers, PromptError> {
        if !self.interactive {
            if let Some(first) = prompts.first() {
                return Err(PromptError::NotInteractive { field: first.field });
            }
        }

        let mut answers = PromptAnswers::new();
        for prompt in prompts {
            if let Some(help) = prompt.help {
                eprintln!("{help}");
            }
            let required = prompt.required;
            let value: String = Input::new()
                .with_prompt(prompt.message)
                .allow_empty(!required)
                .validate_with(move |input: &String| -> Result<(), &'static str> {
                    if required && input.trim().is_empty() {
                        Err("Value is required")
                    } else {
                        Ok(())
                    }
                })
                .interact_text()
                .map_err(read_error)?;
            if required && value.trim().is_empty() {
                return Err(PromptError::Empty { field: prompt.field });
            }
            answers.insert(prompt.field, value);
        }
        Ok(answers)
    }
}

fn read_error(err: dialoguer::Error) -> PromptError {
    match err {
        dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
            PromptError::Cancelled
        }
        dialoguer::Error::IO(io) => PromptError::Io(io.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprintmesh_core::prompt::PromptField;

    #[test]
    fn non_interactive_stdin_is_refused() {
        let mut prompter = TerminalPrompter::new().with_interactive(false);
        let prompts = [PromptSpec {
            field: PromptField::Issues,
            message: "Issues",
            help: None,
            required: true,
        }];
        match prompter.ask(&prompts) {
            Err(PromptError::NotInteractive { field }) => assert_eq!(field, PromptField::Issues),
            other => panic!("expected refusal, got {other:?}"),
        }
    }

    #[test]
    fn nothing_to_ask_needs_no_terminal() {
        let mut prompter = TerminalPrompter::new().with_interactive(false);
        let answers = prompter.ask(&[]).expect("answers");
        assert_eq!(answers, PromptAnswers::new());
    }

    #[test]
    fn interrupted_read_counts_as_cancel() {
        let err = read_error(dialoguer::Error::IO(std::io::Error::from(
            std::io::ErrorKind::Interrupted,
        )));
        assert!(matches!(err, PromptError::Cancelled));
    }
}
