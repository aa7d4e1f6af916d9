use crate::error::SprintAddError;
use crate::sprint::SprintSummary;

/// Raw `--next` / `--prev` / `--current` flags as parsed from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeFlags {
    pub next: bool,
    pub prev: bool,
    pub current: bool,
}

/// How the target sprint is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Sprint id comes from the first positional argument.
    Explicit,
    Next,
    Previous,
    Current,
}

impl SelectionMode {
    /// Collapse the relative-mode flags into a single mode. Setting more than
    /// one of them is rejected instead of picking one silently.
    pub fn from_flags(flags: ModeFlags) -> Result<Self, SprintAddError> {
        let set: Vec<(&'static str, SelectionMode)> = [
            (flags.next, "--next", SelectionMode::Next),
            (flags.prev, "--prev", SelectionMode::Previous),
            (flags.current, "--current", SelectionMode::Current),
        ]
        .into_iter()
        .filter(|(on, _, _)| *on)
        .map(|(_, name, mode)| (name, mode))
        .collect();

        match set.as_slice() {
            [] => Ok(SelectionMode::Explicit),
            [(_, mode)] => Ok(*mode),
            _ => Err(SprintAddError::ConflictingModes(
                set.iter().map(|(name, _)| *name).collect(),
            )),
        }
    }

    pub fn is_relative(self) -> bool {
        !matches!(self, SelectionMode::Explicit)
    }

    /// Sprint state filter used for the candidate query when `--state` is not given.
    pub fn default_state(self) -> Option<&'static str> {
        match self {
            SelectionMode::Explicit => None,
            SelectionMode::Next => Some("future"),
            SelectionMode::Previous => Some("closed"),
            SelectionMode::Current => Some("active"),
        }
    }
}

/// Pick the target sprint out of the state-filtered candidates.
///
/// `Next` takes the last candidate, `Previous` and `Current` the first. The
/// state filter on the query does the real narrowing; this is not an exact
/// adjacency lookup. `Explicit` never consults the candidates and yields `None`.
pub fn resolve_sprint_id(
    mode: SelectionMode,
    state: &str,
    candidates: &[SprintSummary],
) -> Result<Option<String>, SprintAddError> {
    let picked = match mode {
        SelectionMode::Explicit => return Ok(None),
        SelectionMode::Next => candidates.last(),
        SelectionMode::Previous | SelectionMode::Current => candidates.first(),
    };
    match picked {
        Some(sprint) => Ok(Some(sprint.id.to_string())),
        None => Err(SprintAddError::RemoteFetchEmpty {
            state: state.to_string(),
        }),
    }
}
