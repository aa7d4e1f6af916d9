use crate::mode::SelectionMode;

/// Positional arguments split into the sprint slot and item references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub sprint_id: Option<String>,
    pub item_refs: Vec<String>,
}

/// Split positional arguments according to `mode`.
///
/// In a relative mode the sprint has already been looked up, so every argument
/// is an item reference. In explicit mode the first argument is the sprint id.
pub fn partition(mode: SelectionMode, args: &[String]) -> Partition {
    if mode.is_relative() {
        return Partition {
            sprint_id: None,
            item_refs: args.to_vec(),
        };
    }

    let Some((first, rest)) = args.split_first() else {
        return Partition::default();
    };
    let sprint_id = Some(first.trim().to_string()).filter(|id| !id.is_empty());
    Partition {
        sprint_id,
        item_refs: rest.to_vec(),
    }
}
