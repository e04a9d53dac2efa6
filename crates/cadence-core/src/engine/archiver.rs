//! Plan save path: normalization and snapshotting of the outgoing plan.

use log::debug;
use serde_json::Value;

use crate::models::{Plan, PlanHistory};

/// Text given to training sessions saved without any.
pub const FREE_SESSION_TEXT: &str = "Free";

/// What a save has to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivedSave {
    /// The normalized plan to store
    pub plan: Plan,

    /// The updated history when the outgoing plan was archived, `None` when
    /// the stored history must stay as it is
    pub history: Option<PlanHistory>,

    /// Whether the new plan differs from the old one
    pub changed: bool,
}

/// Prepares a plan save.
///
/// The input is sanitized, blank training sessions become
/// [`FREE_SESSION_TEXT`] and rest sessions lose their text. When the result
/// differs from `old` and `old` had sessions, `old` is archived under
/// `current_cycle`, replacing any snapshot already stored under that key.
pub fn archive_on_save(
    input: &Value,
    old: &Plan,
    history: &PlanHistory,
    current_cycle: usize,
) -> ArchivedSave {
    let mut plan = Plan::sanitize(input);
    for activity in &mut plan.activities {
        if activity.is_rest {
            activity.text.clear();
        } else if activity.text.trim().is_empty() {
            activity.text = FREE_SESSION_TEXT.to_string();
        }
    }

    let changed = plan != *old;
    let history = (changed && old.sessions > 0).then(|| {
        debug!("Archiving plan '{}' at cycle {current_cycle}", old.name);
        let mut history = history.clone();
        history.insert(current_cycle, old.clone());
        history
    });

    ArchivedSave {
        plan,
        history,
        changed,
    }
}
