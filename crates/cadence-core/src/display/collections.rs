//! The user's plan collection.

use std::fmt;

use crate::models::{PlanEntry, PlanId};

/// A user's plans, marking the selected one.
///
/// # Examples
///
/// ```rust
/// use cadence_core::{display::PlanList, models::PlanEntry};
///
/// let plans = vec![
///     PlanEntry { id: 1, name: "Base".to_string(), sessions: 4 },
///     PlanEntry { id: 2, name: "Taper".to_string(), sessions: 3 },
/// ];
/// let output = PlanList::new(&plans).with_selected(2).to_string();
/// assert!(output.contains("- **2. Taper (3 sessions)** (selected)"));
/// ```
pub struct PlanList<'a> {
    plans: &'a [PlanEntry],
    selected: Option<PlanId>,
}

impl<'a> PlanList<'a> {
    pub fn new(plans: &'a [PlanEntry]) -> Self {
        Self {
            plans,
            selected: None,
        }
    }

    /// Marks `id` as the selected plan.
    pub fn with_selected(mut self, id: PlanId) -> Self {
        self.selected = Some(id);
        self
    }
}

impl fmt::Display for PlanList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.plans.is_empty() {
            return writeln!(f, "No plans found.");
        }

        for plan in self.plans {
            if self.selected == Some(plan.id) {
                writeln!(f, "- **{plan}** (selected)")?;
            } else {
                writeln!(f, "- {plan}")?;
            }
        }
        Ok(())
    }
}
