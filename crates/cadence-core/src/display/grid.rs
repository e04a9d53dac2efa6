//! The attendance grid of the selected plan.

use std::fmt;

use crate::{models::Plan, tracker::Snapshot};

/// Sessions by cycles, each column drawn with the plan version in force
/// during that cycle.
///
/// Cells past the end of a cycle's plan stay empty and rest sessions show a
/// dash. The current cycle's header is bold.
pub struct GridView<'a> {
    snapshot: &'a Snapshot,
}

impl<'a> GridView<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self { snapshot }
    }
}

impl fmt::Display for GridView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Snapshot { plan, tracking, .. } = self.snapshot;
        let plans: Vec<&Plan> = (0..self.snapshot.visible_columns())
            .map(|cycle| self.snapshot.plan_for_cycle(cycle))
            .collect();
        let rows = plans
            .iter()
            .map(|p| p.sessions)
            .max()
            .unwrap_or(0)
            .max(plan.sessions);

        writeln!(f, "# {}", plan.name)?;
        writeln!(f)?;
        if rows == 0 {
            return writeln!(f, "No sessions in this plan.");
        }

        write!(f, "| # | Activity |")?;
        for cycle in 0..plans.len() {
            if cycle == tracking.current_cycle_index {
                write!(f, " **{}** |", cycle + 1)?;
            } else {
                write!(f, " {} |", cycle + 1)?;
            }
        }
        writeln!(f)?;
        writeln!(f, "|---|---|{}", ":-:|".repeat(plans.len()))?;

        for session in 0..rows {
            let label = match plan.activities.get(session) {
                Some(activity) if activity.is_rest => "*rest*",
                Some(activity) => activity.text.as_str(),
                None => "",
            };
            write!(f, "| {} | {label} |", session + 1)?;

            for (cycle, cycle_plan) in plans.iter().enumerate() {
                let cell = if session >= cycle_plan.sessions {
                    " "
                } else if cycle_plan.is_rest(session) {
                    "-"
                } else {
                    tracking.grid.status_at(session, cycle).icon()
                };
                write!(f, " {cell} |")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
