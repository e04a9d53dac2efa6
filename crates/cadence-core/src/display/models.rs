//! Display implementations for domain models.

use std::fmt;

use crate::models::{Plan, PlanEntry};

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.name)?;
        writeln!(f)?;
        writeln!(
            f,
            "- Sessions: {} ({} training, {} rest)",
            self.sessions,
            self.training_sessions(),
            self.sessions - self.training_sessions()
        )?;

        if self.activities.is_empty() {
            writeln!(f, "\nNo sessions in this plan.")?;
            return Ok(());
        }

        writeln!(f, "\n## Sessions")?;
        writeln!(f)?;
        for (i, activity) in self.activities.iter().enumerate() {
            if activity.is_rest {
                writeln!(f, "{}. *rest*", i + 1)?;
            } else {
                writeln!(f, "{}. {}", i + 1, activity.text)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for PlanEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} ({} sessions)", self.id, self.name, self.sessions)
    }
}
