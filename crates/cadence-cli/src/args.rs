use std::path::PathBuf;

use cadence_core::models::{PlanId, DEFAULT_SCOPE};
use clap::{Parser, Subcommand};

use crate::cli::{CycleCommands, PlanCommands, SummaryArgs, ToggleArgs};

/// Track attendance across repeating training plans
///
/// A plan is a list of sessions that repeats every cycle. Mark each session
/// of the current cycle as done, partial or missed, move on to the next
/// cycle, and edit the plan at any time without rewriting the past: earlier
/// cycles keep the sessions they were recorded against.
#[derive(Parser)]
#[command(version, about, name = "cadence")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/cadence/cadence.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// User whose plans are shown and changed
    #[arg(long, global = true, env = "CADENCE_USER")]
    pub user: Option<String>,

    /// Application scope the user's plans are stored under
    #[arg(long, global = true, env = "CADENCE_SCOPE", default_value = DEFAULT_SCOPE)]
    pub scope: String,

    /// Work on this plan instead of the last selected one
    #[arg(long, global = true)]
    pub plan: Option<PlanId>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Cadence CLI
///
/// Running without a command shows the attendance grid of the selected plan.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Advance one session of the current cycle to its next status
    #[command(alias = "t")]
    Toggle(ToggleArgs),
    /// Move between cycles
    #[command(alias = "c")]
    Cycle {
        #[command(subcommand)]
        command: CycleCommands,
    },
    /// Show the attendance grid
    #[command(alias = "s")]
    Show,
    /// Chart done, partial and missed sessions per cycle
    Summary(SummaryArgs),
    /// Show the attendance grid and redraw it on every change until Ctrl-C
    Watch,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from(["cadence", "show", "--user", "alex", "--plan", "3"])
            .expect("Failed to parse");
        assert_eq!(args.user.as_deref(), Some("alex"));
        assert_eq!(args.plan, Some(3));
        assert!(matches!(args.command, Some(Commands::Show)));
    }
}
