//! Command definitions and their handlers
//!
//! Argument structures carry clap derives and convert into the core
//! parameter types, so `cadence-core` stays free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Tracker intents
//! ```
//!
//! Positions typed by the user (sessions, cycles) are 1-based, the core is
//! 0-based; the conversion happens here.

use anyhow::{Context, Result};
use cadence_core::{
    display::{chart::DEFAULT_CHART_HEIGHT, GridView, OperationStatus, PlanList, SummaryChart},
    engine::Direction,
    models::{Plan, PlanId, Status, MAX_SESSIONS},
    params::{ActivityInput, ChangeCycle, Id, SavePlan, ToggleCell},
    Tracker,
};
use clap::{Args, Subcommand};
use log::warn;

use crate::renderer::TerminalRenderer;

/// Parses a 1-based position into a 0-based index.
fn parse_position(value: &str) -> std::result::Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("positions start at 1".to_string()),
        Ok(position) => Ok(position - 1),
        Err(e) => Err(e.to_string()),
    }
}

/// Parses a 1-based session position that fits in a plan.
fn parse_session_position(value: &str) -> std::result::Result<usize, String> {
    match parse_position(value)? {
        index if index < MAX_SESSIONS => Ok(index),
        _ => Err(format!("plans have at most {MAX_SESSIONS} sessions")),
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// List your plans
    #[command(aliases = ["l", "ls"])]
    List,
    /// Create a new empty plan and select it
    #[command(alias = "c")]
    Create,
    /// Select the plan to track
    Select(SelectPlanArgs),
    /// Delete the selected plan and its attendance
    #[command(aliases = ["d", "rm"])]
    Delete,
    /// Show the selected plan's sessions
    #[command(alias = "s")]
    Show,
    /// Change the selected plan's name or sessions
    Save(SavePlanArgs),
}

/// Select the plan to track
#[derive(Args)]
pub struct SelectPlanArgs {
    /// ID of the plan, as shown by `plan list`
    pub id: PlanId,
}

impl From<SelectPlanArgs> for Id {
    fn from(val: SelectPlanArgs) -> Self {
        Id { id: val.id }
    }
}

/// Change the selected plan
///
/// Options left out keep their current value. When the saved plan differs
/// from the stored one, the stored version is kept for the cycles before the
/// current one.
#[derive(Args)]
pub struct SavePlanArgs {
    /// New name for the plan
    #[arg(short, long)]
    pub name: Option<String>,
    /// Number of sessions per cycle (at most 30); defaults to the number of
    /// activities
    #[arg(long, allow_negative_numbers = true)]
    pub sessions: Option<i64>,
    /// Activity text, once per session in order; replaces all activities
    #[arg(short, long = "activity")]
    pub activities: Vec<String>,
    /// Make the session at this position a rest day
    #[arg(long = "rest", value_parser = parse_session_position)]
    pub rest: Vec<usize>,
}

impl SavePlanArgs {
    /// Merges the given options over `current`.
    pub fn into_params(self, current: &Plan) -> SavePlan {
        let mut activities: Vec<ActivityInput> = if self.activities.is_empty() {
            current
                .activities
                .iter()
                .map(|a| ActivityInput {
                    text: a.text.clone(),
                    is_rest: a.is_rest,
                })
                .collect()
        } else {
            self.activities
                .into_iter()
                .map(|text| ActivityInput {
                    text,
                    is_rest: false,
                })
                .collect()
        };

        for position in self.rest.into_iter().filter(|p| *p < MAX_SESSIONS) {
            if activities.len() <= position {
                activities.resize_with(position + 1, ActivityInput::default);
            }
            activities[position].is_rest = true;
        }

        SavePlan {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            sessions: self
                .sessions
                .unwrap_or_else(|| i64::try_from(activities.len()).unwrap_or(i64::MAX)),
            activities,
        }
    }
}

/// Advance one session of the current cycle to its next status
///
/// Statuses go unset → done → partial → missed → unset.
#[derive(Args)]
pub struct ToggleArgs {
    /// Session position, starting at 1
    #[arg(value_parser = parse_position)]
    pub session: usize,
    /// Cycle to change, starting at 1; defaults to the current cycle
    #[arg(long, value_parser = parse_position)]
    pub cycle: Option<usize>,
    /// Keep advancing until the session reaches this status (unset, done,
    /// partial, missed or 0-3)
    #[arg(long)]
    pub to: Option<Status>,
}

impl ToggleArgs {
    pub fn into_params(self, current_cycle: usize) -> ToggleCell {
        ToggleCell {
            session: self.session,
            cycle: self.cycle.unwrap_or(current_cycle),
        }
    }
}

#[derive(Subcommand)]
pub enum CycleCommands {
    /// Move to the next cycle
    #[command(alias = "n")]
    Next,
    /// Move to the previous cycle
    #[command(aliases = ["p", "previous"])]
    Prev,
}

impl From<CycleCommands> for ChangeCycle {
    fn from(val: CycleCommands) -> Self {
        let direction = match val {
            CycleCommands::Next => Direction::Next,
            CycleCommands::Prev => Direction::Prev,
        };
        ChangeCycle { direction }
    }
}

/// Chart done, partial and missed sessions per cycle
#[derive(Args)]
pub struct SummaryArgs {
    /// Height of the chart in rows
    #[arg(long, default_value_t = DEFAULT_CHART_HEIGHT)]
    pub height: usize,
}

/// Handler for CLI commands
pub struct Cli {
    tracker: Tracker,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(tracker: Tracker, renderer: TerminalRenderer) -> Self {
        Self { tracker, renderer }
    }

    fn report(&self, status: &OperationStatus, details: &str) -> Result<()> {
        self.renderer.render(&format!("{status}\n{details}"))
    }

    pub async fn handle_plan_command(&mut self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::List => self.list_plans().await,
            PlanCommands::Create => {
                let id = self
                    .tracker
                    .create_plan()
                    .await
                    .context("Failed to create plan")?;
                let plan = self.tracker.snapshot().plan.to_string();
                self.report(&OperationStatus::success(format!("Created plan {id}")), &plan)
            }
            PlanCommands::Select(args) => {
                let Id { id } = args.into();
                self.tracker
                    .select_plan(id)
                    .await
                    .with_context(|| format!("Failed to select plan {id}"))?;
                let grid = GridView::new(self.tracker.snapshot()).to_string();
                self.report(&OperationStatus::success(format!("Selected plan {id}")), &grid)
            }
            PlanCommands::Delete => {
                let id = self
                    .tracker
                    .delete_plan()
                    .await
                    .context("Failed to delete plan")?;
                let selected = self.tracker.snapshot();
                let message = format!(
                    "Deleted plan {id}, now tracking {}. {}",
                    selected.id, selected.plan.name
                );
                self.report(&OperationStatus::success(message), "")
            }
            PlanCommands::Show => self
                .renderer
                .render(&self.tracker.snapshot().plan.to_string()),
            PlanCommands::Save(args) => {
                let params = args.into_params(&self.tracker.snapshot().plan);
                let outcome = self
                    .tracker
                    .save_plan(&params)
                    .await
                    .context("Failed to save plan")?;

                let cycle = self.tracker.snapshot().tracking.current_cycle_index + 1;
                let message = match (outcome.changed, &outcome.history) {
                    (false, _) => "Plan unchanged".to_string(),
                    (true, Some(_)) => {
                        format!("Saved plan, earlier cycles keep the version used before cycle {cycle}")
                    }
                    (true, None) => "Saved plan".to_string(),
                };
                self.report(&OperationStatus::success(message), &outcome.plan.to_string())
            }
        }
    }

    pub async fn list_plans(&self) -> Result<()> {
        let plans = self.tracker.plans().await.context("Failed to list plans")?;
        let list = PlanList::new(&plans).with_selected(self.tracker.snapshot().id);
        self.renderer.render(&list.to_string())
    }

    pub async fn toggle(&mut self, args: ToggleArgs) -> Result<()> {
        let tracking = &self.tracker.snapshot().tracking;
        let current = tracking.current_cycle_index;
        let target = args.to;
        let cell = args.into_params(current);

        let mut status = tracking.grid.status_at(cell.session, cell.cycle);
        let steps = match target {
            Some(target) => (target.code() + 4 - status.code()) % 4,
            None => 1,
        };
        for _ in 0..steps {
            let next = self
                .tracker
                .toggle_cell(cell)
                .await
                .context("Failed to record attendance")?;
            if next == status {
                break;
            }
            status = next;
        }

        let status = if cell.cycle == current {
            OperationStatus::success(format!(
                "Session {} in cycle {} is now {status}",
                cell.session + 1,
                cell.cycle + 1
            ))
        } else {
            OperationStatus::failure(format!(
                "Only the current cycle ({}) can be changed",
                current + 1
            ))
        };
        self.report(&status, &GridView::new(self.tracker.snapshot()).to_string())
    }

    pub async fn handle_cycle_command(&mut self, command: CycleCommands) -> Result<()> {
        let ChangeCycle { direction } = command.into();
        let cycle = self
            .tracker
            .change_cycle(direction)
            .await
            .context("Failed to change cycle")?;
        let grid = GridView::new(self.tracker.snapshot()).to_string();
        self.report(
            &OperationStatus::success(format!("Now on cycle {}", cycle + 1)),
            &grid,
        )
    }

    pub fn show(&self) -> Result<()> {
        self.renderer
            .render(&GridView::new(self.tracker.snapshot()).to_string())
    }

    pub fn summary(&self, args: &SummaryArgs) -> Result<()> {
        let summaries = self.tracker.snapshot().summary();
        let chart = SummaryChart::new(&summaries).with_height(args.height);
        self.renderer.render(&chart.to_string())
    }

    pub async fn watch(&self) -> Result<()> {
        let renderer = self.renderer.clone();
        let watch = self.tracker.watch(move |snapshot| match snapshot {
            Ok(snapshot) => {
                renderer.clear();
                if let Err(e) = renderer.render(&GridView::new(&snapshot).to_string()) {
                    warn!("Failed to render update: {e}");
                }
            }
            Err(e) => warn!("Failed to load update: {e}"),
        });

        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for Ctrl-C")?;
        watch.cancel();
        Ok(())
    }
}
