//! Cell toggling with the write guards for the attendance grid.

use log::warn;

use super::resolver::resolve;
use crate::models::{Plan, TrackingData};

/// Advances the status of one cell of the live cycle.
///
/// Only the current cycle column is writable, and only for sessions that
/// exist and are not rest days in the plan resolved for that cycle. Any
/// other request returns the tracking data unchanged. The input is never
/// mutated; the returned value carries a grid grown to at least the resolved
/// plan's session count.
pub fn toggle_cell(plan: &Plan, tracking: &TrackingData, session: usize, cycle: usize) -> TrackingData {
    if cycle != tracking.current_cycle_index {
        warn!(
            "Ignoring toggle of cycle {cycle}: only cycle {} is writable",
            tracking.current_cycle_index
        );
        return tracking.clone();
    }

    let active = resolve(cycle, plan, &tracking.plan_history);
    match active.activities.get(session) {
        Some(activity) if !activity.is_rest => TrackingData {
            grid: tracking.grid.toggled(session, cycle, active.sessions),
            ..tracking.clone()
        },
        Some(_) => {
            warn!("Ignoring toggle of rest session {session}");
            tracking.clone()
        }
        None => {
            warn!(
                "Ignoring toggle of session {session}: plan has {} sessions",
                active.sessions
            );
            tracking.clone()
        }
    }
}
