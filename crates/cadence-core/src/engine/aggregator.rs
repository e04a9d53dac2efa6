//! Per-cycle attendance summaries.

use super::resolver::resolve;
use crate::models::{CycleSummary, Plan, Status, TrackingData};

/// Counts done, partial and missed sessions for every cycle up to and
/// including the current one.
///
/// Each cycle is counted against the plan that was in force for it, so a
/// session that was a rest day at the time never contributes, and sessions
/// added later are not counted backwards. Unset cells count as nothing.
/// A plan without sessions has no summary.
pub fn summarize(plan: &Plan, tracking: &TrackingData) -> Vec<CycleSummary> {
    if plan.sessions == 0 {
        return Vec::new();
    }

    (0..=tracking.current_cycle_index)
        .map(|cycle| {
            let active = resolve(cycle, plan, &tracking.plan_history);
            active
                .activities
                .iter()
                .enumerate()
                .filter(|(_, activity)| !activity.is_rest)
                .fold(CycleSummary::default(), |mut summary, (session, _)| {
                    match tracking.grid.status_at(session, cycle) {
                        Status::Done => summary.done += 1,
                        Status::Partial => summary.partial += 1,
                        Status::Missed => summary.missed += 1,
                        Status::Unset => {}
                    }
                    summary
                })
        })
        .collect()
}
