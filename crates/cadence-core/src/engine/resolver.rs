//! Resolution of the plan version that was in force during a cycle.

use std::ops::Bound::{Excluded, Unbounded};

use crate::models::{Plan, PlanHistory};

/// Returns the plan that was active during `cycle`.
///
/// History keys mark the cycle pointer at which a plan was replaced, so the
/// plan in force for `cycle` is the snapshot under the smallest key strictly
/// greater than `cycle`. When no later change exists the current plan applies.
pub fn resolve<'a>(cycle: usize, current: &'a Plan, history: &'a PlanHistory) -> &'a Plan {
    history
        .range((Excluded(cycle), Unbounded))
        .next()
        .map_or(current, |(_, snapshot)| snapshot)
}
