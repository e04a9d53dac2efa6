//! Tests for the data models.

use serde_json::{json, Value};

use super::*;

fn assert_canonical(plan: &Plan) {
    assert!(plan.sessions <= MAX_SESSIONS);
    assert_eq!(plan.activities.len(), plan.sessions);
    assert!(!plan.name.is_empty());
}

#[test]
fn test_sanitize_is_total() {
    let inputs = [
        Value::Null,
        json!(42),
        json!("plan"),
        json!([1, 2, 3]),
        json!({}),
        json!({ "sessions": "abc" }),
        json!({ "sessions": -4 }),
        json!({ "sessions": 1e9 }),
        json!({ "sessions": null, "activities": "nope" }),
        json!({ "sessions": 3, "activities": [null, 7, { "text": 9, "isRest": "yes" }] }),
        json!({ "name": 12, "sessions": "4.9" }),
    ];

    for input in &inputs {
        let plan = Plan::sanitize(input);
        assert_canonical(&plan);
    }
}

#[test]
fn test_sanitize_is_idempotent() {
    let inputs = [
        Value::Null,
        json!({ "name": "", "sessions": 2.5 }),
        json!({ "name": "Week", "sessions": 40, "activities": [{ "text": "Run" }] }),
        json!({ "sessions": 3, "activities": [{ "text": "A", "isRest": 1 }, {}, { "isRest": true }, { "text": "extra" }] }),
    ];

    for input in &inputs {
        let once = Plan::sanitize(input);
        let twice = Plan::sanitize(&serde_json::to_value(&once).unwrap());
        assert_eq!(once, twice);
    }
}

#[test]
fn test_sanitize_session_count_coercion() {
    assert_eq!(Plan::sanitize(&json!({ "sessions": 4.9 })).sessions, 4);
    assert_eq!(Plan::sanitize(&json!({ "sessions": "7" })).sessions, 7);
    assert_eq!(Plan::sanitize(&json!({ "sessions": 31 })).sessions, 30);
    assert_eq!(Plan::sanitize(&json!({ "sessions": -1 })).sessions, 0);
    assert_eq!(Plan::sanitize(&json!({ "sessions": [] })).sessions, 0);
    assert_eq!(Plan::sanitize(&json!({})).sessions, 0);
}

#[test]
fn test_sanitize_pads_and_truncates_activities() {
    let plan = Plan::sanitize(&json!({
        "name": "Split",
        "sessions": 3,
        "activities": [{ "text": "Push" }, { "text": "Pull", "isRest": false }],
    }));
    assert_eq!(plan.name, "Split");
    assert_eq!(plan.activities[0], Activity::new("Push"));
    assert_eq!(plan.activities[1], Activity::new("Pull"));
    assert_eq!(plan.activities[2], Activity::default());

    let plan = Plan::sanitize(&json!({
        "sessions": 1,
        "activities": [{ "text": "Keep" }, { "text": "Drop" }],
    }));
    assert_eq!(plan.activities, vec![Activity::new("Keep")]);
}

#[test]
fn test_sanitize_field_coercion() {
    let plan = Plan::sanitize(&json!({
        "name": "",
        "sessions": 3,
        "activities": [{ "text": 5, "isRest": 0 }, { "isRest": "x" }, "garbage"],
    }));
    assert_eq!(plan.name, DEFAULT_PLAN_NAME);
    assert_eq!(plan.activities[0], Activity::new("5"));
    assert!(plan.activities[1].is_rest);
    assert_eq!(plan.activities[2], Activity::default());
}

#[test]
fn test_status_cycles_through_four_states() {
    let mut status = Status::Unset;
    let mut seen = Vec::new();
    for _ in 0..8 {
        status = status.next();
        seen.push(status.code());
    }
    assert_eq!(seen, vec![1, 2, 3, 0, 1, 2, 3, 0]);
}

#[test]
fn test_status_serializes_as_code() {
    assert_eq!(serde_json::to_value(Status::Partial).unwrap(), json!(2));
    let status: Status = serde_json::from_value(json!(3)).unwrap();
    assert_eq!(status, Status::Missed);
    let status: Status = serde_json::from_value(json!(9)).unwrap();
    assert_eq!(status, Status::Unset);
    assert_eq!("done".parse::<Status>().unwrap(), Status::Done);
}

#[test]
fn test_grid_reads_absent_cells_as_unset() {
    let grid = AttendanceGrid::from_rows(vec![vec![Status::Done]]);
    assert_eq!(grid.status_at(0, 0), Status::Done);
    assert_eq!(grid.status_at(0, 5), Status::Unset);
    assert_eq!(grid.status_at(9, 0), Status::Unset);
    assert_eq!(AttendanceGrid::new().status_at(0, 0), Status::Unset);
}

#[test]
fn test_grid_toggle_grows_and_leaves_others_alone() {
    let grid = AttendanceGrid::from_rows(vec![vec![Status::Missed, Status::Done]]);
    let toggled = grid.toggled(2, 3, 4);

    assert_eq!(toggled.row_count(), 4);
    assert_eq!(toggled.row(2), &[Status::Unset, Status::Unset, Status::Unset, Status::Done]);
    assert_eq!(toggled.row(0), grid.row(0));
    assert!(toggled.row(1).is_empty());
    assert!(toggled.row(3).is_empty());
    // The source grid is untouched.
    assert_eq!(grid.row_count(), 1);
}

#[test]
fn test_grid_serialized_shape() {
    let grid = AttendanceGrid::from_rows(vec![vec![Status::Done, Status::Missed], vec![]]);
    let value = serde_json::to_value(&grid).unwrap();
    assert_eq!(value, json!([{ "row": [1, 3] }, { "row": [] }]));
    assert_eq!(AttendanceGrid::sanitize(&value), grid);
}

#[test]
fn test_grid_sanitize_keeps_row_positions() {
    let grid = AttendanceGrid::sanitize(&json!([null, { "row": [2, 7, "x", 1.5] }]));
    assert_eq!(grid.row_count(), 2);
    assert!(grid.row(0).is_empty());
    assert_eq!(grid.row(1), &[Status::Partial, Status::Unset, Status::Unset, Status::Unset]);
}

#[test]
fn test_tracking_sanitize_normalizes_fields() {
    let tracking = TrackingData::sanitize(&json!({
        "grid": [{ "row": [1] }],
        "currentCycleIndex": 4.2,
        "highestCycleIndex": 2,
        "planHistory": {
            "3": { "name": "Old", "sessions": 1, "activities": [{ "text": "Swim" }] },
            "later": { "sessions": 2 },
        },
    }));

    assert_eq!(tracking.current_cycle_index, 4);
    assert_eq!(tracking.highest_cycle_index, 4);
    assert_eq!(tracking.grid.status_at(0, 0), Status::Done);
    assert_eq!(tracking.plan_history.len(), 1);
    assert_eq!(tracking.plan_history[&3].activities[0].text, "Swim");
}

#[test]
fn test_tracking_sanitize_of_garbage_is_empty() {
    assert_eq!(TrackingData::sanitize(&Value::Null), TrackingData::default());
    assert_eq!(
        TrackingData::sanitize(&json!({ "currentCycleIndex": -3, "planHistory": [] })),
        TrackingData::default()
    );
}

#[test]
fn test_tracking_sanitize_caps_huge_indices() {
    let tracking = TrackingData::sanitize(&json!({
        "currentCycleIndex": 1e30,
        "highestCycleIndex": "1e30",
        "planHistory": { "18446744073709551615": { "sessions": 1 } },
    }));
    assert_eq!(tracking.current_cycle_index, MAX_CYCLE_INDEX);
    assert_eq!(tracking.highest_cycle_index, MAX_CYCLE_INDEX);

    let columns = crate::engine::visible_columns(tracking.highest_cycle_index);
    assert_eq!(columns, MAX_CYCLE_INDEX + 2);

    let next = crate::engine::advance(crate::engine::Direction::Next, &tracking);
    assert_eq!(next.current_cycle_index, MAX_CYCLE_INDEX);

    let current = Plan::default();
    let resolved = crate::engine::resolve(usize::MAX, &current, &tracking.plan_history);
    assert_eq!(resolved, &current);
    let resolved = crate::engine::resolve(MAX_CYCLE_INDEX, &current, &tracking.plan_history);
    assert_eq!(resolved.sessions, 1);
}

#[test]
fn test_tracking_round_trips_through_json() {
    let mut tracking = TrackingData {
        grid: AttendanceGrid::new().toggled(0, 1, 2),
        current_cycle_index: 1,
        highest_cycle_index: 3,
        plan_history: PlanHistory::new(),
    };
    tracking
        .plan_history
        .insert(2, Plan::with_activities("Old", vec![Activity::new("Run")]));

    let value = serde_json::to_value(&tracking).unwrap();
    assert!(value["planHistory"].get("2").is_some());
    assert_eq!(value["currentCycleIndex"], json!(1));
    assert_eq!(TrackingData::sanitize(&value), tracking);
}

#[test]
fn test_user_scope_requires_identity() {
    assert!(UserScope::new("cadence", "  ").unwrap_err().is_auth());
    assert!(UserScope::new("", "alex").unwrap_err().is_auth());

    let scope = UserScope::new(DEFAULT_SCOPE, " alex ").unwrap();
    assert_eq!(scope.user, "alex");
    assert_eq!(scope.plan(7).to_string(), "cadence/alex/7");
    assert_eq!(scope.plan(7).owner(), scope);
}

#[test]
fn test_chart_scaling() {
    let summaries = [
        CycleSummary { done: 2, partial: 2, missed: 0 },
        CycleSummary { done: 1, partial: 0, missed: 1 },
    ];
    let chart = Chart::scale(&summaries, 100.0);

    assert_eq!(chart.max_positive, 4);
    assert_eq!(chart.max_negative, 1);
    assert!((chart.positive_band - 80.0).abs() < 1e-9);
    assert!((chart.negative_band - 20.0).abs() < 1e-9);
    assert!((chart.bars[0].done - 40.0).abs() < 1e-9);
    assert!((chart.bars[0].partial - 40.0).abs() < 1e-9);
    assert!((chart.bars[1].done - 20.0).abs() < 1e-9);
    assert!((chart.bars[1].missed - 20.0).abs() < 1e-9);
}

#[test]
fn test_chart_scaling_of_empty_history() {
    let chart = Chart::scale(&[CycleSummary::default()], 10.0);
    assert_eq!(chart.max_positive, 1);
    assert_eq!(chart.max_negative, 1);
    assert!((chart.positive_band - 5.0).abs() < 1e-9);
    assert_eq!(chart.bars[0], ChartBar::default());

    assert!(Chart::scale(&[], 10.0).bars.is_empty());
}
