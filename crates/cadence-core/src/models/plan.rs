//! Plan model definition and the sanitizing boundary for plan documents.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum number of sessions a plan can hold.
pub const MAX_SESSIONS: usize = 30;

/// Name given to plans that arrive without one.
pub const DEFAULT_PLAN_NAME: &str = "My Plan";

/// One session of a plan: an activity or a rest day.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Activity {
    /// What to do in this session (empty for rest days)
    #[serde(default)]
    pub text: String,

    /// Rest sessions are never tracked
    #[serde(default, rename = "isRest")]
    pub is_rest: bool,
}

impl Activity {
    /// Creates a training activity.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_rest: false,
        }
    }

    /// Creates a rest session.
    pub fn rest() -> Self {
        Self {
            text: String::new(),
            is_rest: true,
        }
    }
}

/// A recurring plan: an ordered list of sessions.
///
/// Values of this type are canonical: `sessions <= MAX_SESSIONS` and
/// `activities.len() == sessions`. Anything read from storage or typed by a
/// user goes through [`Plan::sanitize`] first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Plan {
    /// Display name of the plan
    pub name: String,

    /// Number of sessions in one cycle
    pub sessions: usize,

    /// One entry per session, in order
    pub activities: Vec<Activity>,
}

impl Default for Plan {
    fn default() -> Self {
        Self {
            name: DEFAULT_PLAN_NAME.to_string(),
            sessions: 0,
            activities: Vec::new(),
        }
    }
}

impl Plan {
    /// Builds a canonical plan from activities, naming it `name`.
    pub fn with_activities(name: impl Into<String>, activities: Vec<Activity>) -> Self {
        let raw = serde_json::json!({
            "name": name.into(),
            "sessions": activities.len(),
            "activities": activities,
        });
        Self::sanitize(&raw)
    }

    /// Normalizes arbitrary input into a canonical plan.
    ///
    /// Never fails: missing or malformed fields fall back to defaults, the
    /// session count is floored and clamped to `0..=MAX_SESSIONS`, and the
    /// activity list is truncated or padded to exactly that many entries.
    /// Applying it to its own output yields the same plan.
    pub fn sanitize(raw: &Value) -> Self {
        let sessions = raw.get("sessions").map_or(0, coerce_session_count);
        let raw_activities = raw.get("activities").and_then(Value::as_array);

        let activities = (0..sessions)
            .map(|i| match raw_activities.and_then(|list| list.get(i)) {
                Some(entry) if !entry.is_null() => Activity {
                    text: entry.get("text").map(coerce_text).unwrap_or_default(),
                    is_rest: entry.get("isRest").is_some_and(coerce_bool),
                },
                _ => Activity::default(),
            })
            .collect();

        let name = match raw.get("name").and_then(Value::as_str) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => DEFAULT_PLAN_NAME.to_string(),
        };

        Self {
            name,
            sessions,
            activities,
        }
    }

    /// Number of sessions that are tracked (not rest days).
    pub fn training_sessions(&self) -> usize {
        self.activities.iter().filter(|a| !a.is_rest).count()
    }

    /// Whether `session` exists in this plan and is a rest day.
    pub fn is_rest(&self, session: usize) -> bool {
        self.activities.get(session).is_some_and(|a| a.is_rest)
    }
}

fn coerce_session_count(value: &Value) -> usize {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() && n > 0.0 => {
            let floored = n.floor();
            if floored >= MAX_SESSIONS as f64 {
                MAX_SESSIONS
            } else {
                floored as usize
            }
        }
        _ => 0,
    }
}

fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}
