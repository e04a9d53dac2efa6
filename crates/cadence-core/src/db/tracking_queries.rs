//! Tracking document reads and writes.

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension};

use super::parse_body;
use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{DocumentKey, TrackingData},
};

// A plan whose tracking row is missing reads as empty tracking data.
const SELECT_TRACKING_SQL: &str = "SELECT t.body FROM plans p LEFT JOIN tracking t ON t.plan_id = p.id \
     WHERE p.id = ?1 AND p.scope = ?2 AND p.user_id = ?3";
const UPSERT_TRACKING_SQL: &str = "INSERT INTO tracking (plan_id, body, updated_at) \
     SELECT id, ?1, ?2 FROM plans WHERE id = ?3 AND scope = ?4 AND user_id = ?5 \
     ON CONFLICT (plan_id) DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at";

impl super::Database {
    /// Retrieves the tracking document of a plan, sanitized.
    pub fn get_tracking(&self, key: &DocumentKey) -> Result<Option<TrackingData>> {
        Self::read_tracking(&self.connection, key)
    }

    /// Replaces the tracking document of a plan.
    pub fn put_tracking(&mut self, key: &DocumentKey, tracking: &TrackingData) -> Result<()> {
        Self::write_tracking(&self.connection, key, tracking, &Timestamp::now().to_string())
    }

    pub(super) fn read_tracking(
        connection: &Connection,
        key: &DocumentKey,
    ) -> Result<Option<TrackingData>> {
        let body: Option<Option<String>> = connection
            .query_row(
                SELECT_TRACKING_SQL,
                params![key.plan as i64, key.scope, key.user],
                |row| row.get(0),
            )
            .optional()
            .db_context("Failed to query tracking data")?;

        Ok(body.map(|body| {
            body.map_or_else(TrackingData::default, |body| {
                TrackingData::sanitize(&parse_body(&body))
            })
        }))
    }

    pub(super) fn write_tracking(
        connection: &Connection,
        key: &DocumentKey,
        tracking: &TrackingData,
        now: &str,
    ) -> Result<()> {
        let body = serde_json::to_string(tracking)?;
        let written = connection
            .execute(
                UPSERT_TRACKING_SQL,
                params![body, now, key.plan as i64, key.scope, key.user],
            )
            .db_context("Failed to write tracking data")?;

        if written == 0 {
            return Err(TrackerError::PlanNotFound { id: key.plan });
        }
        Ok(())
    }
}
