//! Plan document CRUD, plan listing and the plan save transaction.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::parse_body;
use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{DocumentKey, Plan, PlanEntry, PlanHistory, PlanId, TrackingData, UserScope},
};

const INSERT_PLAN_SQL: &str =
    "INSERT INTO plans (scope, user_id, body, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)";
const INSERT_TRACKING_SQL: &str =
    "INSERT INTO tracking (plan_id, body, updated_at) VALUES (?1, ?2, ?3)";
const SELECT_PLAN_SQL: &str =
    "SELECT body FROM plans WHERE id = ?1 AND scope = ?2 AND user_id = ?3";
const UPDATE_PLAN_SQL: &str =
    "UPDATE plans SET body = ?1, updated_at = ?2 WHERE id = ?3 AND scope = ?4 AND user_id = ?5";
const LIST_PLANS_SQL: &str =
    "SELECT id, body FROM plans WHERE scope = ?1 AND user_id = ?2 ORDER BY id";
const COUNT_PLANS_SQL: &str = "SELECT COUNT(*) FROM plans WHERE scope = ?1 AND user_id = ?2";
const CHECK_PLAN_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM plans WHERE id = ?1 AND scope = ?2 AND user_id = ?3)";
const DELETE_TRACKING_SQL: &str = "DELETE FROM tracking WHERE plan_id = ?1";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";
const SELECT_SELECTION_SQL: &str =
    "SELECT plan_id FROM selections WHERE scope = ?1 AND user_id = ?2";
const UPSERT_SELECTION_SQL: &str = "INSERT INTO selections (scope, user_id, plan_id) VALUES (?1, ?2, ?3) \
     ON CONFLICT (scope, user_id) DO UPDATE SET plan_id = excluded.plan_id";

impl super::Database {
    /// Creates a plan document together with its empty tracking document.
    ///
    /// Both rows are written in one transaction, so a plan never exists
    /// without tracking data.
    pub fn create_plan(&mut self, owner: &UserScope, plan: &Plan) -> Result<PlanId> {
        let plan_body = serde_json::to_string(plan)?;
        let tracking_body = serde_json::to_string(&TrackingData::default())?;
        let now = Timestamp::now().to_string();

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(INSERT_PLAN_SQL, params![owner.scope, owner.user, plan_body, now])
            .db_context("Failed to insert plan")?;
        let id = tx.last_insert_rowid();

        tx.execute(INSERT_TRACKING_SQL, params![id, tracking_body, now])
            .db_context("Failed to insert tracking data")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(id as PlanId)
    }

    /// Retrieves a plan document, sanitized.
    pub fn get_plan(&self, key: &DocumentKey) -> Result<Option<Plan>> {
        let body: Option<String> = self
            .connection
            .query_row(
                SELECT_PLAN_SQL,
                params![key.plan as i64, key.scope, key.user],
                |row| row.get(0),
            )
            .optional()
            .db_context("Failed to query plan")?;

        Ok(body.map(|body| Plan::sanitize(&parse_body(&body))))
    }

    /// Replaces a plan document.
    pub fn put_plan(&mut self, key: &DocumentKey, plan: &Plan) -> Result<()> {
        let body = serde_json::to_string(plan)?;
        let updated = self
            .connection
            .execute(
                UPDATE_PLAN_SQL,
                params![body, Timestamp::now().to_string(), key.plan as i64, key.scope, key.user],
            )
            .db_context("Failed to update plan")?;

        if updated == 0 {
            return Err(TrackerError::PlanNotFound { id: key.plan });
        }
        Ok(())
    }

    /// Stores a saved plan, archiving history first when there is any.
    ///
    /// History and plan are written in a single transaction with the history
    /// statement issued first, so the archived snapshot is never lost while
    /// the new plan is already visible.
    pub fn save_plan_with_history(
        &mut self,
        key: &DocumentKey,
        plan: &Plan,
        history: Option<&PlanHistory>,
    ) -> Result<()> {
        let plan_body = serde_json::to_string(plan)?;
        let now = Timestamp::now().to_string();

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if let Some(history) = history {
            let mut tracking = Self::read_tracking(&tx, key)?
                .ok_or(TrackerError::PlanNotFound { id: key.plan })?;
            tracking.plan_history = history.clone();
            Self::write_tracking(&tx, key, &tracking, &now)?;
        }

        let updated = tx
            .execute(
                UPDATE_PLAN_SQL,
                params![plan_body, now, key.plan as i64, key.scope, key.user],
            )
            .db_context("Failed to update plan")?;
        if updated == 0 {
            return Err(TrackerError::PlanNotFound { id: key.plan });
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Lists the plans owned by a user, oldest first.
    pub fn list_plans(&self, owner: &UserScope) -> Result<Vec<PlanEntry>> {
        let mut stmt = self
            .connection
            .prepare(LIST_PLANS_SQL)
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map(params![owner.scope, owner.user], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
            })
            .db_context("Failed to query plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to read plan row")?;

        Ok(rows
            .into_iter()
            .map(|(id, body)| {
                let plan = Plan::sanitize(&parse_body(&body));
                PlanEntry {
                    id: id as PlanId,
                    name: plan.name,
                    sessions: plan.sessions,
                }
            })
            .collect())
    }

    /// Deletes a plan and its tracking data.
    ///
    /// Refused with [`TrackerError::LastPlan`] when it is the owner's only
    /// plan; nothing is removed in that case.
    pub fn delete_plan(&mut self, key: &DocumentKey) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(
                CHECK_PLAN_EXISTS_SQL,
                params![key.plan as i64, key.scope, key.user],
                |row| row.get(0),
            )
            .db_context("Failed to check plan existence")?;
        if !exists {
            return Err(TrackerError::PlanNotFound { id: key.plan });
        }

        let count: i64 = tx
            .query_row(COUNT_PLANS_SQL, params![key.scope, key.user], |row| row.get(0))
            .db_context("Failed to count plans")?;
        if count <= 1 {
            return Err(TrackerError::LastPlan { id: key.plan });
        }

        tx.execute(DELETE_TRACKING_SQL, params![key.plan as i64])
            .db_context("Failed to delete tracking data")?;
        tx.execute(DELETE_PLAN_SQL, params![key.plan as i64])
            .db_context("Failed to delete plan")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// The plan the owner selected last, if it still exists.
    pub fn get_selection(&self, owner: &UserScope) -> Result<Option<PlanId>> {
        let id: Option<i64> = self
            .connection
            .query_row(SELECT_SELECTION_SQL, params![owner.scope, owner.user], |row| {
                row.get(0)
            })
            .optional()
            .db_context("Failed to query selection")?;
        Ok(id.map(|id| id as PlanId))
    }

    /// Remembers the owner's selected plan.
    pub fn set_selection(&mut self, key: &DocumentKey) -> Result<()> {
        self.connection
            .execute(UPSERT_SELECTION_SQL, params![key.scope, key.user, key.plan as i64])
            .db_context("Failed to store selection")?;
        Ok(())
    }
}
