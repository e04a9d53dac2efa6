//! The intent layer between an interface and the store.
//!
//! A [`Tracker`] belongs to one authenticated user and always has exactly one
//! selected plan. Each intent reads the current documents, hands them to the
//! pure [`crate::engine`] functions and writes back whole documents. The
//! in-memory [`Snapshot`] is only replaced after the write succeeded, so a
//! failed intent leaves the tracker showing what is actually stored.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │     Intents     │    │     Engine      │    │      Store      │
//! │ (toggle, cycle, │───▶│ (resolve, grid, │───▶│ (SQLite docs,   │
//! │  save, select)  │    │  archive, ...)  │    │  subscriptions) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use cadence_core::{
//!     engine::Direction,
//!     models::UserScope,
//!     params::ToggleCell,
//!     StoreBuilder, Tracker,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = StoreBuilder::new().build().await?;
//! let owner = UserScope::new("cadence", "alex")?;
//! let mut tracker = Tracker::open(store, owner, None).await?;
//!
//! tracker.toggle_cell(ToggleCell { session: 0, cycle: 0 }).await?;
//! tracker.change_cycle(Direction::Next).await?;
//!
//! for (cycle, counts) in tracker.snapshot().summary().iter().enumerate() {
//!     println!("cycle {cycle}: {} done", counts.done);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, info, warn};

use crate::{
    engine::{self, ArchivedSave, Direction},
    error::{Result, StorageResultExt, TrackerError},
    models::{
        CycleSummary, DocumentKey, Plan, PlanEntry, PlanId, Status, TrackingData, UserScope,
    },
    params::{SavePlan, ToggleCell},
    store::{Store, Subscription},
};


/// The selected plan and its tracking data as last loaded or written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub id: PlanId,
    pub plan: Plan,
    pub tracking: TrackingData,
}

impl Snapshot {
    /// The plan version in force during `cycle`.
    pub fn plan_for_cycle(&self, cycle: usize) -> &Plan {
        engine::resolve(cycle, &self.plan, &self.tracking.plan_history)
    }

    /// Per-cycle counts from the first cycle through the current one.
    pub fn summary(&self) -> Vec<CycleSummary> {
        engine::summarize(&self.plan, &self.tracking)
    }

    /// Number of cycle columns a grid view shows.
    pub fn visible_columns(&self) -> usize {
        engine::visible_columns(self.tracking.highest_cycle_index)
    }
}

/// Intent handler for one user's plans.
pub struct Tracker {
    store: Store,
    owner: UserScope,
    snapshot: Snapshot,
}

impl Tracker {
    /// Opens the tracker for `owner`.
    ///
    /// Selects `preferred` when given, otherwise the plan the user selected
    /// last, otherwise their first plan. A user without plans gets a fresh
    /// default plan so there is always one to select.
    ///
    /// # Errors
    ///
    /// `TrackerError::PlanNotFound` when `preferred` is not one of the
    /// owner's plans, `TrackerError::Load`/`TrackerError::Save` when storage
    /// fails.
    pub async fn open(store: Store, owner: UserScope, preferred: Option<PlanId>) -> Result<Self> {
        let plans = store.list_plans(&owner).await.load_context("plan list")?;
        let contains = |id: PlanId| plans.iter().any(|p| p.id == id);

        let id = match preferred {
            Some(id) if contains(id) => id,
            Some(id) => return Err(TrackerError::PlanNotFound { id }),
            None => {
                let remembered = store
                    .get_selection(&owner)
                    .await
                    .load_context("plan selection")?
                    .filter(|id| contains(*id));

                match remembered.or_else(|| plans.first().map(|p| p.id)) {
                    Some(id) => id,
                    None => {
                        info!("No plans for {owner}, creating the default plan");
                        store
                            .create_plan(&owner, &Plan::default())
                            .await
                            .save_context("new plan")?
                    }
                }
            }
        };

        let snapshot = Self::fetch(&store, &owner.plan(id)).await?;
        debug!("Opened tracker for {owner} on plan {id}");
        Ok(Self {
            store,
            owner,
            snapshot,
        })
    }

    async fn fetch(store: &Store, key: &DocumentKey) -> Result<Snapshot> {
        let plan = store
            .get_plan(key)
            .await
            .load_context("plan document")?
            .ok_or(TrackerError::PlanNotFound { id: key.plan })?;
        let tracking = store
            .get_tracking(key)
            .await
            .load_context("tracking document")?
            .ok_or(TrackerError::PlanNotFound { id: key.plan })?;

        Ok(Snapshot {
            id: key.plan,
            plan,
            tracking,
        })
    }

    fn key(&self) -> DocumentKey {
        self.owner.plan(self.snapshot.id)
    }

    /// The user this tracker acts for.
    pub fn owner(&self) -> &UserScope {
        &self.owner
    }

    /// The selected plan and its tracking data.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Reloads the selected plan from the store.
    pub async fn refresh(&mut self) -> Result<&Snapshot> {
        self.snapshot = Self::fetch(&self.store, &self.key()).await?;
        Ok(&self.snapshot)
    }

    /// Lists the user's plans.
    pub async fn plans(&self) -> Result<Vec<PlanEntry>> {
        self.store
            .list_plans(&self.owner)
            .await
            .load_context("plan list")
    }

    /// Switches to another of the user's plans and remembers the choice.
    pub async fn select_plan(&mut self, id: PlanId) -> Result<&Snapshot> {
        debug!("select_plan: {id}");
        let key = self.owner.plan(id);
        let snapshot = Self::fetch(&self.store, &key).await?;
        self.store
            .set_selection(&key)
            .await
            .save_context("plan selection")?;

        self.snapshot = snapshot;
        Ok(&self.snapshot)
    }

    /// Creates a default plan with empty tracking data and selects it.
    pub async fn create_plan(&mut self) -> Result<PlanId> {
        let id = self
            .store
            .create_plan(&self.owner, &Plan::default())
            .await
            .save_context("new plan")?;
        info!("Created plan {id} for {}", self.owner);

        self.select_plan(id).await?;
        Ok(id)
    }

    /// Deletes the selected plan and selects the first remaining one.
    ///
    /// # Errors
    ///
    /// `TrackerError::LastPlan` when the selected plan is the user's only
    /// plan; nothing is deleted then.
    pub async fn delete_plan(&mut self) -> Result<PlanId> {
        let key = self.key();
        debug!("delete_plan: {key}");

        self.store
            .delete_plan(&key)
            .await
            .map_err(|e| {
                if matches!(e, TrackerError::LastPlan { .. }) {
                    warn!("Refused to delete the only plan of {}", self.owner);
                }
                e
            })
            .save_context("plan deletion")?;
        info!("Deleted plan {key}");

        let next = self
            .plans()
            .await?
            .first()
            .map(|p| p.id)
            .ok_or(TrackerError::PlanNotFound { id: key.plan })?;
        self.select_plan(next).await?;
        Ok(key.plan)
    }

    /// Saves new contents for the selected plan.
    ///
    /// When the plan changed, the outgoing version is archived under the
    /// current cycle so past cycles keep rendering with it.
    pub async fn save_plan(&mut self, params: &SavePlan) -> Result<ArchivedSave> {
        let key = self.key();
        debug!("save_plan: {params:?}");
        let current = Self::fetch(&self.store, &key).await?;

        let outcome = engine::archive_on_save(
            &params.to_document(),
            &current.plan,
            &current.tracking.plan_history,
            current.tracking.current_cycle_index,
        );

        self.store
            .save_plan_with_history(&key, &outcome.plan, outcome.history.clone())
            .await
            .save_context("plan")?;

        if outcome.history.is_some() {
            info!(
                "Archived previous version of plan {} at cycle {}",
                key.plan, current.tracking.current_cycle_index
            );
        }

        let mut tracking = current.tracking;
        if let Some(history) = &outcome.history {
            tracking.plan_history = history.clone();
        }
        self.snapshot = Snapshot {
            id: key.plan,
            plan: outcome.plan.clone(),
            tracking,
        };
        Ok(outcome)
    }

    /// Advances one attendance cell of the current cycle.
    ///
    /// Requests for other cycles, rest sessions or sessions outside the plan
    /// change nothing and write nothing. Returns the cell's status afterwards.
    pub async fn toggle_cell(&mut self, params: ToggleCell) -> Result<Status> {
        let key = self.key();
        debug!("toggle_cell: {params:?}");
        let current = Self::fetch(&self.store, &key).await?;

        let tracking =
            engine::toggle_cell(&current.plan, &current.tracking, params.session, params.cycle);
        if tracking != current.tracking {
            self.store
                .put_tracking(&key, &tracking)
                .await
                .save_context("attendance")?;
        }

        let status = tracking.grid.status_at(params.session, params.cycle);
        self.snapshot = Snapshot {
            tracking,
            ..current
        };
        Ok(status)
    }

    /// Moves the current cycle pointer. Returns the new current cycle.
    pub async fn change_cycle(&mut self, direction: Direction) -> Result<usize> {
        let key = self.key();
        debug!("change_cycle: {direction}");
        let current = Self::fetch(&self.store, &key).await?;

        let tracking = engine::advance(direction, &current.tracking);
        if tracking != current.tracking {
            self.store
                .put_tracking(&key, &tracking)
                .await
                .save_context("cycle change")?;
        }

        let cycle = tracking.current_cycle_index;
        self.snapshot = Snapshot {
            tracking,
            ..current
        };
        Ok(cycle)
    }

    /// Subscribes to the selected plan's documents.
    ///
    /// `callback` receives a full snapshot whenever either document changes,
    /// starting with the current state. Load failures are delivered as
    /// `TrackerError::Load`; a deleted plan as `TrackerError::PlanNotFound`.
    /// Must be called from within a Tokio runtime.
    pub fn watch<C>(&self, callback: C) -> PlanWatch
    where
        C: Fn(Result<Snapshot>) + Send + Sync + 'static,
    {
        let key = self.key();
        let state = Arc::new(Mutex::new(WatchState::default()));
        let callback = Arc::new(callback);

        let plan = {
            let (state, callback, id) = (Arc::clone(&state), Arc::clone(&callback), key.plan);
            self.store.subscribe_plan(&key, move |result| {
                let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
                match result.load_context("plan document") {
                    Ok(Some(plan)) => {
                        state.plan = Some(plan);
                        if let Some(snapshot) = state.snapshot(id) {
                            callback(Ok(snapshot));
                        }
                    }
                    Ok(None) => callback(Err(TrackerError::PlanNotFound { id })),
                    Err(e) => callback(Err(e)),
                }
            })
        };

        let tracking = {
            let (state, callback, id) = (Arc::clone(&state), Arc::clone(&callback), key.plan);
            self.store.subscribe_tracking(&key, move |result| {
                let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
                match result.load_context("tracking document") {
                    Ok(Some(tracking)) => {
                        state.tracking = Some(tracking);
                        if let Some(snapshot) = state.snapshot(id) {
                            callback(Ok(snapshot));
                        }
                    }
                    Ok(None) => callback(Err(TrackerError::PlanNotFound { id })),
                    Err(e) => callback(Err(e)),
                }
            })
        };

        PlanWatch {
            _plan: plan,
            _tracking: tracking,
        }
    }
}

#[derive(Default)]
struct WatchState {
    plan: Option<Plan>,
    tracking: Option<TrackingData>,
}

impl WatchState {
    fn snapshot(&self, id: PlanId) -> Option<Snapshot> {
        Some(Snapshot {
            id,
            plan: self.plan.clone()?,
            tracking: self.tracking.clone()?,
        })
    }
}

/// Live subscription to both documents of a plan.
///
/// Dropping it, or calling [`PlanWatch::cancel`], stops all deliveries.
#[must_use = "dropping a watch cancels it"]
pub struct PlanWatch {
    _plan: Subscription,
    _tracking: Subscription,
}

impl PlanWatch {
    /// Stops delivery for both documents.
    pub fn cancel(self) {}
}
