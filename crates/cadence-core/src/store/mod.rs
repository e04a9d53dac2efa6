//! Asynchronous document store with change notification.
//!
//! [`Store`] is the storage boundary of the tracker. Every call opens its own
//! SQLite connection on a blocking task, so a `Store` is cheap to clone and
//! can be shared freely. Successful writes are announced on an in-process
//! broadcast channel; subscriptions listen on it and push the latest full
//! document to their callback.
//!
//! Writes replace whole documents and carry no version token: when two
//! writers race on the same document, the later write wins.
//!
//! ```rust,no_run
//! use cadence_core::{models::UserScope, StoreBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = StoreBuilder::new().build().await?;
//! let owner = UserScope::new("cadence", "alex")?;
//!
//! let subscription = store.subscribe_plans(&owner, |plans| match plans {
//!     Ok(plans) => println!("{} plans", plans.len()),
//!     Err(e) => eprintln!("{e}"),
//! });
//! // ... later
//! subscription.cancel();
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, sync::Arc};

use log::{debug, warn};
use tokio::{
    sync::broadcast::{self, error::RecvError},
    task,
};

pub mod builder;
pub mod subscription;

pub use builder::StoreBuilder;
pub use subscription::Subscription;

use self::subscription::Gate;
use crate::{
    db::Database,
    error::{Result, TrackerError},
    models::{DocumentKey, Plan, PlanEntry, PlanHistory, PlanId, TrackingData, UserScope},
};

pub(crate) const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// A document that was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// A plan document changed
    Plan(DocumentKey),
    /// A tracking document changed
    Tracking(DocumentKey),
    /// Plans were added to or removed from a user's collection
    Collection(UserScope),
}

impl Change {
    fn touches_collection(&self, owner: &UserScope) -> bool {
        match self {
            Change::Collection(scope) => scope == owner,
            // Renaming a plan changes how it is listed
            Change::Plan(key) => key.scope == owner.scope && key.user == owner.user,
            Change::Tracking(_) => false,
        }
    }
}

/// Document store backed by a SQLite file.
#[derive(Clone)]
pub struct Store {
    pub(crate) db_path: PathBuf,
    pub(crate) changes: broadcast::Sender<Change>,
}

impl Store {
    /// Runs `operation` against a fresh connection on the blocking pool.
    async fn run<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            operation(&mut db)
        })
        .await
        .map_err(|e| TrackerError::join(&e))?
    }

    fn announce(&self, change: Change) {
        debug!("Announcing {change:?}");
        // No receivers simply means nobody is subscribed.
        let _ = self.changes.send(change);
    }

    /// Reads a plan document once.
    pub async fn get_plan(&self, key: &DocumentKey) -> Result<Option<Plan>> {
        let key = key.clone();
        self.run(move |db| db.get_plan(&key)).await
    }

    /// Reads a tracking document once.
    pub async fn get_tracking(&self, key: &DocumentKey) -> Result<Option<TrackingData>> {
        let key = key.clone();
        self.run(move |db| db.get_tracking(&key)).await
    }

    /// Replaces a plan document.
    pub async fn put_plan(&self, key: &DocumentKey, plan: &Plan) -> Result<()> {
        let (owned_key, plan) = (key.clone(), plan.clone());
        self.run(move |db| db.put_plan(&owned_key, &plan)).await?;
        self.announce(Change::Plan(key.clone()));
        Ok(())
    }

    /// Replaces a tracking document.
    pub async fn put_tracking(&self, key: &DocumentKey, tracking: &TrackingData) -> Result<()> {
        let (owned_key, tracking) = (key.clone(), tracking.clone());
        self.run(move |db| db.put_tracking(&owned_key, &tracking)).await?;
        self.announce(Change::Tracking(key.clone()));
        Ok(())
    }

    /// Stores a saved plan and, when given, its new history in one
    /// transaction, history first.
    pub async fn save_plan_with_history(
        &self,
        key: &DocumentKey,
        plan: &Plan,
        history: Option<PlanHistory>,
    ) -> Result<()> {
        let archived = history.is_some();
        let (owned_key, plan) = (key.clone(), plan.clone());
        self.run(move |db| db.save_plan_with_history(&owned_key, &plan, history.as_ref()))
            .await?;

        if archived {
            self.announce(Change::Tracking(key.clone()));
        }
        self.announce(Change::Plan(key.clone()));
        Ok(())
    }

    /// Lists the plans in a user's collection.
    pub async fn list_plans(&self, owner: &UserScope) -> Result<Vec<PlanEntry>> {
        let owner = owner.clone();
        self.run(move |db| db.list_plans(&owner)).await
    }

    /// Adds a plan (with empty tracking data) to a user's collection.
    pub async fn create_plan(&self, owner: &UserScope, plan: &Plan) -> Result<PlanId> {
        let (owned, plan) = (owner.clone(), plan.clone());
        let id = self.run(move |db| db.create_plan(&owned, &plan)).await?;
        self.announce(Change::Collection(owner.clone()));
        Ok(id)
    }

    /// Deletes a plan and its tracking data; refuses the owner's last plan.
    pub async fn delete_plan(&self, key: &DocumentKey) -> Result<()> {
        let owned_key = key.clone();
        self.run(move |db| db.delete_plan(&owned_key)).await?;
        self.announce(Change::Collection(key.owner()));
        Ok(())
    }

    /// The plan the user selected last.
    pub async fn get_selection(&self, owner: &UserScope) -> Result<Option<PlanId>> {
        let owner = owner.clone();
        self.run(move |db| db.get_selection(&owner)).await
    }

    /// Remembers the user's selected plan.
    pub async fn set_selection(&self, key: &DocumentKey) -> Result<()> {
        let key = key.clone();
        self.run(move |db| db.set_selection(&key)).await
    }

    /// Subscribes to a plan document.
    ///
    /// The callback receives the current document immediately and again
    /// after every write to it. Must be called from within a Tokio runtime.
    pub fn subscribe_plan<C>(&self, key: &DocumentKey, callback: C) -> Subscription
    where
        C: Fn(Result<Option<Plan>>) + Send + 'static,
    {
        let (watched, loaded) = (key.clone(), key.clone());
        self.watch(
            move |change| matches!(change, Change::Plan(key) if *key == watched),
            move |db| db.get_plan(&loaded),
            callback,
        )
    }

    /// Subscribes to a tracking document.
    ///
    /// Same delivery rules as [`Store::subscribe_plan`].
    pub fn subscribe_tracking<C>(&self, key: &DocumentKey, callback: C) -> Subscription
    where
        C: Fn(Result<Option<TrackingData>>) + Send + 'static,
    {
        let (watched, loaded) = (key.clone(), key.clone());
        self.watch(
            move |change| matches!(change, Change::Tracking(key) if *key == watched),
            move |db| db.get_tracking(&loaded),
            callback,
        )
    }

    /// Subscribes to the list of plans a user owns.
    pub fn subscribe_plans<C>(&self, owner: &UserScope, callback: C) -> Subscription
    where
        C: Fn(Result<Vec<PlanEntry>>) + Send + 'static,
    {
        let (watched, loaded) = (owner.clone(), owner.clone());
        self.watch(
            move |change| change.touches_collection(&watched),
            move |db| db.list_plans(&loaded),
            callback,
        )
    }

    async fn load_shared<T, L>(&self, load: &Arc<L>) -> Result<T>
    where
        T: Send + 'static,
        L: Fn(&mut Database) -> Result<T> + Send + Sync + 'static,
    {
        let load = Arc::clone(load);
        self.run(move |db| (*load)(db)).await
    }

    fn watch<T, I, L, C>(&self, interested: I, load: L, callback: C) -> Subscription
    where
        T: Send + 'static,
        I: Fn(&Change) -> bool + Send + 'static,
        L: Fn(&mut Database) -> Result<T> + Send + Sync + 'static,
        C: Fn(Result<T>) + Send + 'static,
    {
        let mut receiver = self.changes.subscribe();
        let gate = Arc::new(Gate::new());
        let task_gate = Arc::clone(&gate);
        let store = self.clone();
        let load = Arc::new(load);

        let task = tokio::spawn(async move {
            let initial = store.load_shared(&load).await;
            task_gate.pass(|| callback(initial));

            loop {
                match receiver.recv().await {
                    Ok(change) if interested(&change) => {}
                    Ok(_) => continue,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Subscription lagged by {skipped} changes, reloading");
                    }
                    Err(RecvError::Closed) => break,
                }

                let latest = store.load_shared(&load).await;
                if let Err(e) = &latest {
                    warn!("Subscription failed to reload document: {e}");
                }
                task_gate.pass(|| callback(latest));
            }
        });

        Subscription::new(gate, task)
    }
}
