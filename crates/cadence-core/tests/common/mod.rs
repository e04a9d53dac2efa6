use std::{future::Future, time::Duration};

use cadence_core::{models::UserScope, Store, StoreBuilder};
use tempfile::TempDir;
use tokio::{sync::mpsc::UnboundedReceiver, time::timeout};

/// Helper function to create a test store
pub async fn create_test_store() -> (TempDir, Store) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let store = StoreBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create store");
    (temp_dir, store)
}

pub fn owner(user: &str) -> UserScope {
    UserScope::new("cadence", user).expect("Invalid user")
}

/// Waits for the next subscription delivery.
pub async fn next<T>(rx: &mut UnboundedReceiver<T>) -> T {
    within(rx.recv())
        .await
        .expect("Subscription channel closed")
}

pub async fn within<F: Future>(future: F) -> F::Output {
    timeout(Duration::from_secs(5), future)
        .await
        .expect("Timed out waiting for delivery")
}
