mod common;

use std::time::Duration;

use cadence_core::{
    models::{Activity, Plan, PlanHistory, Status, TrackingData},
    TrackerError,
};
use common::{create_test_store, next, owner};
use tokio::{sync::mpsc, time::timeout};

#[tokio::test]
async fn test_documents_are_scoped_to_their_owner() {
    let (_temp_dir, store) = create_test_store().await;
    let alex = owner("alex");
    let id = store
        .create_plan(&alex, &Plan::default())
        .await
        .expect("Failed to create plan");

    let foreign = owner("sam").plan(id);
    assert_eq!(store.get_plan(&foreign).await.expect("Failed to read"), None);
    assert_eq!(store.get_tracking(&foreign).await.expect("Failed to read"), None);

    let result = store.put_plan(&foreign, &Plan::default()).await;
    assert!(matches!(result, Err(TrackerError::PlanNotFound { .. })));
    let result = store.put_tracking(&foreign, &TrackingData::default()).await;
    assert!(matches!(result, Err(TrackerError::PlanNotFound { .. })));
}

#[tokio::test]
async fn test_save_with_history_is_visible_in_both_documents() {
    let (_temp_dir, store) = create_test_store().await;
    let key = owner("alex").plan(
        store
            .create_plan(&owner("alex"), &Plan::default())
            .await
            .expect("Failed to create plan"),
    );

    let old = Plan::with_activities("Base", vec![Activity::new("Run")]);
    let new = Plan::with_activities("Base", vec![Activity::new("Swim")]);
    let history = PlanHistory::from([(4, old)]);

    store
        .save_plan_with_history(&key, &new, Some(history.clone()))
        .await
        .expect("Failed to save");

    assert_eq!(store.get_plan(&key).await.expect("Failed to read"), Some(new));
    let tracking = store
        .get_tracking(&key)
        .await
        .expect("Failed to read")
        .expect("Missing tracking");
    assert_eq!(tracking.plan_history, history);
}

#[tokio::test]
async fn test_delete_guard_counts_only_the_owners_plans() {
    let (_temp_dir, store) = create_test_store().await;
    let alex = store
        .create_plan(&owner("alex"), &Plan::default())
        .await
        .expect("Failed to create plan");
    store
        .create_plan(&owner("sam"), &Plan::default())
        .await
        .expect("Failed to create plan");

    let result = store.delete_plan(&owner("alex").plan(alex)).await;
    assert!(matches!(result, Err(TrackerError::LastPlan { id }) if id == alex));
}

#[tokio::test]
async fn test_subscribe_tracking_pushes_every_write() {
    let (_temp_dir, store) = create_test_store().await;
    let key = owner("alex").plan(
        store
            .create_plan(&owner("alex"), &Plan::default())
            .await
            .expect("Failed to create plan"),
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let subscription = store.subscribe_tracking(&key, move |tracking| {
        let _ = tx.send(tracking);
    });

    let initial = next(&mut rx).await.expect("Load failed");
    assert_eq!(initial, Some(TrackingData::default()));

    let mut tracking = TrackingData::default();
    tracking.grid = tracking.grid.toggled(0, 0, 1);
    store.put_tracking(&key, &tracking).await.expect("Failed to write");

    let pushed = next(&mut rx).await.expect("Reload failed");
    assert_eq!(
        pushed.map(|t| t.grid.status_at(0, 0)),
        Some(Status::Done)
    );
    assert!(subscription.is_active());

    subscription.cancel();
    store.put_tracking(&key, &TrackingData::default()).await.expect("Failed to write");
    let after_cancel = timeout(Duration::from_millis(200), rx.recv()).await;
    assert!(!matches!(after_cancel, Ok(Some(_))));
}

#[tokio::test]
async fn test_subscribe_plan_ignores_other_documents() {
    let (_temp_dir, store) = create_test_store().await;
    let alex = owner("alex");
    let first = alex.plan(store.create_plan(&alex, &Plan::default()).await.expect("create"));
    let second = alex.plan(store.create_plan(&alex, &Plan::default()).await.expect("create"));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let _subscription = store.subscribe_plan(&first, move |plan| {
        let _ = tx.send(plan);
    });
    next(&mut rx).await.expect("Load failed");

    let renamed = Plan::with_activities("Other", vec![]);
    store.put_plan(&second, &renamed).await.expect("Failed to write");
    let renamed_first = Plan::with_activities("First", vec![]);
    store.put_plan(&first, &renamed_first).await.expect("Failed to write");

    let pushed = next(&mut rx).await.expect("Reload failed");
    assert_eq!(pushed, Some(renamed_first));
}

#[tokio::test]
async fn test_subscribe_plans_follows_the_collection() {
    let (_temp_dir, store) = create_test_store().await;
    let alex = owner("alex");
    let first = store.create_plan(&alex, &Plan::default()).await.expect("create");

    let (tx, mut rx) = mpsc::unbounded_channel();
    let _subscription = store.subscribe_plans(&alex, move |plans| {
        let _ = tx.send(plans);
    });
    let initial = next(&mut rx).await.expect("Load failed");
    assert_eq!(initial.len(), 1);

    store
        .create_plan(&owner("sam"), &Plan::default())
        .await
        .expect("create");
    let second = store.create_plan(&alex, &Plan::default()).await.expect("create");

    let listed = next(&mut rx).await.expect("Reload failed");
    assert_eq!(
        listed.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![first, second]
    );
}

#[test]
fn test_blank_user_is_an_auth_error() {
    let error = cadence_core::models::UserScope::new("cadence", "  ").unwrap_err();
    assert!(error.is_auth());
}
