use super::*;

fn record(id: i64, status: AccidentStatus) -> AccidentRecord {
    AccidentRecord {
        id: AccidentId(id),
        time: "08:41".to_string(),
        location: "Kimironko".to_string(),
        address: "KG 15 Ave, Kimironko".to_string(),
        coordinates: "-1.9456, 30.0615".to_string(),
        speed: 30.0,
        status,
    }
}

#[tokio::test]
async fn get_returns_the_requested_record() {
    let store = AccidentStore::new(demo_accidents()).expect("store");
    let found = store.get(AccidentId(2)).await.expect("record");
    assert_eq!(found.id, AccidentId(2));
    assert_eq!(found.location, "Nyamirambo");
}

#[tokio::test]
async fn get_unknown_id_fails_with_not_found() {
    let store = AccidentStore::new(demo_accidents()).expect("store");
    let err = store.get(AccidentId(99)).await.expect_err("should fail");
    assert_eq!(err, StoreError::NotFound(AccidentId(99)));
}

#[tokio::test]
async fn informing_a_new_accident_changes_only_the_status() {
    let store = AccidentStore::new(demo_accidents()).expect("store");
    let before = store.get(AccidentId(1)).await.expect("record");

    let updated = store
        .transition(AccidentId(1), AccidentStatus::UnitInformed)
        .await
        .expect("transition");
    assert_eq!(updated.status, AccidentStatus::UnitInformed);

    let after = store.get(AccidentId(1)).await.expect("record");
    assert_eq!(after.status, AccidentStatus::UnitInformed);
    assert_eq!(after.time, before.time);
    assert_eq!(after.location, before.location);
    assert_eq!(after.address, before.address);
    assert_eq!(after.coordinates, before.coordinates);
    assert_eq!(after.speed, before.speed);
}

#[tokio::test]
async fn no_transition_ever_reaches_new() {
    let store = AccidentStore::new(vec![
        record(1, AccidentStatus::New),
        record(2, AccidentStatus::UnitInformed),
        record(3, AccidentStatus::Resolved),
    ])
    .expect("store");

    for id in 1..=3 {
        let err = store
            .transition(AccidentId(id), AccidentStatus::New)
            .await
            .expect_err("should fail");
        assert!(matches!(err, StoreError::InvalidTransition { .. }));
    }
}

#[tokio::test]
async fn resolving_requires_passing_through_unit_informed() {
    let store = AccidentStore::new(vec![record(1, AccidentStatus::New)]).expect("store");
    let err = store
        .transition(AccidentId(1), AccidentStatus::Resolved)
        .await
        .expect_err("should fail");
    assert_eq!(
        err,
        StoreError::InvalidTransition {
            from: AccidentStatus::New,
            to: AccidentStatus::Resolved,
        }
    );
}

#[tokio::test]
async fn resolved_is_terminal() {
    let store = AccidentStore::new(vec![record(1, AccidentStatus::Resolved)]).expect("store");
    for target in [
        AccidentStatus::New,
        AccidentStatus::UnitInformed,
        AccidentStatus::Resolved,
    ] {
        let err = store
            .transition(AccidentId(1), target)
            .await
            .expect_err("should fail");
        assert!(matches!(err, StoreError::InvalidTransition { .. }));
    }
}

#[tokio::test]
async fn seeded_lifecycle_walkthrough() {
    let store = AccidentStore::new(vec![
        record(1, AccidentStatus::New),
        record(2, AccidentStatus::UnitInformed),
    ])
    .expect("store");

    let updated = store
        .transition(AccidentId(1), AccidentStatus::UnitInformed)
        .await
        .expect("inform record 1");
    assert_eq!(updated.status, AccidentStatus::UnitInformed);

    let err = store
        .transition(AccidentId(2), AccidentStatus::UnitInformed)
        .await
        .expect_err("same-state move should fail");
    assert_eq!(
        err,
        StoreError::InvalidTransition {
            from: AccidentStatus::UnitInformed,
            to: AccidentStatus::UnitInformed,
        }
    );

    store
        .transition(AccidentId(1), AccidentStatus::Resolved)
        .await
        .expect("resolve record 1");

    let err = store
        .transition(AccidentId(1), AccidentStatus::New)
        .await
        .expect_err("backward move should fail");
    assert!(matches!(err, StoreError::InvalidTransition { .. }));
}

#[tokio::test]
async fn transitions_never_create_or_destroy_records() {
    let store = AccidentStore::new(demo_accidents()).expect("store");
    assert_eq!(store.list().await.len(), 2);

    store
        .transition(AccidentId(1), AccidentStatus::UnitInformed)
        .await
        .expect("inform");
    let _ = store.transition(AccidentId(2), AccidentStatus::New).await;
    store
        .transition(AccidentId(2), AccidentStatus::Resolved)
        .await
        .expect("resolve");

    assert_eq!(store.list().await.len(), 2);
}

#[tokio::test]
async fn successful_transition_swaps_in_a_new_snapshot() {
    let store = AccidentStore::new(demo_accidents()).expect("store");
    let before = store.list().await;

    store
        .transition(AccidentId(1), AccidentStatus::UnitInformed)
        .await
        .expect("inform");
    let after = store.list().await;

    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(before[0].status, AccidentStatus::New);
    assert_eq!(after[0].status, AccidentStatus::UnitInformed);
}

#[tokio::test]
async fn rejected_transition_leaves_the_snapshot_untouched() {
    let store = AccidentStore::new(demo_accidents()).expect("store");
    let before = store.list().await;

    let _ = store
        .transition(AccidentId(1), AccidentStatus::Resolved)
        .await
        .expect_err("skipping a step should fail");
    let after = store.list().await;

    assert!(Arc::ptr_eq(&before, &after));
}

#[tokio::test]
async fn subscribers_are_notified_of_updates() {
    let store = AccidentStore::new(demo_accidents()).expect("store");
    let mut events = store.subscribe();

    store
        .transition(AccidentId(1), AccidentStatus::UnitInformed)
        .await
        .expect("inform");

    let event = events.recv().await.expect("event");
    match event {
        AccidentEvent::AccidentUpdated { accident } => {
            assert_eq!(accident.id, AccidentId(1));
            assert_eq!(accident.status, AccidentStatus::UnitInformed);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn duplicate_seed_ids_are_rejected() {
    let err = AccidentStore::new(vec![
        record(1, AccidentStatus::New),
        record(1, AccidentStatus::Resolved),
    ])
    .expect_err("should fail");
    assert_eq!(err, SeedError::DuplicateId(AccidentId(1)));
}

#[tokio::test]
async fn negative_seed_speed_is_rejected() {
    let mut bad = record(1, AccidentStatus::New);
    bad.speed = -5.0;
    let err = AccidentStore::new(vec![bad]).expect_err("should fail");
    assert!(matches!(err, SeedError::NegativeSpeed { .. }));
}
