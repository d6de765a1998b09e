use std::sync::Arc;

use dispatch::{
    accident_details, dashboard_stats, dispatch_unit, latest_outcome_for, resolve_accident,
    DispatchContext, DispatchError,
};
use shared::{
    domain::{AccidentId, AccidentStatus, UnitId},
    error::StoreError,
    event::AccidentEvent,
};
use store::{demo_accidents, AccidentStore};

#[tokio::test]
async fn police_response_flow_acceptance() {
    let store = Arc::new(AccidentStore::new(demo_accidents()).expect("store"));
    let ctx = DispatchContext::with_default_units(Arc::clone(&store));

    // two independent consumers watch the store
    let mut dashboard_feed = store.subscribe();
    let mut detail_feed = store.subscribe();

    let stats = dashboard_stats(&ctx).await;
    assert_eq!(stats.active_accidents, 2);
    assert_eq!(stats.responding_units, 1);

    // dispatcher opens the fresh accident and sends Unit A
    let fresh = accident_details(&ctx, AccidentId(1)).await.expect("record");
    assert_eq!(fresh.status, AccidentStatus::New);

    let outcome = dispatch_unit(&ctx, AccidentId(1), UnitId(1))
        .await
        .expect("dispatch");
    assert_eq!(outcome.unit_name, "Unit A");

    // both consumers observe the status change and the assignment
    for feed in [&mut dashboard_feed, &mut detail_feed] {
        match feed.recv().await.expect("update event") {
            AccidentEvent::AccidentUpdated { accident } => {
                assert_eq!(accident.id, AccidentId(1));
                assert_eq!(accident.status, AccidentStatus::UnitInformed);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        match feed.recv().await.expect("dispatch event") {
            AccidentEvent::UnitDispatched { outcome } => {
                assert_eq!(outcome.accident_id, AccidentId(1));
                assert_eq!(outcome.unit_id, UnitId(1));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    let informed = accident_details(&ctx, AccidentId(1)).await.expect("record");
    assert_eq!(informed.status, AccidentStatus::UnitInformed);
    assert_eq!(
        latest_outcome_for(&ctx, AccidentId(1))
            .await
            .expect("outcome")
            .unit_id,
        UnitId(1)
    );

    // the scene is cleared
    resolve_accident(&ctx, AccidentId(1)).await.expect("resolve");
    let stats = dashboard_stats(&ctx).await;
    assert_eq!(stats.active_accidents, 1);

    // nothing moves a resolved accident, and no records appeared or vanished
    let err = dispatch_unit(&ctx, AccidentId(1), UnitId(2))
        .await
        .expect_err("terminal state");
    assert!(matches!(
        err,
        DispatchError::Store(StoreError::InvalidTransition { .. })
    ));
    assert_eq!(store.list().await.len(), 2);
}
