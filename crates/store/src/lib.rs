use std::{collections::HashSet, sync::Arc};

use shared::{
    domain::{AccidentId, AccidentRecord, AccidentStatus},
    error::{SeedError, StoreError},
    event::AccidentEvent,
};
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Process-wide owner of the accident collection. Consumers hold an
/// `Arc<AccidentStore>`, read snapshots, and route every mutation through
/// [`AccidentStore::transition`].
#[derive(Debug)]
pub struct AccidentStore {
    accidents: RwLock<Arc<Vec<AccidentRecord>>>,
    events: broadcast::Sender<AccidentEvent>,
}

impl AccidentStore {
    /// Builds a store from seed records. Ids must be unique and speeds
    /// non-negative; insertion order is the display order.
    pub fn new(seed: Vec<AccidentRecord>) -> Result<Self, SeedError> {
        let mut seen = HashSet::new();
        for record in &seed {
            if !seen.insert(record.id) {
                return Err(SeedError::DuplicateId(record.id));
            }
            if record.speed < 0.0 {
                return Err(SeedError::NegativeSpeed {
                    id: record.id,
                    speed: record.speed,
                });
            }
        }

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            accidents: RwLock::new(Arc::new(seed)),
            events,
        })
    }

    /// Current collection in insertion order. Each successful transition
    /// swaps in a new collection value, so pointer identity of the snapshot
    /// changes exactly when the data does.
    pub async fn list(&self) -> Arc<Vec<AccidentRecord>> {
        Arc::clone(&*self.accidents.read().await)
    }

    pub async fn get(&self, id: AccidentId) -> Result<AccidentRecord, StoreError> {
        self.accidents
            .read()
            .await
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Moves one record a single step along the lifecycle. Only `status`
    /// changes. The update is atomic: readers see either the old snapshot
    /// or the new one, never a partial state. Subscribers are notified once
    /// the new snapshot is in place.
    pub async fn transition(
        &self,
        id: AccidentId,
        target: AccidentStatus,
    ) -> Result<AccidentRecord, StoreError> {
        let mut guard = self.accidents.write().await;
        let index = guard
            .iter()
            .position(|record| record.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let current = guard[index].status;
        if !current.can_advance_to(target) {
            return Err(StoreError::InvalidTransition {
                from: current,
                to: target,
            });
        }

        let mut next = guard.as_ref().clone();
        next[index].status = target;
        let updated = next[index].clone();
        *guard = Arc::new(next);
        drop(guard);

        debug!(%id, from = %current, to = %target, "accident status advanced");
        let _ = self.events.send(AccidentEvent::AccidentUpdated {
            accident: updated.clone(),
        });
        Ok(updated)
    }

    /// Push-style notification of mutations. A receiver that falls behind
    /// sees `Lagged` and can recover by re-reading the snapshot.
    pub fn subscribe(&self) -> broadcast::Receiver<AccidentEvent> {
        self.events.subscribe()
    }

    /// Publishes an event on behalf of an operation layered above the store,
    /// e.g. a recorded dispatch outcome.
    pub fn announce(&self, event: AccidentEvent) {
        let _ = self.events.send(event);
    }
}

/// The two incidents the dashboard starts with.
pub fn demo_accidents() -> Vec<AccidentRecord> {
    vec![
        AccidentRecord {
            id: AccidentId(1),
            time: "08:41".to_string(),
            location: "Kimironko".to_string(),
            address: "KG 15 Ave, Kimironko".to_string(),
            coordinates: "-1.9456, 30.0615".to_string(),
            speed: 0.0,
            status: AccidentStatus::New,
        },
        AccidentRecord {
            id: AccidentId(2),
            time: "08:30".to_string(),
            location: "Nyamirambo".to_string(),
            address: "KN 3 Rd, Nyamirambo".to_string(),
            coordinates: "-1.9789, 30.0412".to_string(),
            speed: 45.0,
            status: AccidentStatus::UnitInformed,
        },
    ]
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
