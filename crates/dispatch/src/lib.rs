use std::sync::Arc;

use chrono::Utc;
use shared::{
    domain::{AccidentId, AccidentRecord, AccidentStatus, DispatchOutcome, UnitId, UnitSummary},
    error::StoreError,
    event::AccidentEvent,
};
use store::AccidentStore;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    #[error("no unit with id {0}")]
    UnknownUnit(UnitId),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Shared handle the police-facing views operate through: the accident
/// store, the unit roster, and the dispatch outcomes recorded so far.
pub struct DispatchContext {
    pub store: Arc<AccidentStore>,
    units: Vec<UnitSummary>,
    outcomes: RwLock<Vec<DispatchOutcome>>,
}

impl DispatchContext {
    pub fn new(store: Arc<AccidentStore>, units: Vec<UnitSummary>) -> Self {
        Self {
            store,
            units,
            outcomes: RwLock::new(Vec::new()),
        }
    }

    pub fn with_default_units(store: Arc<AccidentStore>) -> Self {
        Self::new(store, default_units())
    }
}

/// Counters shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub active_accidents: usize,
    pub responding_units: usize,
}

pub async fn list_accidents(ctx: &DispatchContext) -> Arc<Vec<AccidentRecord>> {
    ctx.store.list().await
}

pub async fn dashboard_stats(ctx: &DispatchContext) -> DashboardStats {
    let accidents = ctx.store.list().await;
    DashboardStats {
        active_accidents: accidents
            .iter()
            .filter(|a| a.status != AccidentStatus::Resolved)
            .count(),
        responding_units: accidents
            .iter()
            .filter(|a| a.status == AccidentStatus::UnitInformed)
            .count(),
    }
}

pub async fn accident_details(
    ctx: &DispatchContext,
    id: AccidentId,
) -> Result<AccidentRecord, StoreError> {
    ctx.store.get(id).await
}

pub async fn mark_unit_informed(
    ctx: &DispatchContext,
    id: AccidentId,
) -> Result<AccidentRecord, StoreError> {
    ctx.store.transition(id, AccidentStatus::UnitInformed).await
}

pub async fn resolve_accident(
    ctx: &DispatchContext,
    id: AccidentId,
) -> Result<AccidentRecord, StoreError> {
    ctx.store.transition(id, AccidentStatus::Resolved).await
}

pub fn available_units(ctx: &DispatchContext) -> &[UnitSummary] {
    &ctx.units
}

/// Assigns a unit to an accident. A `New` accident is advanced to
/// `UnitInformed` as part of the assignment; an already-informed accident
/// keeps its status and gets a fresh outcome on record. Dispatching against
/// a resolved accident is rejected.
pub async fn dispatch_unit(
    ctx: &DispatchContext,
    accident_id: AccidentId,
    unit_id: UnitId,
) -> Result<DispatchOutcome, DispatchError> {
    let unit = ctx
        .units
        .iter()
        .find(|unit| unit.unit_id == unit_id)
        .cloned()
        .ok_or(DispatchError::UnknownUnit(unit_id))?;

    let accident = ctx.store.get(accident_id).await?;
    if accident.status.is_terminal() {
        return Err(StoreError::InvalidTransition {
            from: accident.status,
            to: AccidentStatus::UnitInformed,
        }
        .into());
    }
    if accident.status == AccidentStatus::New {
        ctx.store
            .transition(accident_id, AccidentStatus::UnitInformed)
            .await?;
    }

    let outcome = DispatchOutcome {
        accident_id,
        unit_id,
        unit_name: unit.name,
        dispatched_at: Utc::now(),
    };
    ctx.outcomes.write().await.push(outcome.clone());
    info!(%accident_id, %unit_id, "unit dispatched");
    ctx.store.announce(AccidentEvent::UnitDispatched {
        outcome: outcome.clone(),
    });
    Ok(outcome)
}

/// Most recent unit assignment for an accident, if any.
pub async fn latest_outcome_for(
    ctx: &DispatchContext,
    accident_id: AccidentId,
) -> Option<DispatchOutcome> {
    ctx.outcomes
        .read()
        .await
        .iter()
        .rev()
        .find(|outcome| outcome.accident_id == accident_id)
        .cloned()
}

pub fn default_units() -> Vec<UnitSummary> {
    vec![
        UnitSummary {
            unit_id: UnitId(1),
            name: "Unit A".to_string(),
            distance_km: 2.0,
            phone: "+250 788 123 456".to_string(),
        },
        UnitSummary {
            unit_id: UnitId(2),
            name: "Unit B".to_string(),
            distance_km: 4.0,
            phone: "+250 788 789 012".to_string(),
        },
        UnitSummary {
            unit_id: UnitId(3),
            name: "Unit C".to_string(),
            distance_km: 6.0,
            phone: "+250 788 345 678".to_string(),
        },
    ]
}
