use serde::{Deserialize, Serialize};

use crate::domain::{AccidentRecord, DispatchOutcome};

/// Broadcast to every subscribed consumer after a successful mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum AccidentEvent {
    AccidentUpdated { accident: AccidentRecord },
    UnitDispatched { outcome: DispatchOutcome },
}
