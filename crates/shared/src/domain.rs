use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(AccidentId);
id_newtype!(UnitId);

/// Lifecycle of an accident record. Transitions only ever move forward,
/// one step at a time; `Resolved` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccidentStatus {
    New,
    UnitInformed,
    Resolved,
}

impl AccidentStatus {
    /// The only status this one may legally move to, if any.
    pub const fn successor(self) -> Option<AccidentStatus> {
        match self {
            AccidentStatus::New => Some(AccidentStatus::UnitInformed),
            AccidentStatus::UnitInformed => Some(AccidentStatus::Resolved),
            AccidentStatus::Resolved => None,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, AccidentStatus::Resolved)
    }

    pub fn can_advance_to(self, target: AccidentStatus) -> bool {
        self.successor() == Some(target)
    }

    pub const fn label(self) -> &'static str {
        match self {
            AccidentStatus::New => "New",
            AccidentStatus::UnitInformed => "Unit informed",
            AccidentStatus::Resolved => "Resolved",
        }
    }
}

impl std::fmt::Display for AccidentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One reported incident. Everything but `status` is immutable after seeding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccidentRecord {
    pub id: AccidentId,
    pub time: String,
    pub location: String,
    pub address: String,
    pub coordinates: String,
    pub speed: f64,
    pub status: AccidentStatus,
}

/// A response unit the dispatch view can assign to an accident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSummary {
    pub unit_id: UnitId,
    pub name: String,
    pub distance_km: f64,
    pub phone: String,
}

/// Record of a unit having been dispatched to an accident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    pub accident_id: AccidentId,
    pub unit_id: UnitId,
    pub unit_name: String,
    pub dispatched_at: DateTime<Utc>,
}
