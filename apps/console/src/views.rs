//! Plain-text renderers for the police-facing views.

use dispatch::DashboardStats;
use shared::domain::{AccidentRecord, DispatchOutcome, UnitSummary};

pub fn render_dashboard(stats: DashboardStats, accidents: &[AccidentRecord]) -> String {
    let mut out = String::new();
    out.push_str("== Accident Response System ==\n");
    out.push_str(&format!(
        "Active accidents: {}   Responding units: {}\n\n",
        stats.active_accidents, stats.responding_units
    ));
    out.push_str(&format!(
        "{:>4}  {:<6}  {:<16}  {}\n",
        "#", "TIME", "LOCATION", "STATUS"
    ));
    for accident in accidents {
        out.push_str(&format!(
            "{:>4}  {:<6}  {:<16}  {}\n",
            accident.id, accident.time, accident.location, accident.status
        ));
    }
    out.push_str("\n(open <id> to view details)");
    out
}

pub fn render_details(accident: &AccidentRecord, outcome: Option<&DispatchOutcome>) -> String {
    let mut out = String::new();
    out.push_str(&format!("== Accident {} ==\n", accident.id));
    out.push_str(&format!("Time:           {}\n", accident.time));
    out.push_str(&format!("Location:       {}\n", accident.address));
    out.push_str(&format!("Coordinates:    {}\n", accident.coordinates));
    out.push_str(&format!("Speed at crash: {} km/h\n", accident.speed));
    out.push_str(&format!(
        "Status:         {}\n",
        accident.status.label().to_uppercase()
    ));
    if let Some(outcome) = outcome {
        out.push_str(&format!(
            "Dispatched:     {} at {}\n",
            outcome.unit_name,
            outcome.dispatched_at.format("%H:%M:%S")
        ));
    }
    out.push_str("\n(units to dispatch, inform, resolve, back)");
    out
}

pub fn render_units(units: &[UnitSummary]) -> String {
    let mut out = String::new();
    out.push_str("== Available Units ==\n");
    for unit in units {
        out.push_str(&format!(
            "{:>4}  {:<8}  {:>4} km away  {}\n",
            unit.unit_id, unit.name, unit.distance_km, unit.phone
        ));
    }
    out.push_str("\n(dispatch <unit id> to send one, back to return)");
    out
}
