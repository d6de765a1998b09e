//! Driver-side alert flow: a cancellable countdown and the
//! monitoring/detected/alert-sent phase machine built on it.

pub mod countdown;
pub mod monitor;

pub use countdown::Countdown;
pub use monitor::{AlertNotice, DriverMonitor, MonitorPhase};
