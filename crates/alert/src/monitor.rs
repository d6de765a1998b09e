use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::countdown::Countdown;

/// What the driver screen is doing. A closed progression: detection arms a
/// countdown, the countdown either gets cancelled back to monitoring or
/// raises the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorPhase {
    Monitoring,
    AccidentDetected,
    AlertSent,
}

/// Emitted exactly once when an armed countdown runs out.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertNotice {
    pub detected_at: DateTime<Utc>,
    pub raised_at: DateTime<Utc>,
}

/// Driver-side phase machine. Owns its countdown; dropping the monitor
/// mid-countdown cleans the timer up. Never touches the accident store.
pub struct DriverMonitor {
    phase: MonitorPhase,
    countdown: Option<Countdown>,
    detected_at: Option<DateTime<Utc>>,
    alert_seconds: u32,
    tick: Duration,
}

impl DriverMonitor {
    pub fn new(alert_seconds: u32) -> Self {
        Self::with_tick(alert_seconds, Duration::from_secs(1))
    }

    pub fn with_tick(alert_seconds: u32, tick: Duration) -> Self {
        Self {
            phase: MonitorPhase::Monitoring,
            countdown: None,
            detected_at: None,
            alert_seconds,
            tick,
        }
    }

    pub fn phase(&self) -> MonitorPhase {
        self.phase
    }

    pub fn is_counting(&self) -> bool {
        self.countdown.is_some()
    }

    pub fn countdown_remaining(&self) -> Option<u32> {
        self.countdown.as_ref().map(Countdown::remaining)
    }

    /// Arms the alert countdown. Only meaningful while monitoring; returns
    /// whether detection was entered.
    pub fn detect(&mut self) -> bool {
        if self.phase != MonitorPhase::Monitoring {
            return false;
        }
        self.phase = MonitorPhase::AccidentDetected;
        self.detected_at = Some(Utc::now());
        self.countdown = Some(Countdown::with_tick(self.alert_seconds, self.tick));
        info!(seconds = self.alert_seconds, "accident detected, countdown armed");
        true
    }

    /// Cancels an armed countdown and returns to monitoring. Returns false
    /// when there is nothing to cancel.
    pub fn cancel_alert(&mut self) -> bool {
        if self.phase != MonitorPhase::AccidentDetected {
            return false;
        }
        if let Some(countdown) = self.countdown.take() {
            countdown.cancel();
        }
        self.phase = MonitorPhase::Monitoring;
        self.detected_at = None;
        info!("emergency alert cancelled");
        true
    }

    /// Waits for the armed countdown to run out and raises the alert once.
    /// Resolves `None` when no countdown is armed. Cancel-safe, so it can
    /// sit in a `select!` against user input.
    pub async fn wait_for_alert(&mut self) -> Option<AlertNotice> {
        let countdown = self.countdown.as_mut()?;
        if !countdown.fired().await {
            return None;
        }
        self.countdown = None;
        self.phase = MonitorPhase::AlertSent;
        let raised_at = Utc::now();
        let notice = AlertNotice {
            detected_at: self.detected_at.take().unwrap_or(raised_at),
            raised_at,
        };
        info!("emergency alert sent");
        Some(notice)
    }

    /// Back to the monitoring screen after an alert went out.
    pub fn reset(&mut self) {
        if let Some(countdown) = self.countdown.take() {
            countdown.cancel();
        }
        self.phase = MonitorPhase::Monitoring;
        self.detected_at = None;
    }
}
