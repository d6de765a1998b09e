use std::time::Duration;

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};

/// One-shot countdown. Decrements once per tick, fires exactly once when it
/// reaches zero, and never fires after [`Countdown::cancel`] or drop.
pub struct Countdown {
    remaining_rx: watch::Receiver<u32>,
    task: JoinHandle<()>,
}

impl Countdown {
    /// Counts down from `seconds`, one decrement per second.
    pub fn start(seconds: u32) -> Self {
        Self::with_tick(seconds, Duration::from_secs(1))
    }

    /// Same countdown with an injectable tick period.
    pub fn with_tick(seconds: u32, tick: Duration) -> Self {
        let (tx, remaining_rx) = watch::channel(seconds);
        let task = tokio::spawn(async move {
            let mut ticker = interval(tick);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval yields immediately on the first tick
            ticker.tick().await;
            let mut left = seconds;
            while left > 0 {
                ticker.tick().await;
                left -= 1;
                if tx.send(left).is_err() {
                    return;
                }
            }
        });
        Self { remaining_rx, task }
    }

    pub fn remaining(&self) -> u32 {
        *self.remaining_rx.borrow()
    }

    /// Resolves `true` once the countdown reaches zero, `false` if it was
    /// cancelled first. Cancel-safe: dropping this future loses nothing.
    pub async fn fired(&mut self) -> bool {
        loop {
            if *self.remaining_rx.borrow_and_update() == 0 {
                return true;
            }
            if self.remaining_rx.changed().await.is_err() {
                return false;
            }
        }
    }

    /// Stops the countdown; it will never fire.
    pub fn cancel(self) {
        self.task.abort();
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.task.abort();
    }
}
