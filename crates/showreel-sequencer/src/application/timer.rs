//! Tokio-backed timer scheduler.

use std::collections::HashMap;
use std::time::Duration;

use showreel_core::timer::{TimerScheduler, TimerToken};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

/// Delivers armed tokens over an unbounded channel after a `tokio::time`
/// sleep.
///
/// `arm` must be called from within a tokio runtime. `disarm` aborts the
/// sleeping task, but a token whose sleep already completed may still be
/// sitting in the channel.
#[derive(Debug)]
pub struct TokioTimer {
    elapsed_tx: mpsc::UnboundedSender<TimerToken>,
    pending: HashMap<TimerToken, JoinHandle<()>>,
}

impl TokioTimer {
    /// Creates a scheduler and the receiver its tokens arrive on.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerToken>) {
        let (elapsed_tx, elapsed_rx) = mpsc::unbounded_channel();
        let timer = Self {
            elapsed_tx,
            pending: HashMap::new(),
        };
        (timer, elapsed_rx)
    }

    /// Number of timers whose tasks have not yet completed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }
}

impl TimerScheduler for TokioTimer {
    fn arm(&mut self, token: TimerToken, after: Duration) {
        self.pending.retain(|_, handle| !handle.is_finished());

        let elapsed_tx = self.elapsed_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            if elapsed_tx.send(token).is_err() {
                trace!(%token, "timer receiver dropped");
            }
        });
        trace!(%token, after_ms = after.as_millis(), "timer armed");
        self.pending.insert(token, handle);
    }

    fn disarm(&mut self, token: TimerToken) {
        if let Some(handle) = self.pending.remove(&token) {
            handle.abort();
            trace!(%token, "timer disarmed");
        }
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }
}
