//! Manual scheduler — virtual time for timer-driven code.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use showreel_core::clock::Clock;
use showreel_core::timer::{TimerScheduler, TimerToken};

use crate::clock::test_epoch;

#[derive(Debug)]
struct Timeline {
    epoch: DateTime<Utc>,
    elapsed: Duration,
    pending: Vec<(Duration, TimerToken)>,
    armed: Vec<TimerToken>,
    disarmed: Vec<TimerToken>,
}

/// A `TimerScheduler` and `Clock` sharing one virtual timeline.
///
/// Nothing fires on its own. Tests move time forward with [`pop_due`] and
/// hand each returned token to the code under test, which lets a test
/// interleave timer delivery with other calls exactly as it wants. Clones
/// share the same timeline, so one clone can be boxed into the code under
/// test while the test keeps another.
///
/// [`pop_due`]: ManualScheduler::pop_due
#[derive(Debug, Clone)]
pub struct ManualScheduler {
    timeline: Arc<Mutex<Timeline>>,
}

impl ManualScheduler {
    /// Creates a scheduler whose clock starts at [`test_epoch`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeline: Arc::new(Mutex::new(Timeline {
                epoch: test_epoch(),
                elapsed: Duration::ZERO,
                pending: Vec::new(),
                armed: Vec::new(),
                disarmed: Vec::new(),
            })),
        }
    }

    /// Virtual time elapsed since the epoch.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.timeline.lock().unwrap().elapsed
    }

    /// Tokens still waiting to fire, earliest deadline first.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn pending(&self) -> Vec<TimerToken> {
        let mut pending = self.timeline.lock().unwrap().pending.clone();
        pending.sort();
        pending.into_iter().map(|(_, token)| token).collect()
    }

    /// Every token ever armed, in arm order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn armed(&self) -> Vec<TimerToken> {
        self.timeline.lock().unwrap().armed.clone()
    }

    /// Every token disarmed while still pending, in disarm order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn disarmed(&self) -> Vec<TimerToken> {
        self.timeline.lock().unwrap().disarmed.clone()
    }

    /// Removes and returns the earliest pending timer due at or before
    /// `until`, moving the clock to its deadline.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn pop_due(&self, until: Duration) -> Option<TimerToken> {
        let mut timeline = self.timeline.lock().unwrap();
        let (position, &(deadline, token)) = timeline
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (deadline, _))| *deadline <= until)
            .min_by_key(|(_, entry)| **entry)?;
        timeline.pending.remove(position);
        timeline.elapsed = timeline.elapsed.max(deadline);
        Some(token)
    }

    /// Moves the clock forward to `until` without firing anything. Never
    /// moves it backwards.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn advance_to(&self, until: Duration) {
        let mut timeline = self.timeline.lock().unwrap();
        timeline.elapsed = timeline.elapsed.max(until);
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerScheduler for ManualScheduler {
    fn arm(&mut self, token: TimerToken, after: Duration) {
        let mut timeline = self.timeline.lock().unwrap();
        let deadline = timeline.elapsed + after;
        timeline.pending.push((deadline, token));
        timeline.armed.push(token);
    }

    fn disarm(&mut self, token: TimerToken) {
        let mut timeline = self.timeline.lock().unwrap();
        let before = timeline.pending.len();
        timeline.pending.retain(|(_, pending)| *pending != token);
        if timeline.pending.len() < before {
            timeline.disarmed.push(token);
        }
    }
}

impl Clock for ManualScheduler {
    fn now(&self) -> DateTime<Utc> {
        let timeline = self.timeline.lock().unwrap();
        timeline.epoch + timeline.elapsed
    }
}
