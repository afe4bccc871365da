//! One-shot timer abstraction.
//!
//! The sequencer never sleeps itself. It asks a `TimerScheduler` to deliver a
//! `TimerToken` back after a delay and matches the token against the one it
//! last armed, so a late delivery after cancellation is recognisable.

use std::fmt;
use std::time::Duration;

/// Identity of a single armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    /// Creates a token for the given arm generation.
    #[must_use]
    pub const fn new(generation: u64) -> Self {
        Self(generation)
    }

    /// Returns the arm generation this token was issued for.
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }

    /// Returns the token for the following generation.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Schedules one-shot timers on behalf of a single owner.
///
/// Cancellation is best-effort: after `disarm` an implementation may still
/// deliver the token, and the owner must ignore it.
pub trait TimerScheduler: Send {
    /// Arms a timer that delivers `token` once `after` has elapsed.
    fn arm(&mut self, token: TimerToken, after: Duration);

    /// Cancels the timer identified by `token`, if it is still pending.
    fn disarm(&mut self, token: TimerToken);
}
