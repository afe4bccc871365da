//! Showreel — scene-sequencing engine.
//!
//! Advances through a fixed, ordered list of scenes, each shown for its own
//! duration, then signals the shell to navigate away. The domain layer is a
//! plain state machine that never sleeps; the application layer drives it
//! with tokio timers from a single task.

pub mod application;
pub mod domain;
