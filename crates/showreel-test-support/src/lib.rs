//! Shared test doubles for the Showreel workspace.

mod access;
mod clock;
mod rng;
mod scheduler;
mod shell;

pub use access::{FailingAccessDirectory, StaticAccessDirectory};
pub use clock::test_epoch;
pub use rng::{MockRng, SequenceRng};
pub use scheduler::ManualScheduler;
pub use shell::{RecordingNavigator, RecordingRenderer};
