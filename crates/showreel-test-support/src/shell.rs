//! Recording shell collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use showreel_core::shell::{Frame, Navigator, SceneRenderer};

/// A navigator that counts how often it was asked to navigate. Clones share
/// the counter.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    calls: Arc<AtomicUsize>,
}

impl RecordingNavigator {
    /// Creates a navigator with a zeroed counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `navigate_to_next` calls so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to_next(&mut self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// A renderer that keeps every frame it was given. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    frames: Arc<Mutex<Vec<Frame>>>,
    finished: Arc<Mutex<Vec<bool>>>,
}

impl RecordingRenderer {
    /// Creates a renderer with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all rendered frames.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn frames(&self) -> Vec<Frame> {
        self.frames.lock().unwrap().clone()
    }

    /// The `skipped` flag of every `finished` call.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn finished_calls(&self) -> Vec<bool> {
        self.finished.lock().unwrap().clone()
    }
}

impl SceneRenderer for RecordingRenderer {
    fn render(&mut self, frame: &Frame) {
        self.frames.lock().unwrap().push(frame.clone());
    }

    fn finished(&mut self, skipped: bool) {
        self.finished.lock().unwrap().push(skipped);
    }
}
