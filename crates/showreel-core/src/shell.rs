//! Collaborators supplied by the surrounding application shell.
//!
//! The sequencer only decides *what* is on screen and *when* to leave; how a
//! frame is drawn and where navigation goes belong to the shell.

/// Content of a single rendered frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Scene title.
    pub title: String,
    /// Scene subtitle (may be empty).
    pub subtitle: String,
    /// Zero-based index of the scene.
    pub index: usize,
    /// Number of scenes in the sequence.
    pub total: usize,
    /// Whether audio is muted.
    pub muted: bool,
}

/// Leaves the current view once the sequence ends or is skipped.
pub trait Navigator: Send {
    /// Navigates to whatever view follows the sequence.
    fn navigate_to_next(&mut self);
}

/// Displays frames produced by the sequencer.
pub trait SceneRenderer: Send {
    /// Draws `frame`.
    fn render(&mut self, frame: &Frame);

    /// Called once playback reaches its terminal state.
    fn finished(&mut self, _skipped: bool) {}
}
