//! Observable sequencer state.

use std::time::Duration;

/// Why playback reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// The last scene's timer elapsed.
    Completed,
    /// The user skipped the sequence.
    Skipped,
}

/// Playback phase state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    /// Constructed but not started.
    Idle,
    /// A scene is on screen and its timer is armed.
    Playing,
    /// Terminal until reset.
    Finished(FinishReason),
}

impl PlaybackPhase {
    /// Returns `true` for either terminal variant.
    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

/// Immutable snapshot of a sequencer, handed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencerState {
    /// Current phase.
    pub phase: PlaybackPhase,
    /// Index of the current scene; stays on the last shown scene once
    /// finished.
    pub current_index: usize,
    /// Number of scenes.
    pub total: usize,
    /// Set by `skip()`; cleared by `reset()`.
    pub is_skip_requested: bool,
    /// Audio mute flag.
    pub is_muted: bool,
}

impl SequencerState {
    /// Returns `true` once playback has completed or been skipped.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    /// Returns `true` while a scene is on screen.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.phase == PlaybackPhase::Playing
    }
}

/// Timing of the scene currently on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneProgress {
    /// Index of the current scene.
    pub index: usize,
    /// Time spent in the current scene, capped at its duration.
    pub elapsed: Duration,
    /// Duration of the current scene.
    pub scene_duration: Duration,
    /// `elapsed / scene_duration`, in `[0.0, 1.0]`.
    pub scene_fraction: f64,
    /// Progress through the whole sequence, in `[0.0, 1.0]`.
    pub overall_fraction: f64,
}
