//! State-change notifications published to subscribers.

use chrono::{DateTime, Utc};
use showreel_core::shell::Frame;

use super::state::SequencerState;

/// Event type identifier for [`SequencerEventKind::Started`].
pub const STARTED_EVENT_TYPE: &str = "sequencer.started";

/// Event type identifier for [`SequencerEventKind::SceneAdvanced`].
pub const SCENE_ADVANCED_EVENT_TYPE: &str = "sequencer.scene_advanced";

/// Event type identifier for [`SequencerEventKind::Completed`].
pub const COMPLETED_EVENT_TYPE: &str = "sequencer.completed";

/// Event type identifier for [`SequencerEventKind::Skipped`].
pub const SKIPPED_EVENT_TYPE: &str = "sequencer.skipped";

/// Event type identifier for [`SequencerEventKind::MuteChanged`].
pub const MUTE_CHANGED_EVENT_TYPE: &str = "sequencer.mute_changed";

/// Event type identifier for [`SequencerEventKind::Reset`].
pub const RESET_EVENT_TYPE: &str = "sequencer.reset";

/// What changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerEventKind {
    /// Playback began on the first scene.
    Started,
    /// A scene's timer elapsed and the next scene became current.
    SceneAdvanced {
        /// Index of the scene that ended.
        from: usize,
        /// Index of the scene now on screen.
        to: usize,
    },
    /// The last scene's timer elapsed.
    Completed,
    /// The user skipped the sequence.
    Skipped,
    /// The mute flag flipped.
    MuteChanged {
        /// New value of the flag.
        muted: bool,
    },
    /// Playback restarted from the first scene.
    Reset,
}

impl SequencerEventKind {
    /// Returns the event type name logged with each change.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Started => STARTED_EVENT_TYPE,
            Self::SceneAdvanced { .. } => SCENE_ADVANCED_EVENT_TYPE,
            Self::Completed => COMPLETED_EVENT_TYPE,
            Self::Skipped => SKIPPED_EVENT_TYPE,
            Self::MuteChanged { .. } => MUTE_CHANGED_EVENT_TYPE,
            Self::Reset => RESET_EVENT_TYPE,
        }
    }
}

/// Envelope delivered to every subscriber after each mutation.
#[derive(Debug, Clone)]
pub struct StateChange {
    /// Monotonically increasing per sequencer, starting at 1.
    pub sequence_number: u64,
    /// When the change happened, per the sequencer's clock.
    pub occurred_at: DateTime<Utc>,
    /// What changed.
    pub kind: SequencerEventKind,
    /// State after the change.
    pub state: SequencerState,
    /// The frame to display, or `None` when nothing is playing.
    pub frame: Option<Frame>,
}
