//! Adapter from sequencer state changes to a `SceneRenderer`.

use showreel_core::shell::SceneRenderer;

use crate::domain::events::{SequencerEventKind, StateChange};

/// Wraps `renderer` in a listener suitable for
/// [`SceneSequencer::subscribe`](crate::domain::sequencer::SceneSequencer::subscribe).
///
/// Every change that leaves a scene on screen renders one frame; reaching
/// the terminal state calls `finished` once.
pub fn render_on_change<R>(mut renderer: R) -> impl FnMut(&StateChange) + Send + 'static
where
    R: SceneRenderer + 'static,
{
    move |change: &StateChange| match (change.kind, &change.frame) {
        (SequencerEventKind::Completed, _) => renderer.finished(false),
        (SequencerEventKind::Skipped, _) => renderer.finished(true),
        (_, Some(frame)) => renderer.render(frame),
        (_, None) => {}
    }
}
