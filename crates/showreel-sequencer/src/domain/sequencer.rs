//! The scene sequencer state machine.
//!
//! ```text
//! Idle        --start-->            Playing(0)
//! Playing(i)  --timer, i < last-->  Playing(i + 1)
//! Playing(last) --timer-->          Finished(Completed)
//! Idle | Playing(i) --skip-->       Finished(Skipped)
//! any         --reset-->            Playing(0)
//! ```
//!
//! At most one timer is armed at a time, and the previous one is always
//! disarmed first. A timer callback is honoured only if its token is the
//! one currently armed and the sequencer is still playing, so a delivery that
//! races `skip()` or `reset()` changes nothing.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use showreel_core::clock::Clock;
use showreel_core::shell::{Frame, Navigator};
use showreel_core::timer::{TimerScheduler, TimerToken};
use tracing::{debug, info};
use uuid::Uuid;

use super::events::{SequencerEventKind, StateChange};
use super::scene::{Scene, SceneList};
use super::state::{FinishReason, PlaybackPhase, SceneProgress, SequencerState};

/// Callback invoked after every state mutation.
pub type Listener = Box<dyn FnMut(&StateChange) + Send>;

/// Handle returned by [`SceneSequencer::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Advances through a fixed list of scenes and signals completion.
pub struct SceneSequencer {
    id: Uuid,
    scenes: SceneList,
    phase: PlaybackPhase,
    current_index: usize,
    skip_requested: bool,
    muted: bool,
    armed: Option<TimerToken>,
    last_token: TimerToken,
    scene_started_at: Option<DateTime<Utc>>,
    navigated: bool,
    change_count: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    timer: Box<dyn TimerScheduler>,
    navigator: Box<dyn Navigator>,
    clock: Arc<dyn Clock>,
}

impl SceneSequencer {
    /// Creates an idle sequencer over `scenes`.
    #[must_use]
    pub fn new(
        scenes: SceneList,
        timer: Box<dyn TimerScheduler>,
        navigator: Box<dyn Navigator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            scenes,
            phase: PlaybackPhase::Idle,
            current_index: 0,
            skip_requested: false,
            muted: false,
            armed: None,
            last_token: TimerToken::new(0),
            scene_started_at: None,
            navigated: false,
            change_count: 0,
            listeners: Vec::new(),
            next_subscription: 0,
            timer,
            navigator,
            clock,
        }
    }

    /// Identifier used to correlate log lines for this sequencer.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Starts playback on the first scene. Does nothing unless idle.
    pub fn start(&mut self) -> SequencerState {
        if self.phase != PlaybackPhase::Idle {
            debug!(sequencer_id = %self.id, phase = ?self.phase, "start ignored: not idle");
            return self.state();
        }

        info!(sequencer_id = %self.id, scenes = self.scenes.len(), "starting playback");
        self.enter_scene(0);
        self.publish(SequencerEventKind::Started);
        self.state()
    }

    /// Handles delivery of a timer armed by this sequencer.
    pub fn on_timer_elapsed(&mut self, token: TimerToken) {
        if self.armed != Some(token)
            || self.phase != PlaybackPhase::Playing
            || self.skip_requested
        {
            debug!(sequencer_id = %self.id, %token, phase = ?self.phase, "ignoring stale timer");
            return;
        }
        self.armed = None;

        if self.current_index < self.scenes.last_index() {
            let from = self.current_index;
            let to = from + 1;
            self.enter_scene(to);
            debug!(sequencer_id = %self.id, from, to, "scene advanced");
            self.publish(SequencerEventKind::SceneAdvanced { from, to });
        } else {
            self.finish(FinishReason::Completed);
        }
    }

    /// Skips the rest of the sequence and navigates away. Has no effect once
    /// playback has finished.
    pub fn skip(&mut self) {
        if self.skip_requested || self.phase.is_finished() {
            debug!(sequencer_id = %self.id, "skip ignored: already finished");
            return;
        }

        self.skip_requested = true;
        self.finish(FinishReason::Skipped);
    }

    /// Restarts playback from the first scene, keeping the mute flag.
    pub fn reset(&mut self) {
        info!(sequencer_id = %self.id, phase = ?self.phase, "resetting playback");
        self.skip_requested = false;
        self.navigated = false;
        self.enter_scene(0);
        self.publish(SequencerEventKind::Reset);
    }

    /// Sets the mute flag, notifying subscribers if it changed.
    pub fn set_muted(&mut self, muted: bool) {
        if self.muted == muted {
            return;
        }
        self.muted = muted;
        self.publish(SequencerEventKind::MuteChanged { muted });
    }

    /// Flips the mute flag and returns its new value.
    pub fn toggle_mute(&mut self) -> bool {
        self.set_muted(!self.muted);
        self.muted
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SequencerState {
        SequencerState {
            phase: self.phase,
            current_index: self.current_index,
            total: self.scenes.len(),
            is_skip_requested: self.skip_requested,
            is_muted: self.muted,
        }
    }

    /// The frame for the scene on screen, or `None` unless playing.
    #[must_use]
    pub fn current_frame(&self) -> Option<Frame> {
        if self.phase != PlaybackPhase::Playing {
            return None;
        }
        let scene = self.scenes.get(self.current_index)?;
        Some(Frame {
            title: scene.title().to_owned(),
            subtitle: scene.subtitle().to_owned(),
            index: self.current_index,
            total: self.scenes.len(),
            muted: self.muted,
        })
    }

    /// Timing of the current scene, or `None` unless playing.
    #[must_use]
    pub fn progress(&self) -> Option<SceneProgress> {
        if self.phase != PlaybackPhase::Playing {
            return None;
        }
        let started_at = self.scene_started_at?;
        let scene_duration = self.scenes.get(self.current_index)?.duration();
        let elapsed = self.clock.elapsed_since(started_at).min(scene_duration);
        let total = self.scenes.total_duration();
        let played = self.scenes.offset_of(self.current_index) + elapsed;

        Some(SceneProgress {
            index: self.current_index,
            elapsed,
            scene_duration,
            scene_fraction: elapsed.as_secs_f64() / scene_duration.as_secs_f64(),
            overall_fraction: played.as_secs_f64() / total.as_secs_f64(),
        })
    }

    /// Registers `listener` to be called after every state mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StateChange) + Send + 'static,
    {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() < before
    }

    fn enter_scene(&mut self, index: usize) {
        self.disarm();
        self.current_index = index;
        self.phase = PlaybackPhase::Playing;
        self.scene_started_at = Some(self.clock.now());

        let duration = self
            .scenes
            .get(index)
            .map_or_else(|| self.scenes.first().duration(), Scene::duration);
        let token = self.last_token.next();
        self.last_token = token;
        self.armed = Some(token);
        self.timer.arm(token, duration);
    }

    fn disarm(&mut self) {
        if let Some(token) = self.armed.take() {
            self.timer.disarm(token);
        }
    }

    fn finish(&mut self, reason: FinishReason) {
        self.disarm();
        self.phase = PlaybackPhase::Finished(reason);
        self.scene_started_at = None;
        info!(sequencer_id = %self.id, ?reason, index = self.current_index, "playback finished");

        let kind = match reason {
            FinishReason::Completed => SequencerEventKind::Completed,
            FinishReason::Skipped => SequencerEventKind::Skipped,
        };
        self.publish(kind);

        if !self.navigated {
            self.navigated = true;
            self.navigator.navigate_to_next();
        }
    }

    fn publish(&mut self, kind: SequencerEventKind) {
        self.change_count += 1;
        let change = StateChange {
            sequence_number: self.change_count,
            occurred_at: self.clock.now(),
            kind,
            state: self.state(),
            frame: self.current_frame(),
        };
        debug!(
            sequencer_id = %self.id,
            event_type = kind.event_type(),
            sequence_number = change.sequence_number,
            index = self.current_index,
            "state changed"
        );
        for (_, listener) in &mut self.listeners {
            listener(&change);
        }
    }
}

impl Drop for SceneSequencer {
    fn drop(&mut self) {
        self.disarm();
    }
}

impl fmt::Debug for SceneSequencer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneSequencer")
            .field("id", &self.id)
            .field("phase", &self.phase)
            .field("current_index", &self.current_index)
            .field("skip_requested", &self.skip_requested)
            .field("muted", &self.muted)
            .field("armed", &self.armed)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::time::Duration;

    use showreel_test_support::{ManualScheduler, RecordingNavigator, test_epoch};

    struct Harness {
        sequencer: SceneSequencer,
        scheduler: ManualScheduler,
        navigator: RecordingNavigator,
        changes: Arc<Mutex<Vec<StateChange>>>,
    }

    impl Harness {
        fn new(durations_ms: &[(&str, u64)]) -> Self {
            let scenes = SceneList::new(
                durations_ms
                    .iter()
                    .map(|(title, ms)| Scene::from_millis(*title, "", *ms).unwrap())
                    .collect(),
            )
            .unwrap();
            let scheduler = ManualScheduler::new();
            let navigator = RecordingNavigator::new();
            let mut sequencer = SceneSequencer::new(
                scenes,
                Box::new(scheduler.clone()),
                Box::new(navigator.clone()),
                Arc::new(scheduler.clone()),
            );
            let changes = Arc::new(Mutex::new(Vec::new()));
            let sink = Arc::clone(&changes);
            sequencer.subscribe(move |change| sink.lock().unwrap().push(change.clone()));

            Self {
                sequencer,
                scheduler,
                navigator,
                changes,
            }
        }

        fn abc() -> Self {
            Self::new(&[("A", 2000), ("B", 3000), ("C", 4000)])
        }

        /// Fires every timer due within `by` of virtual time, in deadline order.
        fn advance(&mut self, by: Duration) {
            let until = self.scheduler.elapsed() + by;
            while let Some(token) = self.scheduler.pop_due(until) {
                self.sequencer.on_timer_elapsed(token);
            }
            self.scheduler.advance_to(until);
        }

        fn kinds(&self) -> Vec<SequencerEventKind> {
            self.changes.lock().unwrap().iter().map(|c| c.kind).collect()
        }
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_new_sequencer_is_idle_and_arms_nothing() {
        let harness = Harness::abc();

        let state = harness.sequencer.state();
        assert_eq!(state.phase, PlaybackPhase::Idle);
        assert_eq!(state.current_index, 0);
        assert_eq!(state.total, 3);
        assert!(harness.scheduler.armed().is_empty());
        assert!(harness.sequencer.current_frame().is_none());
    }

    #[test]
    fn test_start_plays_first_scene_and_arms_its_timer() {
        // Arrange
        let mut harness = Harness::abc();

        // Act
        let state = harness.sequencer.start();

        // Assert
        assert!(state.is_playing());
        assert_eq!(state.current_index, 0);
        assert!(!state.is_finished());
        assert_eq!(harness.scheduler.pending().len(), 1);
        assert_eq!(harness.kinds(), vec![SequencerEventKind::Started]);

        let frame = harness.sequencer.current_frame().unwrap();
        assert_eq!(frame.title, "A");
        assert_eq!(frame.index, 0);
        assert_eq!(frame.total, 3);
    }

    #[test]
    fn test_start_twice_is_a_no_op() {
        let mut harness = Harness::abc();
        harness.sequencer.start();

        harness.sequencer.start();

        assert_eq!(harness.scheduler.armed().len(), 1);
        assert_eq!(harness.kinds(), vec![SequencerEventKind::Started]);
    }

    #[test]
    fn test_natural_playback_follows_scene_durations() {
        // Arrange
        let mut harness = Harness::abc();
        harness.sequencer.start();

        // Act / Assert
        harness.advance(ms(1999));
        assert_eq!(harness.sequencer.state().current_index, 0);

        harness.advance(ms(1));
        assert_eq!(harness.sequencer.state().current_index, 1);
        assert_eq!(harness.scheduler.elapsed(), ms(2000));

        harness.advance(ms(3000));
        assert_eq!(harness.sequencer.state().current_index, 2);
        assert_eq!(harness.navigator.calls(), 0);

        harness.advance(ms(4000));
        let state = harness.sequencer.state();
        assert!(state.is_finished());
        assert_eq!(state.phase, PlaybackPhase::Finished(FinishReason::Completed));
        assert_eq!(state.current_index, 2);
        assert!(!state.is_skip_requested);
        assert_eq!(harness.navigator.calls(), 1);
        assert_eq!(harness.scheduler.elapsed(), ms(9000));
        assert!(harness.scheduler.pending().is_empty());
    }

    #[test]
    fn test_every_length_advances_n_minus_one_times_then_finishes_once() {
        for n in 1..=6_u64 {
            // Arrange
            let titles: Vec<String> = (0..n).map(|i| format!("scene-{i}")).collect();
            let spec: Vec<(&str, u64)> = titles
                .iter()
                .enumerate()
                .map(|(i, t)| (t.as_str(), 100 * (i as u64 + 1)))
                .collect();
            let mut harness = Harness::new(&spec);
            harness.sequencer.start();

            // Act
            harness.advance(Duration::from_secs(60));

            // Assert
            let kinds = harness.kinds();
            let advances = kinds
                .iter()
                .filter(|k| matches!(k, SequencerEventKind::SceneAdvanced { .. }))
                .count();
            let completions = kinds
                .iter()
                .filter(|k| **k == SequencerEventKind::Completed)
                .count();
            assert_eq!(advances as u64, n - 1, "advances for n={n}");
            assert_eq!(completions, 1, "completions for n={n}");
            assert_eq!(harness.navigator.calls(), 1, "navigations for n={n}");
        }
    }

    #[test]
    fn test_current_index_never_decreases_before_reset() {
        let mut harness = Harness::new(&[("A", 10), ("B", 20), ("C", 30), ("D", 40)]);
        harness.sequencer.start();

        harness.advance(ms(500));

        let indices: Vec<usize> = harness
            .changes
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.state.current_index)
            .collect();
        assert!(indices.windows(2).all(|w| w[0] <= w[1]), "{indices:?}");
        assert_eq!(indices.last(), Some(&3));
    }

    #[test]
    fn test_only_one_timer_is_ever_pending() {
        let mut harness = Harness::abc();
        harness.sequencer.start();

        for _ in 0..3 {
            assert_eq!(harness.scheduler.pending().len(), 1);
            let token = harness.scheduler.pop_due(Duration::from_secs(60)).unwrap();
            harness.sequencer.on_timer_elapsed(token);
        }

        assert!(harness.scheduler.pending().is_empty());
        assert!(harness.sequencer.state().is_finished());
    }

    #[test]
    fn test_skip_during_first_scene_finishes_immediately() {
        // Arrange
        let mut harness = Harness::abc();
        harness.sequencer.start();
        harness.advance(ms(500));

        // Act
        harness.sequencer.skip();

        // Assert
        let state = harness.sequencer.state();
        assert!(state.is_finished());
        assert!(state.is_skip_requested);
        assert_eq!(state.phase, PlaybackPhase::Finished(FinishReason::Skipped));
        assert_eq!(state.current_index, 0);
        assert_eq!(harness.navigator.calls(), 1);
        assert!(harness.scheduler.pending().is_empty());

        let before = harness.kinds();
        harness.advance(Duration::from_secs(30));
        assert_eq!(harness.kinds(), before);
        assert_eq!(harness.sequencer.state(), state);
        assert_eq!(harness.navigator.calls(), 1);
    }

    #[test]
    fn test_skip_at_any_index_finishes_and_navigates_once() {
        for index in 0..3 {
            let mut harness = Harness::abc();
            harness.sequencer.start();
            for _ in 0..index {
                let token = harness.scheduler.pop_due(Duration::from_secs(60)).unwrap();
                harness.sequencer.on_timer_elapsed(token);
            }
            assert_eq!(harness.sequencer.state().current_index, index);

            harness.sequencer.skip();

            let state = harness.sequencer.state();
            assert!(state.is_finished(), "index {index}");
            assert_eq!(state.current_index, index);
            assert_eq!(harness.navigator.calls(), 1, "index {index}");
        }
    }

    #[test]
    fn test_skip_twice_navigates_once() {
        let mut harness = Harness::abc();
        harness.sequencer.start();

        harness.sequencer.skip();
        harness.sequencer.skip();

        assert_eq!(harness.navigator.calls(), 1);
        assert_eq!(
            harness
                .kinds()
                .iter()
                .filter(|k| **k == SequencerEventKind::Skipped)
                .count(),
            1
        );
    }

    #[test]
    fn test_skip_after_completion_has_no_effect() {
        let mut harness = Harness::abc();
        harness.sequencer.start();
        harness.advance(ms(9000));

        harness.sequencer.skip();

        let state = harness.sequencer.state();
        assert_eq!(state.phase, PlaybackPhase::Finished(FinishReason::Completed));
        assert!(!state.is_skip_requested);
        assert_eq!(harness.navigator.calls(), 1);
    }

    #[test]
    fn test_skip_while_idle_finishes_without_arming() {
        let mut harness = Harness::abc();

        harness.sequencer.skip();

        assert!(harness.sequencer.state().is_finished());
        assert!(harness.scheduler.armed().is_empty());
        assert_eq!(harness.navigator.calls(), 1);
    }

    #[test]
    fn test_stale_timer_after_skip_is_ignored() {
        // Arrange
        let mut harness = Harness::abc();
        harness.sequencer.start();
        let token = harness.scheduler.armed()[0];
        harness.sequencer.skip();
        let state = harness.sequencer.state();
        let changes = harness.kinds().len();

        // Act: the timer primitive delivers anyway.
        harness.sequencer.on_timer_elapsed(token);

        // Assert
        assert_eq!(harness.sequencer.state(), state);
        assert_eq!(harness.kinds().len(), changes);
        assert_eq!(harness.navigator.calls(), 1);
        assert_eq!(harness.scheduler.disarmed(), vec![token]);
    }

    #[test]
    fn test_superseded_token_is_ignored_while_playing() {
        let mut harness = Harness::abc();
        harness.sequencer.start();
        let first = harness.scheduler.armed()[0];
        harness.sequencer.reset();

        harness.sequencer.on_timer_elapsed(first);

        assert_eq!(harness.sequencer.state().current_index, 0);
        assert!(harness.sequencer.state().is_playing());
    }

    #[test]
    fn test_reset_after_skip_restarts_and_allows_navigation_again() {
        // Arrange
        let mut harness = Harness::abc();
        harness.sequencer.start();
        harness.advance(ms(2500));
        harness.sequencer.skip();

        // Act
        harness.sequencer.reset();

        // Assert
        let state = harness.sequencer.state();
        assert!(state.is_playing());
        assert_eq!(state.current_index, 0);
        assert!(!state.is_skip_requested);
        assert!(!state.is_finished());
        assert_eq!(harness.scheduler.pending().len(), 1);

        harness.advance(ms(9000));
        assert!(harness.sequencer.state().is_finished());
        assert_eq!(harness.navigator.calls(), 2);
    }

    #[test]
    fn test_reset_while_playing_disarms_previous_timer() {
        let mut harness = Harness::abc();
        harness.sequencer.start();
        harness.advance(ms(2000));
        let armed = *harness.scheduler.armed().last().unwrap();

        harness.sequencer.reset();

        assert_eq!(harness.scheduler.disarmed(), vec![armed]);
        assert_eq!(harness.scheduler.pending().len(), 1);
        assert_eq!(harness.sequencer.state().current_index, 0);
    }

    #[test]
    fn test_mute_is_independent_of_timing_and_survives_reset() {
        let mut harness = Harness::abc();
        harness.sequencer.start();

        assert!(harness.sequencer.toggle_mute());
        harness.sequencer.set_muted(true);
        harness.advance(ms(2000));
        harness.sequencer.reset();

        let state = harness.sequencer.state();
        assert!(state.is_muted);
        assert_eq!(state.current_index, 0);
        assert!(harness.sequencer.current_frame().unwrap().muted);
        let mute_events = harness
            .kinds()
            .into_iter()
            .filter(|k| matches!(k, SequencerEventKind::MuteChanged { .. }))
            .count();
        assert_eq!(mute_events, 1);
    }

    #[test]
    fn test_progress_tracks_virtual_time() {
        let mut harness = Harness::abc();
        assert!(harness.sequencer.progress().is_none());
        harness.sequencer.start();

        harness.advance(ms(1000));
        let progress = harness.sequencer.progress().unwrap();
        assert_eq!(progress.index, 0);
        assert_eq!(progress.elapsed, ms(1000));
        assert!((progress.scene_fraction - 0.5).abs() < 1e-9);
        assert!((progress.overall_fraction - 1000.0 / 9000.0).abs() < 1e-9);

        harness.advance(ms(2500));
        let progress = harness.sequencer.progress().unwrap();
        assert_eq!(progress.index, 1);
        assert_eq!(progress.elapsed, ms(1500));
        assert!((progress.overall_fraction - 3500.0 / 9000.0).abs() < 1e-9);

        harness.sequencer.skip();
        assert!(harness.sequencer.progress().is_none());
    }

    #[test]
    fn test_state_changes_carry_sequence_numbers_and_frames() {
        let mut harness = Harness::abc();
        harness.sequencer.start();
        harness.advance(ms(9000));

        let changes = harness.changes.lock().unwrap().clone();
        let numbers: Vec<u64> = changes.iter().map(|c| c.sequence_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);

        let titles: Vec<Option<String>> = changes
            .iter()
            .map(|c| c.frame.as_ref().map(|f| f.title.clone()))
            .collect();
        assert_eq!(
            titles,
            vec![
                Some("A".to_owned()),
                Some("B".to_owned()),
                Some("C".to_owned()),
                None
            ]
        );
        assert_eq!(changes[0].occurred_at, test_epoch());
        assert_eq!(
            changes[1].occurred_at,
            test_epoch() + chrono::Duration::milliseconds(2000)
        );
        assert_eq!(changes[3].occurred_at, harness.scheduler.now());
    }

    #[test]
    fn test_unsubscribed_listener_stops_receiving() {
        let mut harness = Harness::abc();
        let count = Arc::new(Mutex::new(0_u32));
        let sink = Arc::clone(&count);
        let id = harness
            .sequencer
            .subscribe(move |_| *sink.lock().unwrap() += 1);
        harness.sequencer.start();

        assert!(harness.sequencer.unsubscribe(id));
        assert!(!harness.sequencer.unsubscribe(id));
        harness.advance(ms(9000));

        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn test_drop_disarms_pending_timer() {
        let harness = Harness::abc();
        let Harness {
            mut sequencer,
            scheduler,
            ..
        } = harness;
        sequencer.start();
        let token = scheduler.armed()[0];

        drop(sequencer);

        assert!(scheduler.pending().is_empty());
        assert_eq!(scheduler.disarmed(), vec![token]);
    }
}
