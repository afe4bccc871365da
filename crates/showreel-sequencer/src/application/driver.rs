//! Single-task driver running a `SceneSequencer` on tokio.
//!
//! The sequencer lives inside one task and is only reachable through
//! messages, so there is exactly one writer. Timer deliveries and user
//! controls are interleaved by `select!` in arrival order.

use std::sync::Arc;

use showreel_core::clock::Clock;
use showreel_core::shell::Navigator;
use showreel_core::timer::TimerToken;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::timer::TokioTimer;
use crate::domain::events::StateChange;
use crate::domain::scene::SceneList;
use crate::domain::sequencer::{SceneSequencer, SubscriptionId};
use crate::domain::state::SequencerState;

/// User controls accepted by a running driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Skip the rest of the sequence.
    Skip,
    /// Set the mute flag.
    SetMuted(bool),
    /// Flip the mute flag.
    ToggleMute,
    /// Restart from the first scene.
    Reset,
}

/// Cloneable handle to a running driver.
///
/// The driver stops once every handle has been dropped.
#[derive(Debug, Clone)]
pub struct DriverHandle {
    controls: mpsc::UnboundedSender<Control>,
    state: watch::Receiver<SequencerState>,
}

impl DriverHandle {
    /// Requests a skip.
    pub fn skip(&self) {
        self.send(Control::Skip);
    }

    /// Requests a mute flag change.
    pub fn set_muted(&self, muted: bool) {
        self.send(Control::SetMuted(muted));
    }

    /// Requests a mute toggle.
    pub fn toggle_mute(&self) {
        self.send(Control::ToggleMute);
    }

    /// Requests a restart from the first scene.
    pub fn reset(&self) {
        self.send(Control::Reset);
    }

    /// The most recently published state.
    #[must_use]
    pub fn state(&self) -> SequencerState {
        *self.state.borrow()
    }

    /// Waits for the next published state. Returns `None` once the driver
    /// has stopped.
    pub async fn changed(&mut self) -> Option<SequencerState> {
        self.state.changed().await.ok()?;
        Some(*self.state.borrow_and_update())
    }

    /// Waits until playback completes or is skipped. Returns `None` if the
    /// driver stops first.
    pub async fn wait_until_finished(&mut self) -> Option<SequencerState> {
        self.state
            .wait_for(SequencerState::is_finished)
            .await
            .ok()
            .map(|state| *state)
    }

    fn send(&self, control: Control) {
        if self.controls.send(control).is_err() {
            debug!(?control, "driver stopped; control dropped");
        }
    }
}

/// Owns a sequencer and feeds it timer deliveries and controls.
#[derive(Debug)]
pub struct SequencerDriver {
    sequencer: SceneSequencer,
    elapsed_rx: mpsc::UnboundedReceiver<TimerToken>,
    controls_rx: mpsc::UnboundedReceiver<Control>,
}

impl SequencerDriver {
    /// Builds an idle driver over `scenes` and a handle to control it.
    #[must_use]
    pub fn new(
        scenes: SceneList,
        navigator: Box<dyn Navigator>,
        clock: Arc<dyn Clock>,
    ) -> (Self, DriverHandle) {
        let (timer, elapsed_rx) = TokioTimer::new();
        let mut sequencer = SceneSequencer::new(scenes, Box::new(timer), navigator, clock);

        let (state_tx, state_rx) = watch::channel(sequencer.state());
        sequencer.subscribe(move |change: &StateChange| {
            state_tx.send_replace(change.state);
        });

        let (controls_tx, controls_rx) = mpsc::unbounded_channel();
        let driver = Self {
            sequencer,
            elapsed_rx,
            controls_rx,
        };
        let handle = DriverHandle {
            controls: controls_tx,
            state: state_rx,
        };
        (driver, handle)
    }

    /// Registers an extra listener before the driver starts.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StateChange) + Send + 'static,
    {
        self.sequencer.subscribe(listener)
    }

    /// Starts playback and processes events until every handle is dropped.
    pub async fn run(self) {
        let Self {
            mut sequencer,
            mut elapsed_rx,
            mut controls_rx,
        } = self;

        info!(sequencer_id = %sequencer.id(), "driver running");
        sequencer.start();

        loop {
            tokio::select! {
                Some(token) = elapsed_rx.recv() => sequencer.on_timer_elapsed(token),
                control = controls_rx.recv() => match control {
                    Some(control) => apply(&mut sequencer, control),
                    None => break,
                },
            }
        }

        info!(sequencer_id = %sequencer.id(), "driver stopped");
    }

    /// Spawns [`run`](Self::run) on the current runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

fn apply(sequencer: &mut SceneSequencer, control: Control) {
    debug!(sequencer_id = %sequencer.id(), ?control, "control received");
    match control {
        Control::Skip => sequencer.skip(),
        Control::SetMuted(muted) => sequencer.set_muted(muted),
        Control::ToggleMute => {
            sequencer.toggle_mute();
        }
        Control::Reset => sequencer.reset(),
    }
}
