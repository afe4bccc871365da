//! Domain layer for the scene sequencer.

pub mod events;
pub mod scene;
pub mod sequencer;
pub mod state;
