//! Showreel Core — shared abstractions.
//!
//! This crate defines the traits and types that the sequencer, content and
//! API crates depend on. It contains no infrastructure code.

pub mod access;
pub mod clock;
pub mod error;
pub mod rng;
pub mod shell;
pub mod timer;
