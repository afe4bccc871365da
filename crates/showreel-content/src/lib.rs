//! Showreel — intro content.
//!
//! Scene text and timing for the cinematic intro, the static table of
//! transition variants the front-end animates with, and the seedable
//! background particle field.

pub mod catalog;
pub mod intro;
pub mod particles;
pub mod transitions;
