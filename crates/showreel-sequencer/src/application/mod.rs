//! Application layer: tokio-backed timers, the single-task driver, and the
//! render adapter.

pub mod driver;
pub mod render;
pub mod timer;
