//! Showreel API — HTTP surface of the marketing site.
//!
//! Serves the intro content and proxies user-access checks to the internal
//! user service.

pub mod config;
pub mod directory;
pub mod error;
pub mod routes;
pub mod state;
