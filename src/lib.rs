//! Finger Chooser
//!
//! Multi-touch party-game engine: players rest fingers on the screen and,
//! after a dwell time, one finger (or a ranked few) is drawn at random.

/// Application layer - configuration, feedback, scenario replay and CLI
pub mod app;

/// Build-time information (timestamp, target, compiler)
pub mod build_info;

/// Error types
pub mod error;

/// Startup health checks
pub mod health;

/// Chooser simulation - touch tracking, timers, winner selection
pub mod sim;

pub use error::{Error, Result};
