//! Application layer
//!
//! Configuration, feedback routing, and the headless scenario driver that
//! stands in for a touch screen.

pub mod cli;
pub mod config;
pub mod feedback;
pub mod runner;
pub mod scenario;

pub use config::{AppConfig, FeedbackSettings, LayoutSettings, SessionSettings, ViewportSettings};
pub use feedback::{CueHandler, FeedbackCue, FeedbackDispatcher, FeedbackHandler, LogHandler, Sound};
pub use runner::{CueEntry, Replay, ReplayReport, TimelineEntry, format_report};
pub use scenario::{Scenario, ScenarioStep};
