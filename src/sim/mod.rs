//! Chooser simulation module
//!
//! Pure, clock-driven game logic: touch tracking, the selection timer,
//! the winner draw and the session state machine. Nothing here touches
//! a window, a speaker or the wall clock.
//!
//! # Data flow
//!
//! ```text
//! raw touches → geometry filter → TouchRegistry → ChooserSession
//!                                                   │   ▲
//!                                     DelayedTask ◀─┘   │ tick(elapsed)
//!                                                   │
//!                                                   ▼
//!                                   select_winners → LifecycleEvent
//! ```

pub mod contact;
pub mod geometry;
pub mod registry;
pub mod selection;
pub mod session;
pub mod timer;

pub use contact::{Contact, ContactId, ContactSet, RawTouch};
pub use geometry::{ChromeBounds, Platform, Viewport, is_interactive};
pub use registry::{RegistryUpdate, TouchRegistry};
pub use selection::{RankedWinner, SelectionOutcome, SessionConfig, Winner, select_winners};
pub use session::{ChooserSession, LifecycleEvent, SessionState, SessionStats};
pub use timer::{DelayedTask, Fired, TaskHandle};
