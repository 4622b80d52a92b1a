//! Feedback dispatch
//!
//! Routes [`LifecycleEvent`]s from the session to subscribers that play
//! sounds, vibrate or animate. The session itself knows nothing about
//! any of these.
//!
//! ```text
//! ChooserSession ──events──▶ FeedbackDispatcher ──▶ handlers (by priority)
//! ```

use std::any::Any;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::config::FeedbackSettings;
use crate::sim::LifecycleEvent;

/// Number of pop sound variants played on finger placement
pub const POP_VARIANTS: u8 = 5;

/// Sounds the chooser can play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// One of the pop variants, `0..POP_VARIANTS`
    Pop(u8),
    Swish,
}

/// One sound or vibration request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackCue {
    Play(Sound),
    /// Single vibration in milliseconds
    Vibrate(u64),
    /// Alternating wait/vibrate durations in milliseconds
    VibratePattern(Vec<u64>),
}

/// Trait for subsystems that react to session events
///
/// Handlers are called in priority order (highest first).
/// When a handler consumes an event (returns true), propagation stops.
pub trait FeedbackHandler {
    /// Name of this handler for debugging
    fn name(&self) -> &str;

    /// Priority for event routing (higher = earlier)
    fn priority(&self) -> u32;

    /// Handle one event; return true to stop propagation
    fn handle_event(&mut self, event: &LifecycleEvent) -> bool;

    /// Called before each batch of events produced by one session call
    fn begin_batch(&mut self) {}

    /// Downcast to concrete type for accessing handler-specific methods
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Delivers session events to registered handlers
pub struct FeedbackDispatcher {
    /// Registered handlers, sorted by priority (highest first)
    handlers: Vec<Box<dyn FeedbackHandler>>,
    /// Debug: events delivered in the last batch
    last_events: Vec<String>,
}

impl FeedbackDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            last_events: Vec::new(),
        }
    }

    /// Register a handler, keeping handlers sorted by priority
    pub fn register_handler(&mut self, handler: Box<dyn FeedbackHandler>) {
        self.handlers.push(handler);
        self.handlers
            .sort_by_key(|h| std::cmp::Reverse(h.priority()));
    }

    /// Delivers one batch of events in order
    pub fn dispatch(&mut self, events: &[LifecycleEvent]) {
        self.last_events.clear();
        if events.is_empty() {
            return;
        }

        for handler in &mut self.handlers {
            handler.begin_batch();
        }

        for event in events {
            self.last_events.push(format!("{:?}", event));
            for handler in &mut self.handlers {
                if handler.handle_event(event) {
                    break;
                }
            }
        }
    }

    /// Get a mutable handler downcast to its concrete type
    pub fn handler_mut<T: 'static>(&mut self, name: &str) -> Option<&mut T> {
        self.handlers
            .iter_mut()
            .find(|h| h.name() == name)
            .and_then(|h| h.as_any_mut().downcast_mut::<T>())
    }

    /// Handler names and priorities, in dispatch order
    pub fn debug_handlers(&self) -> Vec<(String, u32)> {
        self.handlers
            .iter()
            .map(|h| (h.name().to_string(), h.priority()))
            .collect()
    }

    /// Events delivered in the last batch (for debugging)
    pub fn debug_last_events(&self) -> &[String] {
        &self.last_events
    }
}

impl Default for FeedbackDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns session events into sound and vibration cues
///
/// Cues are queued; the platform layer drains them with [`CueHandler::take_cues`].
pub struct CueHandler {
    settings: FeedbackSettings,
    rng: StdRng,
    vibrated_this_batch: bool,
    cues: Vec<FeedbackCue>,
}

impl CueHandler {
    pub const NAME: &'static str = "cues";

    pub fn new(settings: FeedbackSettings) -> Self {
        Self {
            settings,
            rng: StdRng::seed_from_u64(rand::random()),
            vibrated_this_batch: false,
            cues: Vec::new(),
        }
    }

    /// Builder method to make pop variant choice deterministic
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.reseed(seed);
        self
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Drains the queued cues
    pub fn take_cues(&mut self) -> Vec<FeedbackCue> {
        std::mem::take(&mut self.cues)
    }

    fn play(&mut self, sound: Sound) {
        if self.settings.sounds {
            self.cues.push(FeedbackCue::Play(sound));
        }
    }

    fn vibrate(&mut self, cue: FeedbackCue) {
        if self.settings.vibrations {
            self.cues.push(cue);
        }
    }
}

impl FeedbackHandler for CueHandler {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn priority(&self) -> u32 {
        100
    }

    fn begin_batch(&mut self) {
        self.vibrated_this_batch = false;
    }

    fn handle_event(&mut self, event: &LifecycleEvent) -> bool {
        match event {
            LifecycleEvent::ContactAdded(_) => {
                let variant = self.rng.random_range(0..POP_VARIANTS);
                self.play(Sound::Pop(variant));
                // One buzz per placement batch, however many fingers landed
                if !self.vibrated_this_batch {
                    self.vibrated_this_batch = true;
                    self.vibrate(FeedbackCue::Vibrate(50));
                }
            }
            LifecycleEvent::SelectionStarted { .. } => {
                self.vibrate(FeedbackCue::Vibrate(100));
            }
            LifecycleEvent::WinnersResolved(_) => {
                self.vibrate(FeedbackCue::VibratePattern(vec![0, 100, 50, 100]));
            }
            LifecycleEvent::AllContactsCleared => {
                self.play(Sound::Swish);
                self.vibrate(FeedbackCue::Vibrate(75));
            }
            LifecycleEvent::ContactRemoved(_) | LifecycleEvent::TimerArmed { .. } => {}
        }
        false
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Logs every session event through `tracing`
pub struct LogHandler;

impl LogHandler {
    pub const NAME: &'static str = "log";
}

impl FeedbackHandler for LogHandler {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn priority(&self) -> u32 {
        200
    }

    fn handle_event(&mut self, event: &LifecycleEvent) -> bool {
        match event {
            LifecycleEvent::WinnersResolved(outcome) => {
                let winners: Vec<String> =
                    outcome.winners().iter().map(|w| w.id.to_string()).collect();
                info!(winners = %winners.join(", "), "Winners chosen");
            }
            LifecycleEvent::AllContactsCleared => info!("All fingers lifted"),
            other => debug!(event = ?other, "Session event"),
        }
        false
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ContactId, SelectionOutcome, Winner};

    fn all_on() -> FeedbackSettings {
        FeedbackSettings {
            sounds: true,
            vibrations: true,
        }
    }

    fn dispatcher(settings: FeedbackSettings) -> FeedbackDispatcher {
        let mut dispatcher = FeedbackDispatcher::new();
        dispatcher.register_handler(Box::new(CueHandler::new(settings).with_seed(5)));
        dispatcher.register_handler(Box::new(LogHandler));
        dispatcher
    }

    fn cues(dispatcher: &mut FeedbackDispatcher) -> Vec<FeedbackCue> {
        dispatcher
            .handler_mut::<CueHandler>(CueHandler::NAME)
            .map(|h| h.take_cues())
            .unwrap_or_default()
    }

    #[test]
    fn test_handlers_sorted_by_priority() {
        let dispatcher = dispatcher(all_on());
        let order: Vec<String> = dispatcher
            .debug_handlers()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(order, vec!["log", "cues"]);
    }

    #[test]
    fn test_each_added_contact_pops_but_vibrates_once() {
        let mut dispatcher = dispatcher(all_on());
        dispatcher.dispatch(&[
            LifecycleEvent::ContactAdded(ContactId(1)),
            LifecycleEvent::ContactAdded(ContactId(2)),
            LifecycleEvent::ContactAdded(ContactId(3)),
        ]);

        let cues = cues(&mut dispatcher);
        let pops = cues
            .iter()
            .filter(|c| matches!(c, FeedbackCue::Play(Sound::Pop(v)) if *v < POP_VARIANTS))
            .count();
        let buzzes = cues
            .iter()
            .filter(|c| **c == FeedbackCue::Vibrate(50))
            .count();
        assert_eq!(pops, 3);
        assert_eq!(buzzes, 1);
    }

    #[test]
    fn test_next_batch_vibrates_again() {
        let mut dispatcher = dispatcher(all_on());
        dispatcher.dispatch(&[LifecycleEvent::ContactAdded(ContactId(1))]);
        dispatcher.dispatch(&[LifecycleEvent::ContactAdded(ContactId(2))]);

        let buzzes = cues(&mut dispatcher)
            .into_iter()
            .filter(|c| *c == FeedbackCue::Vibrate(50))
            .count();
        assert_eq!(buzzes, 2);
    }

    #[test]
    fn test_round_cues() {
        let mut dispatcher = dispatcher(all_on());
        let outcome = SelectionOutcome::Single(Winner {
            id: ContactId(1),
            position: [0.0, 0.0],
        });
        dispatcher.dispatch(&[LifecycleEvent::SelectionStarted { contacts: 2 }]);
        dispatcher.dispatch(&[LifecycleEvent::WinnersResolved(outcome)]);
        dispatcher.dispatch(&[
            LifecycleEvent::ContactRemoved(ContactId(1)),
            LifecycleEvent::AllContactsCleared,
        ]);

        assert_eq!(
            cues(&mut dispatcher),
            vec![
                FeedbackCue::Vibrate(100),
                FeedbackCue::VibratePattern(vec![0, 100, 50, 100]),
                FeedbackCue::Play(Sound::Swish),
                FeedbackCue::Vibrate(75),
            ]
        );
    }

    #[test]
    fn test_toggles_silence_cues() {
        let mut dispatcher = dispatcher(FeedbackSettings {
            sounds: false,
            vibrations: false,
        });
        dispatcher.dispatch(&[
            LifecycleEvent::ContactAdded(ContactId(1)),
            LifecycleEvent::AllContactsCleared,
        ]);
        assert!(cues(&mut dispatcher).is_empty());
    }

    #[test]
    fn test_sounds_only_by_default() {
        let mut dispatcher = dispatcher(FeedbackSettings::default());
        dispatcher.dispatch(&[LifecycleEvent::AllContactsCleared]);
        assert_eq!(cues(&mut dispatcher), vec![FeedbackCue::Play(Sound::Swish)]);
    }

    struct Swallow;

    impl FeedbackHandler for Swallow {
        fn name(&self) -> &str {
            "swallow"
        }

        fn priority(&self) -> u32 {
            500
        }

        fn handle_event(&mut self, _event: &LifecycleEvent) -> bool {
            true
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn test_consumed_event_stops_propagation() {
        let mut dispatcher = dispatcher(all_on());
        dispatcher.register_handler(Box::new(Swallow));
        dispatcher.dispatch(&[LifecycleEvent::AllContactsCleared]);

        assert!(cues(&mut dispatcher).is_empty());
        assert_eq!(dispatcher.debug_last_events().len(), 1);
    }
}
