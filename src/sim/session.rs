//! Chooser session state machine
//!
//! Owns the contact registry, the dwell timer, the pre-resolution delay
//! and the round outcome, and decides which inputs count in each state:
//!
//! ```text
//! IDLE ──threshold reached──▶ ARMED ──dwell elapsed──▶ SELECTING
//!   ▲                           │ new contact: re-arm       │ delay elapsed
//!   │                           ▼                           ▼
//!   └──────── all contacts lifted (any state) ◀──────── RESOLVED
//! ```
//!
//! Arming needs `winners + 1` contacts, but only a full lift-off disarms.
//! Every mutator returns the [`LifecycleEvent`]s it produced so feedback
//! can be driven without the session knowing about sound or haptics.

use std::time::Duration;

use enum_map::{Enum, EnumMap};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::contact::{ContactId, ContactSet, RawTouch};
use super::geometry::{ChromeBounds, Viewport};
use super::registry::TouchRegistry;
use super::selection::{SelectionOutcome, SessionConfig, select_winners};
use super::timer::DelayedTask;

/// Phase of the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Enum, Default)]
pub enum SessionState {
    /// Waiting for enough fingers
    #[default]
    Idle,
    /// Dwell countdown running
    Armed,
    /// Draw in progress, waiting out the pre-resolution delay
    Selecting,
    /// Winners shown until every finger lifts
    Resolved,
}

/// Notifications for feedback and presentation
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    ContactAdded(ContactId),
    ContactRemoved(ContactId),
    /// Dwell countdown started, or restarted by a new contact
    TimerArmed { rearmed: bool },
    /// Draw started over this many contacts
    SelectionStarted { contacts: usize },
    WinnersResolved(SelectionOutcome),
    /// Last finger lifted; the round was reset
    AllContactsCleared,
}

/// Counters across all rounds of a session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStats {
    entries: EnumMap<SessionState, u32>,
    rounds_resolved: u32,
    rounds_abandoned: u32,
}

impl SessionStats {
    /// Number of times `state` was entered
    pub fn entries(&self, state: SessionState) -> u32 {
        self.entries[state]
    }

    pub fn rounds_resolved(&self) -> u32 {
        self.rounds_resolved
    }

    /// Rounds that were armed but lifted before a result
    pub fn rounds_abandoned(&self) -> u32 {
        self.rounds_abandoned
    }
}

/// One chooser screen
pub struct ChooserSession {
    config: SessionConfig,
    /// Config change requested mid-round, applied on the next return to idle
    pending_config: Option<SessionConfig>,
    state: SessionState,
    registry: TouchRegistry,
    dwell: DelayedTask<()>,
    /// Carries the contact snapshot taken when the draw started
    resolution: DelayedTask<ContactSet>,
    outcome: Option<SelectionOutcome>,
    clock: Duration,
    rng_seed: u64,
    rng: StdRng,
    stats: SessionStats,
}

impl ChooserSession {
    /// Creates an idle session with a random seed
    pub fn new(config: SessionConfig, viewport: Viewport, chrome: ChromeBounds) -> Self {
        let rng_seed = rand::random();
        let mut stats = SessionStats::default();
        stats.entries[SessionState::Idle] = 1;

        Self {
            config,
            pending_config: None,
            state: SessionState::Idle,
            registry: TouchRegistry::new(viewport, chrome),
            dwell: DelayedTask::new(config.dwell()),
            resolution: DelayedTask::new(config.pre_resolution()),
            outcome: None,
            clock: Duration::ZERO,
            rng_seed,
            rng: StdRng::seed_from_u64(rng_seed),
            stats,
        }
    }

    /// Builder method to set a specific RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Handles a touch start, move or end callback
    ///
    /// `raw` is the complete list of touches the platform reports as active.
    pub fn on_touches_changed(&mut self, raw: &[RawTouch]) -> Vec<LifecycleEvent> {
        let update = self.registry.update(raw, self.clock);
        let mut events = Vec::new();

        for contact in &update.added {
            events.push(LifecycleEvent::ContactAdded(contact.id));
        }
        for id in &update.removed {
            events.push(LifecycleEvent::ContactRemoved(*id));
        }

        if update.current.is_empty() {
            if !update.removed.is_empty() {
                self.clear_round();
                events.push(LifecycleEvent::AllContactsCleared);
            }
            return events;
        }

        if update.added.is_empty() {
            return events;
        }

        match self.state {
            SessionState::Idle => {
                if update.current.len() >= self.config.arm_threshold() {
                    self.transition(SessionState::Armed);
                    self.dwell.arm(());
                    events.push(LifecycleEvent::TimerArmed { rearmed: false });
                } else {
                    trace!(
                        contacts = update.current.len(),
                        threshold = self.config.arm_threshold(),
                        "Below arm threshold"
                    );
                }
            }
            SessionState::Armed => {
                self.dwell.arm(());
                debug!(contacts = update.current.len(), "Dwell timer restarted");
                events.push(LifecycleEvent::TimerArmed { rearmed: true });
            }
            SessionState::Selecting | SessionState::Resolved => {
                trace!(state = ?self.state, "New contacts ignored");
            }
        }

        events
    }

    /// Advances the session clock, firing any delay that came due
    pub fn tick(&mut self, elapsed: Duration) -> Vec<LifecycleEvent> {
        self.clock += elapsed;
        let mut events = Vec::new();
        let mut budget = elapsed;

        if self.state == SessionState::Armed {
            match self.dwell.advance(budget) {
                Some(fired) => {
                    budget = fired.overshoot;
                    self.begin_selection(&mut events);
                }
                None => return events,
            }
        }

        if self.state == SessionState::Selecting
            && let Some(fired) = self.resolution.advance(budget)
        {
            self.resolve(fired.payload, &mut events);
        }

        events
    }

    /// Moves from ARMED to SELECTING once the dwell delay elapsed
    fn begin_selection(&mut self, events: &mut Vec<LifecycleEvent>) {
        if self.registry.is_empty() || self.outcome.is_some() {
            trace!(state = ?self.state, "Stale dwell fire ignored");
            return;
        }

        let snapshot = self.registry.contacts().clone();
        let contacts = snapshot.len();
        self.transition(SessionState::Selecting);
        self.resolution.arm(snapshot);
        events.push(LifecycleEvent::SelectionStarted { contacts });
    }

    /// Draws winners from the snapshot taken when selection began
    fn resolve(&mut self, snapshot: ContactSet, events: &mut Vec<LifecycleEvent>) {
        if self.registry.is_empty() || self.outcome.is_some() {
            trace!(state = ?self.state, "Stale resolution ignored");
            return;
        }

        // Fingers still down report where they are now
        let live = self.registry.contacts();
        let pool: ContactSet = snapshot
            .iter()
            .map(|contact| match live.get(contact.id) {
                Some(current) => *current,
                None => *contact,
            })
            .collect();

        let outcome = select_winners(&pool, &self.config, &mut self.rng);
        debug!(
            winners = outcome.len(),
            ranked = self.config.rank_winners(),
            "Winners resolved"
        );

        self.outcome = Some(outcome.clone());
        self.stats.rounds_resolved += 1;
        self.transition(SessionState::Resolved);
        events.push(LifecycleEvent::WinnersResolved(outcome));
    }

    /// Returns to idle, cancelling every pending delay
    fn clear_round(&mut self) {
        if matches!(self.state, SessionState::Armed | SessionState::Selecting) {
            self.stats.rounds_abandoned += 1;
        }

        self.dwell.cancel();
        self.resolution.cancel();
        self.outcome = None;

        if self.state != SessionState::Idle {
            self.transition(SessionState::Idle);
        }

        if let Some(config) = self.pending_config.take() {
            self.apply_config(config);
        }
    }

    fn transition(&mut self, next: SessionState) {
        debug!(
            from = ?self.state,
            to = ?next,
            clock_ms = self.clock.as_millis() as u64,
            "Session transition"
        );
        self.state = next;
        self.stats.entries[next] += 1;
    }

    fn apply_config(&mut self, config: SessionConfig) {
        debug!(?config, "Session config applied");
        self.config = config;
        self.dwell.set_delay(config.dwell());
        self.resolution.set_delay(config.pre_resolution());
    }

    /// Replaces the round rules
    ///
    /// Applied immediately when idle, otherwise once every finger has lifted.
    pub fn set_config(&mut self, config: SessionConfig) {
        if self.state == SessionState::Idle {
            self.pending_config = None;
            self.apply_config(config);
        } else {
            debug!(?config, state = ?self.state, "Session config deferred");
            self.pending_config = Some(config);
        }
    }

    /// Updates the screen size used to classify chrome touches
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.registry.set_viewport(viewport);
    }

    /// Updates the chrome bands, e.g. after a status bar height change
    ///
    /// Like [`ChooserSession::set_viewport`], this takes effect on the next
    /// touch report.
    pub fn set_chrome(&mut self, chrome: ChromeBounds) {
        self.registry.set_chrome(chrome);
    }

    /// Drops all contacts and returns to idle without emitting events
    pub fn reset(&mut self) {
        self.registry.clear();
        self.dwell.reset();
        self.resolution.reset();
        self.clear_round();
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn contacts(&self) -> &ContactSet {
        self.registry.contacts()
    }

    pub fn outcome(&self) -> Option<&SelectionOutcome> {
        self.outcome.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Config waiting for the next return to idle
    pub fn pending_config(&self) -> Option<&SessionConfig> {
        self.pending_config.as_ref()
    }

    /// Time left on the dwell countdown, if armed
    pub fn dwell_remaining(&self) -> Option<Duration> {
        self.dwell.remaining()
    }

    /// Time left before the draw resolves, if selecting
    pub fn resolution_remaining(&self) -> Option<Duration> {
        self.resolution.remaining()
    }

    /// Time until the next delay comes due in the current state
    pub fn next_deadline(&self) -> Option<Duration> {
        match self.state {
            SessionState::Armed => self.dwell.remaining(),
            SessionState::Selecting => self.resolution.remaining(),
            SessionState::Idle | SessionState::Resolved => None,
        }
    }

    /// Returns true if any delay is pending
    pub fn has_pending_timer(&self) -> bool {
        self.dwell.is_pending() || self.resolution.is_pending()
    }

    /// Number of times the dwell timer was armed (including re-arms)
    pub fn dwell_arm_count(&self) -> u64 {
        self.dwell.arm_count()
    }

    /// Total session time elapsed
    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn viewport(&self) -> Viewport {
        self.registry.viewport()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Platform;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn session(winners: u32, rank: bool) -> ChooserSession {
        ChooserSession::new(
            SessionConfig::new(winners, rank),
            Viewport::new(390.0, 844.0),
            ChromeBounds::default(),
        )
        .with_seed(1234)
    }

    fn fingers(ids: &[u64]) -> Vec<RawTouch> {
        ids.iter()
            .map(|&id| RawTouch::new(id, 60.0 + id as f32 * 40.0, 400.0))
            .collect()
    }

    #[test]
    fn test_below_threshold_stays_idle() {
        let mut s = session(2, false);
        let events = s.on_touches_changed(&fingers(&[1, 2]));

        assert_eq!(s.state(), SessionState::Idle);
        assert!(!s.has_pending_timer());
        assert_eq!(
            events,
            vec![
                LifecycleEvent::ContactAdded(ContactId(1)),
                LifecycleEvent::ContactAdded(ContactId(2)),
            ]
        );

        s.tick(ms(10_000));
        assert_eq!(s.state(), SessionState::Idle);
        assert_eq!(s.dwell_arm_count(), 0);
    }

    #[test]
    fn test_batch_reaching_threshold_arms_once() {
        let mut s = session(1, false);
        let events = s.on_touches_changed(&fingers(&[1, 2, 3]));

        assert_eq!(s.state(), SessionState::Armed);
        assert_eq!(s.dwell_arm_count(), 1);
        assert_eq!(s.dwell_remaining(), Some(ms(3000)));
        assert_eq!(
            events.last(),
            Some(&LifecycleEvent::TimerArmed { rearmed: false })
        );
    }

    #[test]
    fn test_one_at_a_time_reaching_threshold_arms() {
        let mut s = session(1, false);
        s.on_touches_changed(&fingers(&[1]));
        assert_eq!(s.state(), SessionState::Idle);

        s.tick(ms(500));
        s.on_touches_changed(&fingers(&[1, 2]));
        assert_eq!(s.state(), SessionState::Armed);
        assert_eq!(s.dwell_arm_count(), 1);
    }

    #[test]
    fn test_new_contact_restarts_countdown() {
        let mut s = session(1, false);
        s.on_touches_changed(&fingers(&[1, 2]));
        s.tick(ms(2900));
        assert_eq!(s.dwell_remaining(), Some(ms(100)));

        let events = s.on_touches_changed(&fingers(&[1, 2, 3]));
        assert_eq!(s.dwell_remaining(), Some(ms(3000)));
        assert!(events.contains(&LifecycleEvent::TimerArmed { rearmed: true }));

        s.tick(ms(2999));
        assert_eq!(s.state(), SessionState::Armed);
        s.tick(ms(1));
        assert_eq!(s.state(), SessionState::Selecting);
    }

    #[test]
    fn test_moves_do_not_restart_countdown() {
        let mut s = session(1, false);
        s.on_touches_changed(&fingers(&[1, 2]));
        s.tick(ms(1000));

        let moved = vec![RawTouch::new(1, 110.0, 420.0), RawTouch::new(2, 150.0, 430.0)];
        let events = s.on_touches_changed(&moved);

        assert!(events.is_empty());
        assert_eq!(s.dwell_remaining(), Some(ms(2000)));
    }

    #[test]
    fn test_partial_lift_keeps_armed() {
        let mut s = session(2, true);
        s.on_touches_changed(&fingers(&[1, 2, 3]));
        s.tick(ms(1000));
        s.on_touches_changed(&fingers(&[1, 2]));

        assert_eq!(s.state(), SessionState::Armed);
        assert_eq!(s.dwell_remaining(), Some(ms(2000)));
    }

    #[test]
    fn test_full_round_resolves_then_resets() {
        let mut s = session(1, false);
        s.on_touches_changed(&fingers(&[1, 2, 3]));

        let events = s.tick(ms(3000));
        assert_eq!(events, vec![LifecycleEvent::SelectionStarted { contacts: 3 }]);
        assert_eq!(s.state(), SessionState::Selecting);
        assert_eq!(s.resolution_remaining(), Some(ms(800)));

        let events = s.tick(ms(800));
        assert_eq!(s.state(), SessionState::Resolved);
        let Some(LifecycleEvent::WinnersResolved(outcome)) = events.first() else {
            panic!("expected a resolution, got {:?}", events);
        };
        assert_eq!(outcome.len(), 1);
        assert!(s.contacts().contains(outcome.winners()[0].id));

        let events = s.on_touches_changed(&[]);
        assert_eq!(s.state(), SessionState::Idle);
        assert!(s.outcome().is_none());
        assert_eq!(events.last(), Some(&LifecycleEvent::AllContactsCleared));
        assert_eq!(s.stats().rounds_resolved(), 1);
    }

    #[test]
    fn test_coarse_tick_carries_overshoot() {
        let mut s = session(1, false);
        s.on_touches_changed(&fingers(&[1, 2]));

        let events = s.tick(ms(3900));
        assert_eq!(s.state(), SessionState::Resolved);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], LifecycleEvent::SelectionStarted { .. }));
        assert!(matches!(events[1], LifecycleEvent::WinnersResolved(_)));
    }

    #[test]
    fn test_contacts_added_while_selecting_are_not_drawn() {
        let mut s = session(4, true);
        s.on_touches_changed(&fingers(&[1, 2, 3, 4, 5]));
        s.tick(ms(3000));
        assert_eq!(s.state(), SessionState::Selecting);

        s.on_touches_changed(&fingers(&[1, 2, 3, 4, 5, 6]));
        assert!(s.dwell_remaining().is_none());

        s.tick(ms(800));
        let outcome = s.outcome().cloned();
        assert!(outcome.is_some_and(|o| !o.contains(ContactId(6)) && o.len() == 4));
    }

    #[test]
    fn test_resolved_ignores_new_contacts() {
        let mut s = session(1, false);
        s.on_touches_changed(&fingers(&[1, 2]));
        s.tick(ms(3800));
        let before = s.outcome().cloned();

        let events = s.on_touches_changed(&fingers(&[1, 2, 3]));
        assert_eq!(events, vec![LifecycleEvent::ContactAdded(ContactId(3))]);
        assert_eq!(s.state(), SessionState::Resolved);
        assert!(!s.has_pending_timer());

        s.tick(ms(10_000));
        assert_eq!(s.outcome().cloned(), before);
    }

    #[test]
    fn test_resolved_survives_partial_lift() {
        let mut s = session(1, false);
        s.on_touches_changed(&fingers(&[1, 2]));
        s.tick(ms(3800));

        s.on_touches_changed(&fingers(&[2]));
        assert_eq!(s.state(), SessionState::Resolved);
        assert!(s.outcome().is_some());
    }

    #[test]
    fn test_lift_off_while_armed_abandons_round() {
        let mut s = session(1, false);
        s.on_touches_changed(&fingers(&[1, 2]));
        s.tick(ms(2000));
        s.on_touches_changed(&[]);

        assert_eq!(s.state(), SessionState::Idle);
        assert!(!s.has_pending_timer());
        assert_eq!(s.stats().rounds_abandoned(), 1);

        // The cancelled countdown never fires
        assert!(s.tick(ms(10_000)).is_empty());
        assert_eq!(s.state(), SessionState::Idle);
    }

    #[test]
    fn test_lift_off_while_selecting_cancels_resolution() {
        let mut s = session(1, false);
        s.on_touches_changed(&fingers(&[1, 2]));
        s.tick(ms(3400));
        assert_eq!(s.state(), SessionState::Selecting);

        s.on_touches_changed(&[]);
        assert_eq!(s.state(), SessionState::Idle);
        assert!(s.resolution_remaining().is_none());
        assert!(s.tick(ms(1000)).is_empty());
        assert!(s.outcome().is_none());
    }

    #[test]
    fn test_lift_off_below_threshold_still_clears() {
        let mut s = session(3, false);
        s.on_touches_changed(&fingers(&[1]));
        let events = s.on_touches_changed(&[]);
        assert_eq!(
            events,
            vec![
                LifecycleEvent::ContactRemoved(ContactId(1)),
                LifecycleEvent::AllContactsCleared,
            ]
        );
    }

    #[test]
    fn test_empty_report_while_empty_is_silent() {
        let mut s = session(1, false);
        assert!(s.on_touches_changed(&[]).is_empty());
    }

    #[test]
    fn test_chrome_only_touches_do_not_start_round() {
        let mut s = session(1, false);
        let events = s.on_touches_changed(&[
            RawTouch::new(1, 200.0, 60.0),
            RawTouch::new(2, 200.0, 830.0),
        ]);
        assert!(events.is_empty());
        assert_eq!(s.state(), SessionState::Idle);
    }

    #[test]
    fn test_winner_position_follows_finger_during_selection() {
        let mut s = session(1, false);
        s.on_touches_changed(&[RawTouch::new(1, 100.0, 400.0), RawTouch::new(2, 300.0, 400.0)]);
        s.tick(ms(3000));
        s.on_touches_changed(&[RawTouch::new(1, 110.0, 410.0), RawTouch::new(2, 310.0, 410.0)]);
        s.tick(ms(800));

        let winner = s.outcome().map(|o| o.winners()[0]);
        assert!(winner.is_some_and(|w| w.position[1] == 410.0));
    }

    #[test]
    fn test_config_change_deferred_until_idle() {
        let mut s = session(1, false);
        s.on_touches_changed(&fingers(&[1, 2]));
        s.set_config(SessionConfig::new(3, true));

        assert_eq!(s.config().required_winners(), 1);
        assert!(s.pending_config().is_some());

        s.on_touches_changed(&[]);
        assert_eq!(s.config().required_winners(), 3);
        assert!(s.pending_config().is_none());
    }

    #[test]
    fn test_config_applies_immediately_when_idle() {
        let mut s = session(1, false);
        s.set_config(SessionConfig::new(2, false).with_dwell(ms(1000)));
        s.on_touches_changed(&fingers(&[1, 2, 3]));
        assert_eq!(s.dwell_remaining(), Some(ms(1000)));
    }

    #[test]
    fn test_same_seed_same_winner() {
        let mut a = session(1, false).with_seed(77);
        let mut b = session(1, false).with_seed(77);
        for s in [&mut a, &mut b] {
            s.on_touches_changed(&fingers(&[1, 2, 3, 4]));
            s.tick(ms(3800));
        }
        assert_eq!(a.outcome(), b.outcome());
    }

    #[test]
    fn test_viewport_change_reclassifies_touches() {
        let mut s = session(1, false);
        let report = [
            RawTouch::new(1, 100.0, 400.0),
            RawTouch::new(2, 200.0, 700.0),
            RawTouch::new(3, 300.0, 800.0),
        ];

        // Finger 3 sits on the bottom nav band of an 844pt screen
        let events = s.on_touches_changed(&report);
        assert_eq!(
            events,
            vec![
                LifecycleEvent::ContactAdded(ContactId(1)),
                LifecycleEvent::ContactAdded(ContactId(2)),
                LifecycleEvent::TimerArmed { rearmed: false },
            ]
        );

        s.tick(ms(1000));
        s.set_viewport(Viewport::new(390.0, 760.0));
        assert_eq!(s.viewport(), Viewport::new(390.0, 760.0));

        let events = s.on_touches_changed(&report);
        assert_eq!(events, vec![LifecycleEvent::ContactRemoved(ContactId(2))]);
        assert_eq!(s.state(), SessionState::Armed);
        assert_eq!(s.dwell_remaining(), Some(ms(2000)));

        s.set_viewport(Viewport::new(390.0, 915.0));
        let events = s.on_touches_changed(&report);
        assert_eq!(
            events,
            vec![
                LifecycleEvent::ContactAdded(ContactId(2)),
                LifecycleEvent::ContactAdded(ContactId(3)),
                LifecycleEvent::TimerArmed { rearmed: true },
            ]
        );
        assert_eq!(s.contacts().len(), 3);
    }

    #[test]
    fn test_viewport_shrink_covering_every_finger_clears_round() {
        let mut s = session(1, false);
        s.on_touches_changed(&fingers(&[1, 2]));

        // Fingers at y=400 fall inside the bottom band once it starts at 320
        s.set_viewport(Viewport::new(390.0, 400.0));
        let events = s.on_touches_changed(&fingers(&[1, 2]));

        assert_eq!(events.last(), Some(&LifecycleEvent::AllContactsCleared));
        assert_eq!(s.state(), SessionState::Idle);
        assert!(!s.has_pending_timer());
    }

    #[test]
    fn test_chrome_change_applies_on_next_report() {
        let mut s = session(1, false);
        let report = [RawTouch::new(1, 100.0, 400.0), RawTouch::new(2, 200.0, 120.0)];
        s.on_touches_changed(&report);
        assert_eq!(s.state(), SessionState::Armed);

        // A tall Android status bar moves the lower edge of the button row to y=130
        s.set_chrome(ChromeBounds::for_platform(Platform::Android, 80.0));
        assert!(s.contacts().contains(ContactId(2)));

        let events = s.on_touches_changed(&report);
        assert_eq!(events, vec![LifecycleEvent::ContactRemoved(ContactId(2))]);
        assert_eq!(s.state(), SessionState::Armed);
    }

    #[test]
    fn test_next_deadline_follows_state() {
        let mut s = session(1, false);
        assert_eq!(s.next_deadline(), None);

        s.on_touches_changed(&fingers(&[1, 2]));
        s.tick(ms(1000));
        assert_eq!(s.next_deadline(), Some(ms(2000)));

        s.tick(ms(2000));
        assert_eq!(s.next_deadline(), Some(ms(800)));

        s.tick(ms(800));
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut s = session(1, false);
        s.on_touches_changed(&fingers(&[1, 2]));
        s.reset();

        assert_eq!(s.state(), SessionState::Idle);
        assert!(s.contacts().is_empty());
        assert!(!s.has_pending_timer());
        assert_eq!(s.dwell_arm_count(), 0);
    }

    #[test]
    fn test_stats_count_state_entries() {
        let mut s = session(1, false);
        s.on_touches_changed(&fingers(&[1, 2]));
        s.tick(ms(3800));
        s.on_touches_changed(&[]);

        let stats = s.stats();
        assert_eq!(stats.entries(SessionState::Idle), 2);
        assert_eq!(stats.entries(SessionState::Armed), 1);
        assert_eq!(stats.entries(SessionState::Selecting), 1);
        assert_eq!(stats.entries(SessionState::Resolved), 1);
    }
}
