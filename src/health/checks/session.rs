//! Chooser session health check

use std::time::Duration;

use crate::health::check::{CheckLog, CheckResult, SystemCheck};
use crate::sim::{
    ChooserSession, ChromeBounds, LifecycleEvent, RawTouch, SessionConfig, SessionState, Viewport,
};

/// Plays one scripted round and checks every transition on the way
pub struct SessionCheck {
    seed: u64,
}

impl SessionCheck {
    pub fn new() -> Self {
        Self { seed: 0x5eed }
    }
}

impl Default for SessionCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for SessionCheck {
    fn name(&self) -> &'static str {
        "Session"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Arms, draws and resets a three-finger round")
    }

    fn check(&self) -> CheckResult {
        let mut log = CheckLog::new();
        let config = SessionConfig::default();
        let mut session = ChooserSession::new(
            config,
            Viewport::new(390.0, 844.0),
            ChromeBounds::default(),
        )
        .with_seed(self.seed);

        let fingers = [
            RawTouch::new(1, 100.0, 300.0),
            RawTouch::new(2, 200.0, 400.0),
            RawTouch::new(3, 300.0, 500.0),
        ];

        session.on_touches_changed(&fingers[..1]);
        if session.state() == SessionState::Idle {
            log.ok("One finger stays idle");
        } else {
            log.fail(format!("One finger moved to {:?}", session.state()));
        }

        session.on_touches_changed(&fingers);
        if session.state() == SessionState::Armed {
            log.ok(format!("Armed with {} fingers", session.contacts().len()));
        } else {
            log.fail(format!("Expected Armed, found {:?}", session.state()));
        }

        session.tick(config.dwell());
        if session.state() == SessionState::Selecting {
            log.ok(format!("Selecting after {:?}", config.dwell()));
        } else {
            log.fail(format!("Dwell did not start the draw: {:?}", session.state()));
        }

        let events = session.tick(config.pre_resolution());
        match session.outcome() {
            Some(outcome)
                if outcome.len() == 1 && session.contacts().contains(outcome.winners()[0].id) =>
            {
                log.ok(format!("Winner {}", outcome.winners()[0].id));
            }
            other => log.fail(format!("Unexpected outcome {:?}", other)),
        }
        if !events
            .iter()
            .any(|e| matches!(e, LifecycleEvent::WinnersResolved(_)))
        {
            log.fail("No WinnersResolved event emitted");
        }

        let events = session.on_touches_changed(&[]);
        let cleared = events.last() == Some(&LifecycleEvent::AllContactsCleared);
        if cleared && session.state() == SessionState::Idle && !session.has_pending_timer() {
            log.ok("Lift-off returned to idle");
        } else {
            log.fail("Lift-off did not reset the round");
        }

        if !session.tick(Duration::from_secs(10)).is_empty() {
            log.warn("Events fired after the round was cleared");
        }

        log.finish(
            "Full round completed",
            "Round completed with warnings",
            "Session state machine misbehaved",
        )
    }
}
