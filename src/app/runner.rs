//! Scenario replay
//!
//! Plays a recorded [`Scenario`] against a [`ChooserSession`] the way the
//! touch screen would: each step is delivered as a full touch report, time
//! is advanced between steps, and every batch of lifecycle events goes
//! through the [`FeedbackDispatcher`].

use std::time::Duration;

use colored::Colorize;
use tabled::{
    builder::Builder,
    settings::{Alignment, Modify, Style, object::Rows},
};
use tracing::{debug, info};

use super::config::AppConfig;
use super::feedback::{CueHandler, FeedbackCue, FeedbackDispatcher, LogHandler, Sound};
use super::scenario::Scenario;
use crate::error::Result;
use crate::sim::{
    ChooserSession, LifecycleEvent, RawTouch, SelectionOutcome, SessionState, SessionStats,
};

/// A lifecycle event stamped with the session time it happened at
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub at: Duration,
    pub event: LifecycleEvent,
}

/// A feedback cue stamped with the session time it was requested at
#[derive(Debug, Clone, PartialEq)]
pub struct CueEntry {
    pub at: Duration,
    pub cue: FeedbackCue,
}

/// Everything observed during one replay
#[derive(Debug, Clone)]
pub struct ReplayReport {
    pub timeline: Vec<TimelineEntry>,
    pub cues: Vec<CueEntry>,
    /// Most recent resolved outcome, even if it was cleared afterwards
    pub last_outcome: Option<SelectionOutcome>,
    pub final_state: SessionState,
    pub stats: SessionStats,
    pub seed: u64,
    pub duration: Duration,
}

impl ReplayReport {
    /// Timeline entries matching `predicate`
    pub fn events_where(
        &self,
        predicate: impl Fn(&LifecycleEvent) -> bool,
    ) -> impl Iterator<Item = &TimelineEntry> {
        self.timeline.iter().filter(move |entry| predicate(&entry.event))
    }
}

/// Drives a session through a scenario
pub struct Replay {
    scenario: Scenario,
    session: ChooserSession,
    dispatcher: FeedbackDispatcher,
    timeline: Vec<TimelineEntry>,
    cues: Vec<CueEntry>,
    last_outcome: Option<SelectionOutcome>,
}

impl Replay {
    /// Sets up a session from the app config, with scenario overrides applied
    ///
    /// Fails if the overrides break the settings ranges a profile must meet.
    pub fn new(config: &AppConfig, scenario: Scenario) -> Result<Self> {
        let config = scenario.effective_config(config)?;

        let session = ChooserSession::new(
            config.session.session_config(),
            config.viewport.viewport(),
            config.layout.chrome(),
        );

        let mut dispatcher = FeedbackDispatcher::new();
        dispatcher.register_handler(Box::new(LogHandler));
        dispatcher.register_handler(Box::new(CueHandler::new(config.feedback)));

        Ok(Self {
            scenario,
            session,
            dispatcher,
            timeline: Vec::new(),
            cues: Vec::new(),
            last_outcome: None,
        })
    }

    /// Builder method to make the draw and the cue choice deterministic
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.session = self.session.with_seed(seed);
        if let Some(cues) = self.dispatcher.handler_mut::<CueHandler>(CueHandler::NAME) {
            cues.reseed(seed.wrapping_add(1));
        }
        self
    }

    /// Session time the replay stops at
    pub fn end_time(&self) -> Duration {
        match self.scenario.end_ms {
            Some(end) => Duration::from_millis(end),
            None => {
                let config = self.session.config();
                self.scenario.last_step_at() + config.dwell() + config.pre_resolution()
            }
        }
    }

    /// Replays the scenario on a virtual clock, jumping between deadlines
    pub fn run(mut self) -> ReplayReport {
        info!(
            steps = self.scenario.steps.len(),
            seed = self.session.rng_seed(),
            "Replaying scenario"
        );

        let steps = std::mem::take(&mut self.scenario.steps);
        for step in &steps {
            self.advance_to(step.at());
            self.deliver(&step.touches);
        }
        self.scenario.steps = steps;

        let end = self.end_time();
        self.advance_to(end);
        self.finish()
    }

    /// Replays the scenario in real time, ticking once per `frame`
    pub async fn run_realtime(mut self, frame: Duration) -> ReplayReport {
        info!(
            steps = self.scenario.steps.len(),
            frame_ms = frame.as_millis() as u64,
            "Replaying scenario in real time"
        );

        let end = self.end_time();
        let steps = std::mem::take(&mut self.scenario.steps);
        let mut pending = steps.iter().peekable();

        let start = tokio::time::Instant::now();
        let mut interval = tokio::time::interval(frame);

        loop {
            interval.tick().await;
            let now = start.elapsed().min(end);

            while let Some(step) = pending.next_if(|step| step.at() <= now) {
                self.advance_to(step.at());
                self.deliver(&step.touches);
            }
            self.advance_to(now);

            if now >= end {
                break;
            }
        }

        self.scenario.steps = steps;
        self.finish()
    }

    /// Ticks the session up to `target`, stopping at every deadline on the way
    fn advance_to(&mut self, target: Duration) {
        while self.session.clock() < target {
            let remaining = target - self.session.clock();
            let step = self
                .session
                .next_deadline()
                .map_or(remaining, |deadline| deadline.min(remaining));
            let events = self.session.tick(step);
            self.record(events);
        }
    }

    fn deliver(&mut self, touches: &[RawTouch]) {
        debug!(
            clock_ms = self.session.clock().as_millis() as u64,
            touches = touches.len(),
            "Touch report"
        );
        let events = self.session.on_touches_changed(touches);
        self.record(events);
    }

    fn record(&mut self, events: Vec<LifecycleEvent>) {
        if events.is_empty() {
            return;
        }

        let at = self.session.clock();
        self.dispatcher.dispatch(&events);

        if let Some(handler) = self.dispatcher.handler_mut::<CueHandler>(CueHandler::NAME) {
            self.cues
                .extend(handler.take_cues().into_iter().map(|cue| CueEntry { at, cue }));
        }

        for event in events {
            if let LifecycleEvent::WinnersResolved(outcome) = &event {
                self.last_outcome = Some(outcome.clone());
            }
            self.timeline.push(TimelineEntry { at, event });
        }
    }

    fn finish(self) -> ReplayReport {
        ReplayReport {
            timeline: self.timeline,
            cues: self.cues,
            last_outcome: self.last_outcome,
            final_state: self.session.state(),
            stats: self.session.stats().clone(),
            seed: self.session.rng_seed(),
            duration: self.session.clock(),
        }
    }
}

/// Human-readable form of a lifecycle event
pub fn describe_event(event: &LifecycleEvent) -> String {
    match event {
        LifecycleEvent::ContactAdded(id) => format!("finger {} down", id),
        LifecycleEvent::ContactRemoved(id) => format!("finger {} up", id),
        LifecycleEvent::TimerArmed { rearmed: false } => "countdown started".to_string(),
        LifecycleEvent::TimerArmed { rearmed: true } => "countdown restarted".to_string(),
        LifecycleEvent::SelectionStarted { contacts } => {
            format!("drawing among {} fingers", contacts)
        }
        LifecycleEvent::WinnersResolved(outcome) => match outcome {
            SelectionOutcome::Single(winner) => format!("winner {}", winner.id),
            SelectionOutcome::Ranked(ranked) => {
                let places: Vec<String> = ranked
                    .iter()
                    .map(|r| format!("{}. {}", r.rank, r.winner.id))
                    .collect();
                format!("ranked {}", places.join(", "))
            }
        },
        LifecycleEvent::AllContactsCleared => "all fingers lifted".to_string(),
    }
}

fn describe_cue(cue: &FeedbackCue) -> String {
    match cue {
        FeedbackCue::Play(Sound::Pop(variant)) => format!("pop {}", variant + 1),
        FeedbackCue::Play(Sound::Swish) => "swish".to_string(),
        FeedbackCue::Vibrate(ms) => format!("vibrate {}ms", ms),
        FeedbackCue::VibratePattern(pattern) => format!("vibrate {:?}", pattern),
    }
}

/// Events and cues as `(time, event, feedback)` rows in session-time order
///
/// At the same instant, events come before the cues they produced.
fn report_rows(report: &ReplayReport) -> Vec<(Duration, String, String)> {
    let events = report
        .timeline
        .iter()
        .map(|entry| (entry.at, describe_event(&entry.event), String::new()));
    let cues = report
        .cues
        .iter()
        .map(|entry| (entry.at, String::new(), describe_cue(&entry.cue)));

    let mut rows: Vec<_> = events.chain(cues).collect();
    rows.sort_by_key(|(at, _, _)| *at);
    rows
}

/// Formats a replay report as a timeline table followed by a summary
pub fn format_report(report: &ReplayReport) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Time", "Event", "Feedback"]);

    for (at, event, feedback) in report_rows(report) {
        builder.push_record([format!("{:>6}ms", at.as_millis()), event, feedback]);
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    let mut output = table.to_string();
    output.push('\n');

    output.push_str(&format!("\n{}\n", "Summary".bold().underline()));
    output.push_str(&format!("  Seed: {}\n", report.seed));
    output.push_str(&format!("  Duration: {}ms\n", report.duration.as_millis()));
    output.push_str(&format!(
        "  Rounds: {} resolved, {} abandoned\n",
        report.stats.rounds_resolved(),
        report.stats.rounds_abandoned()
    ));
    output.push_str(&format!("  Final state: {:?}\n", report.final_state));

    match &report.last_outcome {
        Some(outcome) => {
            let line = describe_event(&LifecycleEvent::WinnersResolved(outcome.clone()));
            output.push_str(&format!("  {}\n", line.green().bold()));
        }
        None => output.push_str(&format!("  {}\n", "No winner chosen".yellow())),
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::scenario::ScenarioStep;

    fn three_finger_round() -> ReplayReport {
        let mut config = AppConfig::builtin();
        config.feedback.vibrations = true;

        let scenario = Scenario::from_steps(vec![
            ScenarioStep {
                at_ms: 0,
                touches: vec![
                    RawTouch::new(1, 90.0, 320.0),
                    RawTouch::new(2, 200.0, 460.0),
                    RawTouch::new(3, 310.0, 600.0),
                ],
            },
            ScenarioStep {
                at_ms: 4000,
                touches: vec![],
            },
        ]);

        match Replay::new(&config, scenario) {
            Ok(replay) => replay.with_seed(12).run(),
            Err(e) => panic!("builtin config rejected: {}", e),
        }
    }

    #[test]
    fn test_rows_are_in_time_order() {
        let report = three_finger_round();
        let rows = report_rows(&report);

        assert_eq!(rows.len(), report.timeline.len() + report.cues.len());
        assert!(rows.windows(2).all(|pair| pair[0].0 <= pair[1].0));
    }

    #[test]
    fn test_events_precede_their_cues() {
        let report = three_finger_round();
        let at_lift: Vec<(String, String)> = report_rows(&report)
            .into_iter()
            .filter(|(at, _, _)| *at == Duration::from_millis(4000))
            .map(|(_, event, feedback)| (event, feedback))
            .collect();

        assert_eq!(at_lift.first().map(|(e, _)| e.as_str()), Some("finger #1 up"));
        assert_eq!(
            at_lift.last(),
            Some(&(String::new(), "vibrate 75ms".to_string()))
        );
    }

    #[test]
    fn test_invalid_override_fails_setup() {
        let mut scenario = Scenario::from_steps(vec![ScenarioStep {
            at_ms: 0,
            touches: vec![],
        }]);
        scenario.session = Some(crate::app::SessionSettings {
            winners: 9,
            ..Default::default()
        });
        assert!(Replay::new(&AppConfig::builtin(), scenario).is_err());
    }
}
