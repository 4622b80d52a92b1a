//! Recorded touch scenarios
//!
//! A scenario is a list of timestamped touch reports, each holding the full
//! set of touches the platform considered active at that instant:
//!
//! ```toml
//! end_ms = 5000
//!
//! [viewport]
//! width = 390.0
//! height = 844.0
//!
//! [[steps]]
//! at_ms = 0
//! touches = [{ id = 1, x = 100.0, y = 400.0 }, { id = 2, x = 250.0, y = 420.0 }]
//!
//! [[steps]]
//! at_ms = 4000
//! touches = []
//! ```

use std::path::Path;
use std::time::Duration;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use super::config::{AppConfig, SessionSettings, ViewportSettings};
use crate::error::{Error, Result};
use crate::sim::RawTouch;

/// One touch report at a point on the session clock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioStep {
    pub at_ms: u64,
    #[serde(default)]
    pub touches: Vec<RawTouch>,
}

impl ScenarioStep {
    pub fn at(&self) -> Duration {
        Duration::from_millis(self.at_ms)
    }
}

/// A replayable sequence of touch reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Overrides the configured viewport
    #[serde(default)]
    pub viewport: Option<ViewportSettings>,
    /// Overrides the configured session rules
    #[serde(default)]
    pub session: Option<SessionSettings>,
    /// Session time to run until; defaults to the last step plus one full round
    #[serde(default)]
    pub end_ms: Option<u64>,
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Loads a scenario from any file format the `config` crate understands
    pub fn load(path: &Path) -> Result<Self> {
        let scenario_error = |reason: String| Error::Scenario {
            path: path.to_path_buf(),
            reason,
        };

        let scenario: Scenario = Config::builder()
            .add_source(File::from(path))
            .build()
            .and_then(|config| config.try_deserialize::<Scenario>())
            .map_err(|e| scenario_error(e.to_string()))?;

        scenario.validate().map_err(scenario_error)?;
        Ok(scenario)
    }

    /// Builds a scenario from steps in code
    pub fn from_steps(steps: Vec<ScenarioStep>) -> Self {
        Self {
            viewport: None,
            session: None,
            end_ms: None,
            steps,
        }
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.steps.is_empty() {
            return Err("scenario has no steps".to_string());
        }

        if let Some(pair) = self.steps.windows(2).find(|pair| pair[1].at_ms < pair[0].at_ms) {
            return Err(format!(
                "steps out of order: {}ms follows {}ms",
                pair[1].at_ms, pair[0].at_ms
            ));
        }

        if let (Some(end), Some(last)) = (self.end_ms, self.steps.last())
            && end < last.at_ms
        {
            return Err(format!("end_ms {} precedes last step at {}ms", end, last.at_ms));
        }

        Ok(())
    }

    /// `base` with this scenario's overrides applied, checked like a profile
    pub fn effective_config(&self, base: &AppConfig) -> Result<AppConfig> {
        let mut config = base.clone();
        if let Some(session) = &self.session {
            config.session = session.clone();
        }
        if let Some(viewport) = &self.viewport {
            config.viewport = viewport.clone();
        }
        config.validate()?;
        Ok(config)
    }

    /// Time of the final step
    pub fn last_step_at(&self) -> Duration {
        self.steps.last().map_or(Duration::ZERO, ScenarioStep::at)
    }
}
