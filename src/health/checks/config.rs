//! Configuration health check

use crate::app::AppConfig;
use crate::health::check::{CheckLog, CheckResult, SystemCheck};

/// Loads and validates every shipped profile
pub struct ConfigCheck {
    profiles: Vec<String>,
}

impl ConfigCheck {
    pub fn new() -> Self {
        Self::with_profiles(["debug", "release"])
    }

    pub fn with_profiles<I, S>(profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            profiles: profiles.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Loads each profile and checks the settings ranges")
    }

    fn check(&self) -> CheckResult {
        let mut log = CheckLog::new();

        for profile in &self.profiles {
            match AppConfig::load(profile) {
                Ok(config) => log.ok(format!(
                    "Profile '{}': {} winner(s){}, {}x{} on {:?}",
                    profile,
                    config.session.winners,
                    if config.session.rank_winners { " ranked" } else { "" },
                    config.viewport.width,
                    config.viewport.height,
                    config.layout.platform,
                )),
                Err(e) => log.fail(format!("Profile '{}': {}", profile, e)),
            }
        }

        match AppConfig::load_from_env() {
            Ok(config) => log.ok(format!("Environment selects profile '{}'", config.profile)),
            Err(e) => log.warn(format!("Environment config: {}", e)),
        }

        if let Err(e) = AppConfig::builtin().validate() {
            log.fail(format!("Built-in fallback: {}", e));
        }

        log.finish(
            &format!("{} profiles validated", self.profiles.len()),
            "Config loaded with warnings",
            "One or more config profiles are invalid",
        )
    }
}
