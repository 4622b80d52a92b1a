//! Application configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sim::selection::MAX_WINNERS;
use crate::sim::{ChromeBounds, Platform, SessionConfig, Viewport};

/// Round rules chosen in the settings sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Number of winners to draw (1-4)
    pub winners: u32,
    /// Whether winners are drawn as a ranked list
    pub rank_winners: bool,
    /// Dwell time before the draw starts
    pub dwell_ms: u64,
    /// Delay between the start of the draw and the result
    pub pre_resolution_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            winners: 1,
            rank_winners: false,
            dwell_ms: 3000,
            pre_resolution_ms: 800,
        }
    }
}

impl SessionSettings {
    /// Builds the session rules these settings describe
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new(self.winners, self.rank_winners)
            .with_dwell(Duration::from_millis(self.dwell_ms))
            .with_pre_resolution(Duration::from_millis(self.pre_resolution_ms))
    }
}

/// Feedback toggles, consumed only by the feedback handlers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackSettings {
    pub sounds: bool,
    pub vibrations: bool,
}

impl Default for FeedbackSettings {
    fn default() -> Self {
        Self {
            sounds: true,
            vibrations: false,
        }
    }
}

/// Screen chrome measurements
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub platform: Platform,
    /// System status bar height (Android only)
    pub status_bar_height: f32,
    pub button_height: f32,
    pub side_margin: f32,
    pub bottom_nav_height: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        let chrome = ChromeBounds::default();
        Self {
            platform: Platform::Ios,
            status_bar_height: 0.0,
            button_height: chrome.button_height,
            side_margin: chrome.side_margin,
            bottom_nav_height: chrome.bottom_nav_height,
        }
    }
}

impl LayoutSettings {
    /// Chrome bounds for the configured platform
    pub fn chrome(&self) -> ChromeBounds {
        ChromeBounds {
            button_height: self.button_height,
            side_margin: self.side_margin,
            bottom_nav_height: self.bottom_nav_height,
            ..ChromeBounds::for_platform(self.platform, self.status_bar_height)
        }
    }
}

/// Default screen size for headless runs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 844.0,
        }
    }
}

impl ViewportSettings {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    pub session: SessionSettings,
    pub feedback: FeedbackSettings,
    pub layout: LayoutSettings,
    pub viewport: ViewportSettings,
}

impl AppConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. config/{profile}.toml (profile-specific configuration)
    /// 2. Environment variables with prefix APP_ (e.g., APP_SESSION__WINNERS=2)
    ///
    /// Config files are searched for in:
    /// 1. Next to the executable (target/debug/config or target/release/config)
    /// 2. In the current directory (./config)
    pub fn load(profile: &str) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(dir) = Self::find_config_dir() {
            let profile_path = dir.join(profile);
            builder = builder.add_source(File::from(profile_path.as_path()).required(false));
        } else {
            builder =
                builder.add_source(File::with_name(&format!("config/{}", profile)).required(false));
        }

        // Use __ as separator for nested fields (e.g., APP_SESSION__DWELL_MS)
        builder = builder.add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder
            .set_override("profile", profile)?
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Finds the config directory by searching in multiple locations
    fn find_config_dir() -> Option<std::path::PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = std::path::PathBuf::from("config");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        None
    }

    /// Loads configuration using the APP_PROFILE environment variable,
    /// defaulting to "release"
    pub fn load_from_env() -> Result<Self> {
        let profile = std::env::var("APP_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }

    /// Built-in settings used when no profile can be loaded
    pub fn builtin() -> Self {
        Self {
            profile: "builtin".to_string(),
            ..Self::default()
        }
    }

    /// Checks the ranges the settings sheet allows
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_WINNERS).contains(&self.session.winners) {
            return Err(Error::invalid(
                "session.winners",
                format!("must be between 1 and {}, got {}", MAX_WINNERS, self.session.winners),
            ));
        }

        if self.viewport.width <= 0.0 || self.viewport.height <= 0.0 {
            return Err(Error::invalid(
                "viewport",
                format!(
                    "must be positive, got {}x{}",
                    self.viewport.width, self.viewport.height
                ),
            ));
        }

        let chrome = self.layout.chrome();
        if chrome.top_band_bottom() + chrome.bottom_nav_height >= self.viewport.height {
            return Err(Error::invalid(
                "layout",
                "chrome bands leave no play surface",
            ));
        }

        Ok(())
    }
}
