//! Play-surface geometry
//!
//! Separates touches that land on UI chrome (the top button row and the
//! bottom navigation bar) from touches on the play surface.

use serde::{Deserialize, Serialize};

/// Fixed status-bar offset used on iOS
const IOS_TOP_OFFSET: f32 = 50.0;

/// Padding added below the Android status bar
const ANDROID_STATUS_PADDING: f32 = 10.0;

/// Current screen size in logical pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Platform the chrome offsets are computed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Ios,
    Android,
}

/// Bounds of the UI chrome bands that never take part in a draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChromeBounds {
    /// Distance from the top edge to the top of the button row
    pub top_offset: f32,
    /// Height of the icon buttons in the top row
    pub button_height: f32,
    /// Horizontal inset of the top row on both sides
    pub side_margin: f32,
    /// Height of the bottom navigation band
    pub bottom_nav_height: f32,
}

impl ChromeBounds {
    /// Chrome layout for the given platform
    ///
    /// `status_bar_height` is only used on Android, where the top row sits
    /// just below the system status bar.
    pub fn for_platform(platform: Platform, status_bar_height: f32) -> Self {
        let top_offset = match platform {
            Platform::Ios => IOS_TOP_OFFSET,
            Platform::Android => status_bar_height + ANDROID_STATUS_PADDING,
        };
        Self {
            top_offset,
            ..Self::default()
        }
    }

    /// Lower edge of the top chrome band
    pub fn top_band_bottom(&self) -> f32 {
        self.top_offset + self.button_height
    }

    /// Upper edge of the bottom navigation band
    pub fn bottom_band_top(&self, viewport: Viewport) -> f32 {
        viewport.height - self.bottom_nav_height
    }
}

impl Default for ChromeBounds {
    fn default() -> Self {
        Self {
            top_offset: IOS_TOP_OFFSET,
            button_height: 40.0,
            side_margin: 20.0,
            bottom_nav_height: 80.0,
        }
    }
}

/// Returns true if `point` falls on UI chrome rather than the play surface
pub fn is_interactive(point: [f32; 2], viewport: Viewport, chrome: &ChromeBounds) -> bool {
    let [x, y] = point;

    let in_top_band = y < chrome.top_band_bottom()
        && x >= chrome.side_margin
        && x <= viewport.width - chrome.side_margin;

    in_top_band || y > chrome.bottom_band_top(viewport)
}
