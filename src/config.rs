use log::{debug, warn};
use serde::Deserialize;

use crate::error::SiteError;
use crate::smooth_scroll::SmoothScrollOptions;

/// Id of the optional `<script type="application/json">` block a page can use
/// to override any of the defaults below.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// `#nav` gets `scrolled` once `scrollY` is strictly above this.
    pub nav_scroll_threshold: f64,
    /// Viewport fraction the one-shot reveal and counter triggers fire at.
    pub trigger_ratio: f64,
    /// Scroll distance (px) a horizontal strip stays pinned for.
    pub pin_distance: f64,
    /// Seconds the pinned strips take to catch up with the scrollbar.
    pub pin_scrub: f64,
    pub reveal_delay: f64,
    pub reveal_duration: f64,
    pub cover_duration: f64,
    pub form_delay_ms: u32,
    pub thank_you_url: String,
    pub counter_duration: f64,
    pub section_reveal_duration: f64,
    pub smooth_scroll: SmoothScrollOptions,
    pub theme_switcher: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            nav_scroll_threshold: 50.0,
            trigger_ratio: 0.85,
            pin_distance: 1500.0,
            pin_scrub: 1.0,
            reveal_delay: 0.2,
            reveal_duration: 1.2,
            cover_duration: 1.0,
            form_delay_ms: 1500,
            thank_you_url: "thank-you.html".to_string(),
            counter_duration: 2.0,
            section_reveal_duration: 1.0,
            smooth_scroll: SmoothScrollOptions::default(),
            theme_switcher: default_theme_switcher(),
        }
    }
}

#[cfg(debug_assertions)]
fn default_theme_switcher() -> bool {
    true // Developer builds get the preset panel
}

#[cfg(not(debug_assertions))]
fn default_theme_switcher() -> bool {
    false
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, SiteError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads overrides from the page, falling back to defaults when the block
    /// is absent or malformed.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|element| element.text_content());

        let Some(raw) = raw else {
            debug!("No #{} block, using default site config", CONFIG_ELEMENT_ID);
            return Self::default();
        };

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(err) => {
                warn!("Ignoring site config overrides: {}", err);
                Self::default()
            }
        }
    }

    /// Trigger ratio as a viewport percentage, e.g. `85.0`.
    pub fn trigger_percent(&self) -> f64 {
        self.trigger_ratio * 100.0
    }
}
