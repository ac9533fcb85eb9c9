//! The external configuration value consumed at render time.
//!
//! This is the complete input contract with the surrounding application
//! (UI shell, geocoding, export plumbing): an immutable value describing
//! where, when, what text, and what style. All fields are required; the only
//! server-side defaulting is for empty text fields (see [`StarMapConfig`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::astro::ObserverContext;
use crate::error::StarMapError;

/// A named observer location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Text overlay content. Empty strings select the documented defaults at
/// render time; the stored value is never rewritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextConfig {
    pub title: String,
    pub subtitle: String,
    pub caption: String,
}

/// Foreground/background star dot size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StarSize {
    Small,
    Medium,
    Large,
}

impl StarSize {
    /// (min, max) dot radius in canvas units; magnitude interpolates
    /// between them (brighter = larger).
    pub fn radius_range(&self) -> (f64, f64) {
        match self {
            StarSize::Small => (0.5, 2.0),
            StarSize::Medium => (1.0, 3.0),
            StarSize::Large => (1.5, 4.0),
        }
    }
}

/// Visual styling shared by both render backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Hex color ("#RRGGBB") used for stars, grid, lines, border, and text.
    pub star_color: String,
    /// Hex color for the raster background fill.
    pub background_color: String,
    pub constellation_lines: bool,
    pub star_size: StarSize,
    pub show_grid: bool,
    /// Stars with magnitude above this value are filtered out.
    pub magnitude_limit: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            star_color: "#FFFFFF".to_string(),
            background_color: "#0F172A".to_string(),
            constellation_lines: true,
            star_size: StarSize::Medium,
            show_grid: false,
            magnitude_limit: 3.0,
        }
    }
}

/// The full per-render configuration value. Immutable once built; the
/// renderer never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarMapConfig {
    pub location: Location,
    pub instant: DateTime<Utc>,
    pub text: TextConfig,
    pub style: StyleConfig,
}

impl StarMapConfig {
    /// Build a validated observer context from the location and instant.
    pub fn observer(&self) -> Result<ObserverContext, StarMapError> {
        ObserverContext::new(self.location.latitude, self.location.longitude, self.instant)
    }

    /// Title line, defaulting when the configured title is empty.
    pub fn title(&self) -> &str {
        if self.text.title.is_empty() {
            "Your Special Moment"
        } else {
            &self.text.title
        }
    }

    /// Subtitle line; defaults to the date of the instant.
    pub fn subtitle(&self) -> String {
        if self.text.subtitle.is_empty() {
            self.instant.format("%B %e, %Y").to_string()
        } else {
            self.text.subtitle.clone()
        }
    }

    /// Caption line; defaults to the location name.
    pub fn caption(&self) -> &str {
        if self.text.caption.is_empty() {
            &self.location.name
        } else {
            &self.text.caption
        }
    }
}

/// Suggested export file name: `<purpose>-<location>-<ISO date>.<ext>`.
pub fn export_file_name(purpose: &str, config: &StarMapConfig, extension: &str) -> String {
    format!(
        "{}-{}-{}.{}",
        purpose,
        config.location.name,
        config.instant.format("%Y-%m-%d"),
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_config() -> StarMapConfig {
        StarMapConfig {
            location: Location {
                name: "New York, USA".to_string(),
                latitude: 40.7128,
                longitude: -74.006,
            },
            instant: Utc.with_ymd_and_hms(2024, 6, 21, 0, 0, 0).unwrap(),
            text: TextConfig::default(),
            style: StyleConfig::default(),
        }
    }

    #[test]
    fn empty_text_fields_fall_back_to_defaults() {
        let config = sample_config();
        assert_eq!(config.title(), "Your Special Moment");
        assert!(config.subtitle().contains("2024"));
        assert_eq!(config.caption(), "New York, USA");

        let mut named = config.clone();
        named.text.title = "Our Special Day".to_string();
        named.text.caption = "Brooklyn".to_string();
        assert_eq!(named.title(), "Our Special Day");
        assert_eq!(named.caption(), "Brooklyn");
    }

    #[test]
    fn export_name_follows_the_convention() {
        let config = sample_config();
        assert_eq!(
            export_file_name("starmap", &config, "svg"),
            "starmap-New York, USA-2024-06-21.svg"
        );
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = sample_config();
        let json = serde_json::to_string(&config).unwrap();
        let back: StarMapConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);

        // The UI collaborator sends lowercase size classes.
        assert!(json.contains("\"medium\""));
    }

    #[test]
    fn observer_validation_flows_through_config() {
        let mut config = sample_config();
        assert!(config.observer().is_ok());
        config.location.latitude = 120.0;
        assert!(matches!(
            config.observer(),
            Err(StarMapError::InvalidObserverPosition { .. })
        ));
    }
}
