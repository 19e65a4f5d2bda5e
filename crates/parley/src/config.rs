//! Configuration types for Parley compilation.
//!
//! All types implement [`serde::Deserialize`], and every field falls back to
//! its default when absent, so a configuration file only needs the values it
//! changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and export settings.
//! - [`LayoutConfig`] - Sizing constants used by the layout transformer.
//! - [`ExportConfig`] - Output formatting of the exported layout context.
//!
//! # Example
//!
//! ```
//! # use parley::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().participant_width(), 120.0);
//! assert!(config.export().pretty());
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and export configurations.
    pub fn new(layout: LayoutConfig, export: ExportConfig) -> Self {
        Self { layout, export }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }
}

/// Sizing constants for participants and message lanes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    participant_width: f32,
    participant_height: f32,
    participant_margin: f32,
    message_lane_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            participant_width: 120.0,
            participant_height: 80.0,
            participant_margin: 80.0,
            message_lane_height: 80.0,
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    ///
    /// # Arguments
    ///
    /// * `participant_width` - Width of each participant box.
    /// * `participant_height` - Height of each participant box.
    /// * `participant_margin` - Horizontal gap between participant boxes.
    /// * `message_lane_height` - Vertical distance between consecutive messages.
    pub fn new(
        participant_width: f32,
        participant_height: f32,
        participant_margin: f32,
        message_lane_height: f32,
    ) -> Self {
        Self {
            participant_width,
            participant_height,
            participant_margin,
            message_lane_height,
        }
    }

    pub fn participant_width(&self) -> f32 {
        self.participant_width
    }

    pub fn participant_height(&self) -> f32 {
        self.participant_height
    }

    pub fn participant_margin(&self) -> f32 {
        self.participant_margin
    }

    pub fn message_lane_height(&self) -> f32 {
        self.message_lane_height
    }

    /// Checks that every constant is finite and not negative.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("participant_width", self.participant_width),
            ("participant_height", self.participant_height),
            ("participant_margin", self.participant_margin),
            ("message_lane_height", self.message_lane_height),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "layout.{name} must be a finite, non-negative number (got {value})"
                ));
            }
        }
        Ok(())
    }
}

/// Output options for the exported layout context.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Emit indented JSON.
    pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl ExportConfig {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn pretty(&self) -> bool {
        self.pretty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [layout]
            participant_width = 150.0

            [export]
            pretty = false
            "#,
        )
        .unwrap();

        assert_eq!(config.layout().participant_width(), 150.0);
        assert_eq!(config.layout().participant_height(), 80.0);
        assert!(!config.export().pretty());
    }

    #[test]
    fn test_empty_toml() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_validate() {
        assert!(LayoutConfig::default().validate().is_ok());

        let err = LayoutConfig::new(120.0, -1.0, 80.0, 80.0)
            .validate()
            .unwrap_err();
        assert!(err.contains("participant_height"), "{err}");

        assert!(LayoutConfig::new(f32::NAN, 80.0, 80.0, 80.0).validate().is_err());
    }
}
