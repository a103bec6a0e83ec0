//! Editor configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides.

use crate::history::DEFAULT_MAX_HISTORY;
use crate::shapes::{SerializableColor, ShapeStyle};
use kurbo::Vec2;
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Selection gesture tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Minimum pointer travel on either axis before a press becomes a drag.
    pub drag_threshold: f64,
    /// Distance moved per arrow key step.
    pub keyboard_step: f64,
    /// Delay before held arrow keys start repeating.
    pub repeat_delay_ms: u64,
    /// Cadence of arrow key repeats.
    pub repeat_interval_ms: u64,
    /// Wheel rotation step in degrees.
    pub rotate_step_degrees: f64,
    /// Wheel rotation step in degrees while Alt is held.
    pub fine_rotate_step_degrees: f64,
    /// Radius of the click collider used for hit-testing.
    pub hit_tolerance: f64,
    /// Grab radius of resize handles.
    pub control_point_radius: f64,
    /// Offset applied to duplicated and pasted shapes.
    pub duplicate_offset: (f64, f64),
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 3.0,
            keyboard_step: 3.0,
            repeat_delay_ms: 500,
            repeat_interval_ms: 100,
            rotate_step_degrees: 15.0,
            fine_rotate_step_degrees: 1.0,
            hit_tolerance: 2.0,
            control_point_radius: 8.0,
            duplicate_offset: (10.0, 10.0),
        }
    }
}

impl SelectionConfig {
    pub fn repeat_delay(&self) -> Duration {
        Duration::from_millis(self.repeat_delay_ms)
    }

    pub fn repeat_interval(&self) -> Duration {
        // A zero interval would make the repeat loop spin forever.
        Duration::from_millis(self.repeat_interval_ms.max(1))
    }

    pub fn duplicate_offset(&self) -> Vec2 {
        Vec2::new(self.duplicate_offset.0, self.duplicate_offset.1)
    }
}

/// Current tool options: the values new shapes are created with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolOptions {
    pub stroke_color: SerializableColor,
    pub fill_color: Option<SerializableColor>,
    pub stroke_width: f64,
    pub opacity: f64,
    /// Glyph name placed by the stamp tool.
    pub stamp_glyph: String,
    pub stamp_size: f64,
    /// Stamp rotation in degrees.
    pub stamp_angle: f64,
    pub eraser_radius: f64,
    /// Freehand simplification tolerance.
    pub pencil_tolerance: f64,
}

impl Default for ToolOptions {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            fill_color: None,
            stroke_width: 2.0,
            opacity: 1.0,
            stamp_glyph: "star".to_string(),
            stamp_size: 32.0,
            stamp_angle: 0.0,
            eraser_radius: 8.0,
            pencil_tolerance: 0.5,
        }
    }
}

impl ToolOptions {
    /// Style applied to newly drawn shapes.
    pub fn style(&self) -> ShapeStyle {
        ShapeStyle {
            stroke_color: self.stroke_color,
            stroke_width: self.stroke_width,
            fill_color: self.fill_color,
            opacity: self.opacity.clamp(0.0, 1.0),
        }
    }

    /// Set the stroke color from a host color picker.
    pub fn set_stroke(&mut self, color: Color) {
        self.stroke_color = color.into();
    }

    /// Set or clear the fill color.
    pub fn set_fill(&mut self, color: Option<Color>) {
        self.fill_color = color.map(Into::into);
    }
}

/// Top-level editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub selection: SelectionConfig,
    pub tools: ToolOptions,
    pub max_history: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            selection: SelectionConfig::default(),
            tools: ToolOptions::default(),
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_owned(),
            source: e,
        })?;
        let config = Self::from_json(&content)?;
        log::info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_setters_feed_style() {
        let mut options = ToolOptions::default();
        options.set_stroke(Color::from_rgba8(200, 10, 20, 255));
        options.set_fill(Some(Color::from_rgba8(0, 0, 255, 128)));

        let style = options.style();
        assert_eq!(style.stroke_color, SerializableColor::new(200, 10, 20, 255));
        assert_eq!(style.fill_color, Some(SerializableColor::new(0, 0, 255, 128)));

        options.set_fill(None);
        assert_eq!(options.style().fill_color, None);
    }

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.max_history, 50);
        assert!((config.selection.drag_threshold - 3.0).abs() < 1e-9);
        assert_eq!(config.selection.repeat_delay(), Duration::from_millis(500));
        assert_eq!(config.selection.repeat_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            EditorConfig::from_json(r#"{ "selection": { "keyboard_step": 5.0 } }"#).unwrap();
        assert!((config.selection.keyboard_step - 5.0).abs() < 1e-9);
        assert!((config.selection.rotate_step_degrees - 15.0).abs() < 1e-9);
        assert_eq!(config.tools, ToolOptions::default());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            EditorConfig::from_json("{ nope"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = EditorConfig::load(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inkboard.json");
        let mut config = EditorConfig::default();
        config.max_history = 10;
        config.tools.stamp_glyph = "heart".to_string();
        std::fs::write(&path, config.to_json().unwrap()).unwrap();

        assert_eq!(EditorConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = SelectionConfig {
            repeat_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.repeat_interval(), Duration::from_millis(1));
    }
}
