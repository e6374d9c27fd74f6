use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::engine::error::EngineError;
use crate::engine::karaoke::{KaraokeStyle, KaraokeStyleConfig};
use crate::engine::layouter::FitSettings;
use crate::engine::measure::TextMeasure;
use crate::platform::renderer::text_measurer::{FONT_ENV, platform_text_measure};

/// Host-supplied configuration: box constraints, karaoke look and the
/// measurement font.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub fit: FitSettings,
    pub karaoke: KaraokeStyleConfig,
    pub karaoke_style: KaraokeStyle,
    /// Font file used for measurement (None = system font)
    pub font_path: Option<PathBuf>,
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| EngineError::config(format!("parse config: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| EngineError::config(format!("read {}: {}", path.display(), e)))?;
        Self::from_json_str(&data)
    }

    /// `CAPTION_FIT_FONT` overrides `font_path`.
    pub fn apply_env(self) -> Self {
        self.apply_font_override(std::env::var(FONT_ENV).ok())
    }

    fn apply_font_override(mut self, font: Option<String>) -> Self {
        if let Some(font) = font.filter(|f| !f.trim().is_empty()) {
            self.font_path = Some(PathBuf::from(font));
        }
        self
    }

    /// Measurement adapter backed by the configured font, created on first use.
    pub fn text_measure(&self) -> TextMeasure {
        platform_text_measure(self.font_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::karaoke::Color;

    #[test]
    fn engine_config_default() {
        let config = EngineConfig::default();
        assert_eq!(config.fit, FitSettings::default());
        assert_eq!(config.karaoke_style, KaraokeStyle::Color);
        assert!(config.font_path.is_none());
    }

    #[test]
    fn parses_partial_json() {
        let json = r##"{
            "fit": { "max_lines": 3, "base_font_size": 64, "max_panel_height": 300 },
            "karaoke": { "active_color": "#ff0000" },
            "karaoke_style": "glow",
            "font_path": "/fonts/Inter-Bold.ttf"
        }"##;
        let config = EngineConfig::from_json_str(json).expect("valid config json");
        assert_eq!(config.fit.max_lines, 3);
        assert_eq!(config.fit.base_font_size, 64.0);
        assert_eq!(config.fit.max_panel_height, Some(300.0));
        assert_eq!(config.fit.min_font_size, FitSettings::default().min_font_size);
        assert_eq!(config.karaoke.active_color, Color(255, 0, 0, 255));
        assert_eq!(config.karaoke.inactive_color, Color::WHITE);
        assert_eq!(config.karaoke_style, KaraokeStyle::Glow);
        assert_eq!(config.font_path, Some(PathBuf::from("/fonts/Inter-Bold.ttf")));
    }

    #[test]
    fn rejects_bad_color() {
        let err = EngineConfig::from_json_str(r#"{ "karaoke": { "active_color": "red" } }"#)
            .unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn font_override_replaces_path() {
        let config = EngineConfig::default().apply_font_override(Some("/tmp/a.ttf".to_string()));
        assert_eq!(config.font_path, Some(PathBuf::from("/tmp/a.ttf")));

        let unchanged = EngineConfig::default().apply_font_override(Some("  ".to_string()));
        assert!(unchanged.font_path.is_none());
    }

    #[test]
    fn missing_config_file_is_a_config_error() {
        let err = EngineConfig::load(Path::new("/nonexistent/caption_fit.json")).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn text_measure_is_lazy() {
        let config = EngineConfig {
            font_path: Some(PathBuf::from("/nonexistent/font.ttf")),
            ..EngineConfig::default()
        };
        let measure = config.text_measure();
        assert!(!measure.is_initialized());
        let err = measure.measure_width("a", 10.0, None, 400).unwrap_err();
        assert!(matches!(err, EngineError::MeasurementUnavailable(_)));
    }
}
