//! Karaoke Style Resolver.
//!
//! Maps a word's highlight state to presentation property deltas. While a
//! word ramps in, each style blends between its "off" and "on" endpoints by
//! progress; once the word is active or past it snaps to "on". `Scale` and
//! `Glow` keep a separate endpoint for past words.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::highlight::DEFAULT_TRANSITION_MS;
use super::types::{Color, WordHighlightState};
use crate::engine::bridge::text::FONT_WEIGHT_NORMAL;
use crate::engine::error::EngineError;

const WEIGHT_ON: u16 = 700;
const OPACITY_OFF: f32 = 0.55;
const OPACITY_ON: f32 = 1.0;
const SCALE_ACTIVE: f32 = 1.12;
const SCALE_REST: f32 = 1.0;
const GLOW_ACTIVE: f32 = 1.0;
const GLOW_PAST: f32 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KaraokeStyle {
    Weight,
    Brightness,
    Underline,
    #[default]
    Color,
    Scale,
    Glow,
}

impl KaraokeStyle {
    pub const ALL: [KaraokeStyle; 6] = [
        KaraokeStyle::Weight,
        KaraokeStyle::Brightness,
        KaraokeStyle::Underline,
        KaraokeStyle::Color,
        KaraokeStyle::Scale,
        KaraokeStyle::Glow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            KaraokeStyle::Weight => "weight",
            KaraokeStyle::Brightness => "brightness",
            KaraokeStyle::Underline => "underline",
            KaraokeStyle::Color => "color",
            KaraokeStyle::Scale => "scale",
            KaraokeStyle::Glow => "glow",
        }
    }
}

impl fmt::Display for KaraokeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KaraokeStyle {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        KaraokeStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == name)
            .ok_or_else(|| EngineError::config(format!("unknown karaoke style {:?}", s)))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct KaraokeStyleConfig {
    pub active_color: Color,
    pub inactive_color: Color,
    pub transition_ms: f64,
}

impl Default for KaraokeStyleConfig {
    fn default() -> Self {
        Self {
            active_color: Color(255, 212, 0, 255),
            inactive_color: Color::WHITE,
            transition_ms: DEFAULT_TRANSITION_MS,
        }
    }
}

/// Presentation properties one style touches; `None` = leave unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleDelta {
    pub font_weight: Option<u16>,
    pub opacity: Option<f32>,
    /// Underline coverage of the word width (0..=1)
    pub underline: Option<f32>,
    pub color: Option<Color>,
    pub scale: Option<f32>,
    /// Glow intensity (0..=1)
    pub glow: Option<f32>,
    pub glow_color: Option<Color>,
    pub transition_ms: f64,
}

pub fn resolve_karaoke_style(
    style: KaraokeStyle,
    state: &WordHighlightState,
    config: &KaraokeStyleConfig,
) -> StyleDelta {
    let ramp = state.progress.clamp(0.0, 1.0);
    // active / past は "on" 側に固定
    let level = if state.is_active || state.is_past {
        1.0
    } else {
        ramp
    };

    let mut delta = StyleDelta {
        transition_ms: config.transition_ms,
        ..StyleDelta::default()
    };

    match style {
        KaraokeStyle::Weight => {
            let weight = lerp(FONT_WEIGHT_NORMAL as f32, WEIGHT_ON as f32, level);
            delta.font_weight = Some(weight.round() as u16);
        }
        KaraokeStyle::Brightness => {
            delta.opacity = Some(lerp(OPACITY_OFF, OPACITY_ON, level));
        }
        KaraokeStyle::Underline => {
            delta.underline = Some(lerp(0.0, 1.0, level));
        }
        KaraokeStyle::Color => {
            delta.color = Some(config.inactive_color.lerp(config.active_color, level));
        }
        KaraokeStyle::Scale => {
            let scale = if state.is_active {
                SCALE_ACTIVE
            } else if state.is_past {
                SCALE_REST
            } else {
                lerp(SCALE_REST, SCALE_ACTIVE, ramp)
            };
            delta.scale = Some(scale);
        }
        KaraokeStyle::Glow => {
            let glow = if state.is_active {
                GLOW_ACTIVE
            } else if state.is_past {
                GLOW_PAST
            } else {
                lerp(0.0, GLOW_ACTIVE, ramp)
            };
            delta.glow = Some(glow);
            delta.glow_color = Some(config.active_color);
        }
    }

    delta
}

fn lerp(from: f32, to: f32, t: f64) -> f32 {
    from + (to - from) * t as f32
}
