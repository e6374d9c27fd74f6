use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::engine::error::EngineError;

// =========================
//          Timing
// =========================

/// One word of a caption with its spoken interval, in milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WordTiming {
    pub word: String,
    pub start_ms: f64,
    pub end_ms: f64,
}

impl WordTiming {
    pub fn new(word: impl Into<String>, start_ms: f64, end_ms: f64) -> Self {
        Self {
            word: word.into(),
            start_ms,
            end_ms,
        }
    }

    pub fn duration_ms(&self) -> f64 {
        self.end_ms - self.start_ms
    }

    /// `start_ms <= time_ms <= end_ms`
    pub fn contains(&self, time_ms: f64) -> bool {
        self.start_ms <= time_ms && time_ms <= self.end_ms
    }
}

/// Highlight state of one word at one timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordHighlightState {
    pub word_index: usize,
    /// 0..=1
    pub progress: f64,
    pub is_active: bool,
    pub is_past: bool,
}

impl WordHighlightState {
    pub fn idle(word_index: usize) -> Self {
        Self {
            word_index,
            progress: 0.0,
            is_active: false,
            is_past: false,
        }
    }
}

/// Highlight state of a whole caption at one timestamp.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KaraokeState {
    /// None when the timestamp precedes every word
    pub active_word_index: Option<usize>,
    pub word_progress: f64,
    pub highlighted_words: Vec<WordHighlightState>,
}

/// Scrub-bar half of [`KaraokeState`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WordHighlight {
    pub active_index: Option<usize>,
    pub progress: f64,
}

// =========================
//          Color
// =========================

/// RGBA8 color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(255, 255, 255, 255);

    /// u8 RGBA -> [f32; 4] RGBA (0.0~1.0)
    pub fn to_f32_array(&self) -> [f32; 4] {
        [
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
            self.3 as f32 / 255.0,
        ]
    }

    /// Channel-wise linear blend, `t` clamped to 0..=1.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color(
            mix(self.0, other.0),
            mix(self.1, other.1),
            mix(self.2, other.2),
            mix(self.3, other.3),
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self(0, 0, 0, 255)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.3 == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.0, self.1, self.2, self.3)
        }
    }
}

impl FromStr for Color {
    type Err = EngineError;

    /// `#rgb`, `#rrggbb` or `#rrggbbaa`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::config(format!("invalid color {:?}", s));
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

        match hex.len() {
            3 => {
                let short = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| invalid())
                };
                Ok(Color(short(0)?, short(1)?, short(2)?, 255))
            }
            6 => Ok(Color(channel(0)?, channel(2)?, channel(4)?, 255)),
            8 => Ok(Color(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!("#fff".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!("#FFD400".parse::<Color>().unwrap(), Color(255, 212, 0, 255));
        assert_eq!("#00000080".parse::<Color>().unwrap(), Color(0, 0, 0, 128));
        assert!("FFD400".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
        assert!("#gggggg".parse::<Color>().is_err());
    }

    #[test]
    fn display_round_trips_hex() {
        assert_eq!(Color(255, 212, 0, 255).to_string(), "#ffd400");
        assert_eq!(Color(0, 0, 0, 128).to_string(), "#00000080");
    }

    #[test]
    fn lerp_blends_channels() {
        let mid = Color(0, 0, 0, 255).lerp(Color(200, 100, 50, 255), 0.5);
        assert_eq!(mid, Color(100, 50, 25, 255));
        assert_eq!(Color::WHITE.lerp(Color::default(), 2.0), Color::default());
    }

    #[test]
    fn word_timing_contains_both_ends() {
        let w = WordTiming::new("a", 100.0, 200.0);
        assert!(w.contains(100.0));
        assert!(w.contains(200.0));
        assert!(!w.contains(200.5));
        assert_eq!(w.duration_ms(), 100.0);
    }
}
