//! Text measurement abstraction for caption fitting.
//!
//! # Overview
//!
//! This module defines the interface between the fitting engine and
//! platform-specific text measurement implementations.
//!
//! It does **not** own or define visual caption styles.
//! Instead, it consumes already-resolved font attributes provided
//! by the caller's style configuration.
//!
//! # Responsibilities
//!
//! - Accept a single line of text and a font description
//! - Measure its intrinsic size (width, height, baseline)
//! - Provide a backend-agnostic text measurement abstraction
//!
//! # Non-Responsibilities
//!
//! - Line breaking (see `engine::layouter::compose`)
//! - Glyph rasterization or draw command generation
//!
//! # Data Flow
//!
//! ```text
//! FitSettings → TextMeasure → TextMeasurer → TextMeasurement
//! ```

use thiserror::Error;

/* ============================
 * Measure Request
 * ============================ */

/// Regular (CSS `normal`) weight.
pub const FONT_WEIGHT_NORMAL: u16 = 400;

#[derive(Debug, Clone, PartialEq)]
pub struct FontDescription {
    /// Font family name (None = backend default)
    pub family: Option<String>,

    /// CSS-style numeric weight (100..=900)
    pub weight: u16,

    /// Font size in pixels
    pub size_px: f32,
}

impl FontDescription {
    pub fn new(family: Option<&str>, weight: u16, size_px: f32) -> Self {
        Self {
            family: family.map(str::to_string),
            weight,
            size_px,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextMeasurementRequest {
    /// Single line of UTF-8 text
    pub text: String,

    pub font: FontDescription,
}

/* ============================
 * Measure Result
 * ============================ */

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMeasurement {
    /// Advance width of the whole line
    pub width: f32,

    /// Line box height
    pub height: f32,

    /// Baseline position from top
    pub baseline: f32,
}

/* ============================
 * Errors
 * ============================ */

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TextMeasureError {
    #[error("font not found: {0}")]
    FontNotFound(String),
    #[error("font load error: {0}")]
    FontLoad(String),
    #[error("no text measurement backend available: {0}")]
    BackendUnavailable(String),
    #[error("internal error: {0}")]
    Internal(String),
}

/* ============================
 * Trait
 * ============================ */

pub trait TextMeasurer: Send + Sync {
    fn measure(&self, req: &TextMeasurementRequest) -> Result<TextMeasurement, TextMeasureError>;
}

/* ============================
 * Fallback
 * ============================ */

pub mod fallback;
pub use fallback::FallbackTextMeasurer;
