use serde::Deserialize;

use crate::engine::bridge::text::FONT_WEIGHT_NORMAL;

/// Largest `max_lines` any call site asks for.
pub const MAX_LINES_LIMIT: usize = 5;

pub const DEFAULT_FONT_SIZE_STEP: f32 = 1.0;
pub const DEFAULT_MAX_ITERATIONS: u32 = 50;

// =========================
//      LineComposition
// =========================

/// One way of splitting a caption across lines.
///
/// `score` is a unitless cost (lower is better) used only for ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct LineComposition {
    pub lines: Vec<String>,
    pub score: f64,
}

impl LineComposition {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Lines joined back with single spaces.
    pub fn joined(&self) -> String {
        self.lines.join(" ")
    }
}

// =========================
//        FitSettings
// =========================

/// Box constraints for one fit call. The engine never mutates these.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FitSettings {
    pub max_lines: usize,
    /// Share of the container width available to the panel (0..=100)
    pub panel_max_width_percent: f32,
    pub base_font_size: f32,
    pub min_font_size: f32,
    /// Inner padding on each side of the panel
    pub padding: f32,
    /// Line height as a multiple of the font size
    pub line_height: f32,
    pub font_family: Option<String>,
    pub font_weight: u16,
    /// Allotted panel height (None = unconstrained)
    pub max_panel_height: Option<f32>,
    /// Decrement applied after every rejected attempt
    pub font_size_step: f32,
    pub max_iterations: u32,
}

impl Default for FitSettings {
    fn default() -> Self {
        Self {
            max_lines: 2,
            panel_max_width_percent: 90.0,
            base_font_size: 48.0,
            min_font_size: 16.0,
            padding: 16.0,
            line_height: 1.2,
            font_family: None,
            font_weight: FONT_WEIGHT_NORMAL,
            max_panel_height: None,
            font_size_step: DEFAULT_FONT_SIZE_STEP,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl FitSettings {
    /// Copy with every field forced into a usable range.
    pub fn sanitized(&self) -> Self {
        let min_font_size = if self.min_font_size.is_finite() {
            self.min_font_size.max(1.0)
        } else {
            1.0
        };
        let base_font_size = if self.base_font_size.is_finite() {
            self.base_font_size.max(min_font_size)
        } else {
            min_font_size
        };
        let font_size_step = if self.font_size_step.is_finite() && self.font_size_step > 0.0 {
            self.font_size_step
        } else {
            DEFAULT_FONT_SIZE_STEP
        };

        Self {
            max_lines: self.max_lines.clamp(1, MAX_LINES_LIMIT),
            panel_max_width_percent: self.panel_max_width_percent.clamp(0.0, 100.0),
            base_font_size,
            min_font_size,
            padding: self.padding.max(0.0),
            line_height: self.line_height.max(0.0),
            font_family: self.font_family.clone(),
            font_weight: self.font_weight,
            max_panel_height: self.max_panel_height,
            font_size_step,
            max_iterations: self.max_iterations.max(1),
        }
    }

    /// `container_width × panel_max_width_percent / 100`
    pub fn panel_width(&self, container_width_px: f32) -> f32 {
        (container_width_px * self.panel_max_width_percent / 100.0).max(0.0)
    }
}

// =========================
//         FitResult
// =========================

#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    pub lines: Vec<String>,
    pub font_size: f32,
    pub line_count: usize,
    pub panel_width: f32,
    /// false = the search bottomed out without satisfying the box
    pub fitted: bool,
    pub warning: Option<String>,
    pub iterations: u32,
    /// One entry per rejected attempt
    pub overflow_log: Vec<String>,
}

impl FitResult {
    /// Result for a blank caption: nothing to measure, always fits.
    pub(crate) fn blank(font_size: f32, panel_width: f32) -> Self {
        Self {
            lines: Vec::new(),
            font_size,
            line_count: 0,
            panel_width,
            fitted: true,
            warning: None,
            iterations: 0,
            overflow_log: Vec::new(),
        }
    }
}

// =========================
//        Caption sets
// =========================

/// Line budget used when composing every caption of a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    SingleLine,
    TwoLines,
    ThreeLines,
    /// Use `FitSettings::max_lines`
    #[default]
    Auto,
}

impl LayoutMode {
    pub fn max_lines(self, configured: usize) -> usize {
        match self {
            LayoutMode::SingleLine => 1,
            LayoutMode::TwoLines => 2,
            LayoutMode::ThreeLines => 3,
            LayoutMode::Auto => configured,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MeasureCaptionSetInput {
    pub captions: Vec<String>,
    pub container_width: f32,
    #[serde(default)]
    pub settings: FitSettings,
    #[serde(default)]
    pub layout_mode: LayoutMode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaptionSetMeasurement {
    /// `smallest_font_size / base_font_size`, in (0, 1]
    pub global_scale_factor: f32,
    pub individual_results: Vec<FitResult>,
    pub smallest_font_size: f32,
    pub base_font_size: f32,
}

impl CaptionSetMeasurement {
    /// Font size every caption of the set should be rendered at.
    ///
    /// `global_scale_factor × base_font_size`, taken from the stored minimum
    /// so that f32 rounding in the quotient never shifts it.
    pub fn scaled_font_size(&self) -> f32 {
        self.smallest_font_size
    }
}
