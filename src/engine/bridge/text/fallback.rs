use super::{
    FONT_WEIGHT_NORMAL, TextMeasureError, TextMeasurement, TextMeasurementRequest, TextMeasurer,
};

/// Fallback text measurer.
///
/// This implementation does not rely on any font engine.
/// It uses a simple heuristic based on font size and character count.
/// Intended for testing, bring-up, and environments without font support.
#[derive(Debug, Clone)]
pub struct FallbackTextMeasurer {
    /// Average advance of one character, relative to the font size
    pub avg_char_width_ratio: f32,
    /// Extra width per 100 units of weight above regular
    pub weight_widening: f32,
}

impl Default for FallbackTextMeasurer {
    fn default() -> Self {
        Self {
            avg_char_width_ratio: 0.5,
            weight_widening: 0.02,
        }
    }
}

impl FallbackTextMeasurer {
    fn weight_factor(&self, weight: u16) -> f32 {
        let steps = (weight as f32 - FONT_WEIGHT_NORMAL as f32) / 100.0;
        (1.0 + steps * self.weight_widening).max(0.5)
    }
}

impl TextMeasurer for FallbackTextMeasurer {
    fn measure(&self, req: &TextMeasurementRequest) -> Result<TextMeasurement, TextMeasureError> {
        let font_size = req.font.size_px.max(1.0);

        // Heuristic constants
        let char_width = font_size * self.avg_char_width_ratio * self.weight_factor(req.font.weight);
        let line_height = font_size * 1.2;

        let width = req.text.chars().count() as f32 * char_width;

        Ok(TextMeasurement {
            width,
            height: line_height,
            baseline: font_size * 0.8,
        })
    }
}
