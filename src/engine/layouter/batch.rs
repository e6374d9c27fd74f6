//! Batch Caption-Set Scaler.
//!
//! Fits every caption of a set independently, then derives one scale factor
//! from the smallest fitted font so the whole set renders at a uniform size.

use super::fit::fit_text_to_box;
use super::types::{CaptionSetMeasurement, FitResult, MeasureCaptionSetInput};
use crate::engine::error::EngineError;
use crate::engine::measure::TextMeasure;

pub fn measure_caption_set(
    measure: &TextMeasure,
    input: &MeasureCaptionSetInput,
) -> Result<CaptionSetMeasurement, EngineError> {
    let mut settings = input.settings.sanitized();
    settings.max_lines = input.layout_mode.max_lines(settings.max_lines);
    let base_font_size = settings.base_font_size;

    let mut individual_results = Vec::with_capacity(input.captions.len());
    let mut smallest: Option<f32> = None;

    for caption in &input.captions {
        // 空のキャプションは最小値の計算に含めない
        if caption.trim().is_empty() {
            individual_results.push(FitResult::blank(
                base_font_size,
                settings.panel_width(input.container_width),
            ));
            continue;
        }

        let result = fit_text_to_box(measure, caption, input.container_width, &settings)?;
        smallest = Some(smallest.map_or(result.font_size, |s| s.min(result.font_size)));
        individual_results.push(result);
    }

    let smallest_font_size = smallest.unwrap_or(base_font_size);
    let global_scale_factor = (smallest_font_size / base_font_size).clamp(f32::MIN_POSITIVE, 1.0);

    let unfitted = individual_results.iter().filter(|r| !r.fitted).count();
    log::info!(
        "caption set: {} captions, smallest {}px, scale {:.3}, {} unfitted",
        individual_results.len(),
        smallest_font_size,
        global_scale_factor,
        unfitted
    );

    Ok(CaptionSetMeasurement {
        global_scale_factor,
        individual_results,
        smallest_font_size,
        base_font_size,
    })
}
