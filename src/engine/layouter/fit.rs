//! Box-Fitting Search.
//!
//! Starting at the base font size, every attempt walks the ranked line
//! compositions and accepts the first one whose lines fit the panel width and
//! whose stacked height fits the allotted height. When none fits, the font
//! size drops by a fixed step and the compositions are tried again.

use super::compose::get_all_compositions;
use super::types::{FitResult, FitSettings, LineComposition};
use crate::engine::error::EngineError;
use crate::engine::measure::TextMeasure;

/// Largest font size (down to `min_font_size`) at which `text` fits the panel.
///
/// Never fails for text that is too long; that case comes back with
/// `fitted = false` at the smallest size tried.
pub fn fit_text_to_box(
    measure: &TextMeasure,
    text: &str,
    container_width_px: f32,
    settings: &FitSettings,
) -> Result<FitResult, EngineError> {
    let settings = settings.sanitized();
    let panel_width = settings.panel_width(container_width_px);
    let available_width = (panel_width - 2.0 * settings.padding).max(0.0);
    let available_height = settings
        .max_panel_height
        .map(|h| (h - 2.0 * settings.padding).max(0.0));

    let candidates = get_all_compositions(text, settings.max_lines);
    let family = settings.font_family.as_deref();
    let weight = Some(settings.font_weight);

    let mut font_size = settings.base_font_size;
    let mut iterations: u32 = 0;
    let mut overflow_log: Vec<String> = Vec::new();

    loop {
        iterations += 1;
        let mut first_rejection: Option<String> = None;

        for candidate in &candidates {
            let height = stacked_height(candidate, font_size, settings.line_height);
            if let Some(limit) = available_height
                && height > limit
            {
                first_rejection.get_or_insert_with(|| {
                    format!(
                        "{} lines need {:.1}px height, {:.1}px available",
                        candidate.line_count(),
                        height,
                        limit
                    )
                });
                continue;
            }

            let fit = measure.check_lines_fit(
                &candidate.lines,
                available_width,
                font_size,
                family,
                weight,
            )?;
            if fit.fits {
                log::debug!(
                    "fit {:?} at {}px in {} lines after {} attempts",
                    text,
                    font_size,
                    candidate.line_count(),
                    iterations
                );
                return Ok(FitResult {
                    lines: candidate.lines.clone(),
                    font_size,
                    line_count: candidate.line_count(),
                    panel_width,
                    fitted: true,
                    warning: None,
                    iterations,
                    overflow_log,
                });
            }

            if let Some(overflow) = fit.overflow {
                first_rejection.get_or_insert_with(|| {
                    format!(
                        "line {} overflows by {:.1}px ({:.1}px > {:.1}px)",
                        overflow.line_index + 1,
                        overflow.excess,
                        overflow.width,
                        available_width
                    )
                });
            }
        }

        let reason = first_rejection.unwrap_or_else(|| "no composition fits".to_string());
        log::debug!("reject {}px for {:?}: {}", font_size, text, reason);
        overflow_log.push(format!("{}px: {}", font_size, reason));

        let at_minimum = font_size <= settings.min_font_size;
        if at_minimum || iterations >= settings.max_iterations {
            let warning = if at_minimum {
                format!(
                    "text does not fit at minimum font size {}px",
                    settings.min_font_size
                )
            } else {
                format!(
                    "gave up after {} attempts at {}px",
                    iterations, font_size
                )
            };
            log::warn!("{:?}: {}", text, warning);

            let fallback = narrowest_composition(measure, &candidates, font_size, &settings)?;
            return Ok(FitResult {
                line_count: fallback.line_count(),
                lines: fallback.lines.clone(),
                font_size,
                panel_width,
                fitted: false,
                warning: Some(warning),
                iterations,
                overflow_log,
            });
        }

        // 毎回 base から計算する (小数 step の誤差を溜めない)
        font_size = (settings.base_font_size - iterations as f32 * settings.font_size_step)
            .max(settings.min_font_size);
    }
}

fn stacked_height(candidate: &LineComposition, font_size: f32, line_height: f32) -> f32 {
    candidate.line_count() as f32 * font_size * line_height
}

/// Degraded pick: among compositions that respect the height limit (all of
/// them if none does), the one whose widest line is narrowest.
fn narrowest_composition<'a>(
    measure: &TextMeasure,
    candidates: &'a [LineComposition],
    font_size: f32,
    settings: &FitSettings,
) -> Result<&'a LineComposition, EngineError> {
    let available_height = settings
        .max_panel_height
        .map(|h| (h - 2.0 * settings.padding).max(0.0));
    let within_height = |c: &LineComposition| {
        available_height
            .is_none_or(|limit| stacked_height(c, font_size, settings.line_height) <= limit)
    };
    let any_within_height = candidates.iter().any(|c| within_height(c));

    let mut best: Option<(&LineComposition, f32)> = None;
    for candidate in candidates {
        if any_within_height && !within_height(candidate) {
            continue;
        }
        let mut widest: f32 = 0.0;
        for line in &candidate.lines {
            let width = measure.measure_width(
                line,
                font_size,
                settings.font_family.as_deref(),
                settings.font_weight,
            )?;
            widest = widest.max(width);
        }
        if best.is_none_or(|(_, w)| widest < w) {
            best = Some((candidate, widest));
        }
    }

    // 候補は必ず一つ以上ある
    best.map(|(c, _)| c)
        .or_else(|| candidates.first())
        .ok_or_else(|| EngineError::config("no line composition to fall back on"))
}
