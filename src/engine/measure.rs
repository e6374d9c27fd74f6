//! Text Measurement Adapter.
//!
//! Wraps a [`TextMeasurer`] backend behind the two queries the fitting
//! engine needs. The backend handle is created lazily on first use and then
//! kept for the life of the adapter; callers create one adapter at startup
//! and pass it by reference.

use once_cell::sync::OnceCell;

use crate::engine::bridge::text::{
    FONT_WEIGHT_NORMAL, FontDescription, TextMeasureError, TextMeasurementRequest, TextMeasurer,
};
use crate::engine::error::EngineError;

type BackendFactory =
    Box<dyn Fn() -> Result<Box<dyn TextMeasurer>, TextMeasureError> + Send + Sync>;

/// Owned measurement resource shared by every fitting call.
pub struct TextMeasure {
    // 生成失敗も保持する（再試行しない）
    backend: OnceCell<Result<Box<dyn TextMeasurer>, TextMeasureError>>,
    factory: Option<BackendFactory>,
}

/// First line that did not fit in [`TextMeasure::check_lines_fit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineOverflow {
    pub line_index: usize,
    pub width: f32,
    /// Pixels beyond the available width
    pub excess: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinesFit {
    pub fits: bool,
    /// Widest line among those examined
    pub max_width: f32,
    pub overflow: Option<LineOverflow>,
}

impl TextMeasure {
    /// Adapter over an already created backend.
    pub fn with_backend<M: TextMeasurer + 'static>(measurer: M) -> Self {
        let backend: Box<dyn TextMeasurer> = Box::new(measurer);
        Self {
            backend: OnceCell::with_value(Ok(backend)),
            factory: None,
        }
    }

    /// Adapter that creates its backend on first use.
    ///
    /// The factory runs at most once. If it fails, every query returns
    /// [`EngineError::MeasurementUnavailable`].
    pub fn lazy<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn TextMeasurer>, TextMeasureError> + Send + Sync + 'static,
    {
        Self {
            backend: OnceCell::new(),
            factory: Some(Box::new(factory)),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.backend.get().is_some()
    }

    fn backend(&self) -> Result<&dyn TextMeasurer, EngineError> {
        let slot = self.backend.get_or_init(|| match &self.factory {
            Some(factory) => {
                log::debug!("creating text measurement backend");
                let created = factory();
                if let Err(e) = &created {
                    log::error!("text measurement backend unavailable: {}", e);
                }
                created
            }
            None => Err(TextMeasureError::BackendUnavailable(
                "no backend factory configured".to_string(),
            )),
        });

        match slot {
            Ok(backend) => Ok(backend.as_ref()),
            Err(e) => Err(EngineError::MeasurementUnavailable(e.clone())),
        }
    }

    /// Pixel width of `text` rendered on one line.
    pub fn measure_width(
        &self,
        text: &str,
        font_size_px: f32,
        font_family: Option<&str>,
        font_weight: u16,
    ) -> Result<f32, EngineError> {
        let backend = self.backend()?;
        let req = TextMeasurementRequest {
            text: text.to_string(),
            font: FontDescription::new(font_family, font_weight, font_size_px),
        };
        backend
            .measure(&req)
            .map(|m| m.width)
            .map_err(|e| EngineError::measurement(text, e))
    }

    /// Checks every line against `available_width_px`, stopping at the first
    /// line that overflows.
    pub fn check_lines_fit<S: AsRef<str>>(
        &self,
        lines: &[S],
        available_width_px: f32,
        font_size_px: f32,
        font_family: Option<&str>,
        font_weight: Option<u16>,
    ) -> Result<LinesFit, EngineError> {
        let weight = font_weight.unwrap_or(FONT_WEIGHT_NORMAL);
        let mut max_width: f32 = 0.0;

        for (line_index, line) in lines.iter().enumerate() {
            let width = self.measure_width(line.as_ref(), font_size_px, font_family, weight)?;
            max_width = max_width.max(width);
            if width > available_width_px {
                return Ok(LinesFit {
                    fits: false,
                    max_width,
                    overflow: Some(LineOverflow {
                        line_index,
                        width,
                        excess: width - available_width_px,
                    }),
                });
            }
        }

        Ok(LinesFit {
            fits: true,
            max_width,
            overflow: None,
        })
    }
}

impl std::fmt::Debug for TextMeasure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextMeasure")
            .field("initialized", &self.is_initialized())
            .field("lazy", &self.factory.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::bridge::text::{FallbackTextMeasurer, TextMeasurement};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records how many lines were measured.
    struct CountingMeasurer {
        calls: Arc<AtomicUsize>,
    }

    impl TextMeasurer for CountingMeasurer {
        fn measure(
            &self,
            req: &TextMeasurementRequest,
        ) -> Result<TextMeasurement, TextMeasureError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            FallbackTextMeasurer::default().measure(req)
        }
    }

    #[test]
    fn lazy_factory_runs_once() {
        let created = Arc::new(AtomicUsize::new(0));
        let counter = created.clone();
        let measure = TextMeasure::lazy(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(FallbackTextMeasurer::default()) as Box<dyn TextMeasurer>)
        });

        assert!(!measure.is_initialized());
        measure.measure_width("a", 10.0, None, 400).unwrap();
        measure.measure_width("b", 10.0, None, 400).unwrap();
        assert!(measure.is_initialized());
        assert_eq!(created.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn backend_failure_is_sticky() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();
        let measure = TextMeasure::lazy(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(TextMeasureError::BackendUnavailable("no fonts".to_string()))
        });

        for _ in 0..3 {
            let err = measure.measure_width("a", 10.0, None, 400).unwrap_err();
            assert!(matches!(err, EngineError::MeasurementUnavailable(_)));
        }
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn check_lines_fit_stops_at_first_overflow() {
        let calls = Arc::new(AtomicUsize::new(0));
        let measure = TextMeasure::with_backend(CountingMeasurer {
            calls: calls.clone(),
        });

        // 10px font, ratio 0.5 -> 5px per char
        let lines = ["abcd", "abcdefghij", "ab"];
        let fit = measure
            .check_lines_fit(&lines, 30.0, 10.0, None, None)
            .unwrap();

        assert!(!fit.fits);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!((fit.max_width - 50.0).abs() < 1e-4);
        let overflow = fit.overflow.expect("overflow recorded");
        assert_eq!(overflow.line_index, 1);
        assert!((overflow.excess - 20.0).abs() < 1e-4);
    }

    #[test]
    fn check_lines_fit_reports_widest_line() {
        let measure = TextMeasure::with_backend(FallbackTextMeasurer::default());
        let lines = vec!["abc".to_string(), "abcdef".to_string()];
        let fit = measure
            .check_lines_fit(&lines, 100.0, 10.0, Some("Inter"), Some(400))
            .unwrap();

        assert!(fit.fits);
        assert!(fit.overflow.is_none());
        assert!((fit.max_width - 30.0).abs() < 1e-4);
    }
}
