use thiserror::Error;

use crate::engine::bridge::text::TextMeasureError;

/// Failures the engine surfaces to the caller.
///
/// A caption that does not fit is not an error; see `FitResult::fitted`.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// The measurement backend could not be created. Fatal, never retried.
    #[error("text measurement unavailable: {0}")]
    MeasurementUnavailable(TextMeasureError),
    #[error("text measurement failed for {text:?}: {source}")]
    Measurement {
        text: String,
        #[source]
        source: TextMeasureError,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl EngineError {
    pub(crate) fn measurement(text: &str, source: TextMeasureError) -> Self {
        Self::Measurement {
            text: text.to_string(),
            source,
        }
    }

    pub(crate) fn config(message: impl std::fmt::Display) -> Self {
        Self::Config(message.to_string())
    }
}
