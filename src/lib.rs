pub mod config;
pub mod engine;
pub mod platform;

pub use config::EngineConfig;
pub use engine::error::EngineError;
pub use engine::karaoke::{
    DEFAULT_TRANSITION_MS, KaraokeState, KaraokeStyle, KaraokeStyleConfig, StyleDelta,
    WordHighlight, WordHighlightState, WordTiming, compute_karaoke_state,
    get_word_highlight_at_time, resolve_karaoke_style,
};
pub use engine::layouter::{
    CaptionSetMeasurement, FitResult, FitSettings, LayoutMode, LineComposition,
    MeasureCaptionSetInput, compose_lines, fit_text_to_box, get_all_compositions,
    measure_caption_set,
};
pub use engine::measure::{LineOverflow, LinesFit, TextMeasure};
