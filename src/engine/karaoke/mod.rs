//! Word-level karaoke highlighting.
//!
//! ```text
//! WordTiming[] + clock → highlight → WordHighlightState[] → style → StyleDelta
//! ```

pub mod highlight;
pub mod style;
pub mod types;

pub use highlight::{DEFAULT_TRANSITION_MS, compute_karaoke_state, get_word_highlight_at_time};
pub use style::{KaraokeStyle, KaraokeStyleConfig, StyleDelta, resolve_karaoke_style};
pub use types::{Color, KaraokeState, WordHighlight, WordHighlightState, WordTiming};
