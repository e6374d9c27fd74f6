//! Caption layout: line composition, box fitting and caption-set scaling.
//!
//! ```text
//! text → compose → fit (per caption) → batch (per set)
//! ```

pub mod batch;
pub mod compose;
pub mod fit;
pub mod types;

pub use batch::measure_caption_set;
pub use compose::{compose_lines, get_all_compositions, score_lines};
pub use fit::fit_text_to_box;
pub use types::{
    CaptionSetMeasurement, FitResult, FitSettings, LayoutMode, LineComposition,
    MeasureCaptionSetInput,
};
