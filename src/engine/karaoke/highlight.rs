//! Karaoke Highlight Calculator.
//!
//! Every query is a pure function of `(words, current_time_ms)`; nothing is
//! retained between render ticks.

use super::types::{KaraokeState, WordHighlight, WordHighlightState, WordTiming};

/// Pre-highlight ramp before a word becomes active.
pub const DEFAULT_TRANSITION_MS: f64 = 80.0;

/// Per-word highlight state plus the active word at `current_time_ms`.
pub fn compute_karaoke_state(
    words: &[WordTiming],
    current_time_ms: f64,
    transition_ms: f64,
) -> KaraokeState {
    if words.is_empty() {
        return KaraokeState::default();
    }

    let containing = first_containing(words, current_time_ms);
    let highlighted_words = words
        .iter()
        .enumerate()
        .map(|(index, word)| word_state(index, word, current_time_ms, transition_ms, containing))
        .collect();
    let highlight = resolve_active(words, current_time_ms, containing);

    KaraokeState {
        active_word_index: highlight.active_index,
        word_progress: highlight.progress,
        highlighted_words,
    }
}

/// Active index and progress only, without building the per-word states.
pub fn get_word_highlight_at_time(words: &[WordTiming], current_time_ms: f64) -> WordHighlight {
    if words.is_empty() {
        return WordHighlight::default();
    }
    resolve_active(
        words,
        current_time_ms,
        first_containing(words, current_time_ms),
    )
}

/// Overlapping intervals resolve to the first match.
fn first_containing(words: &[WordTiming], time_ms: f64) -> Option<usize> {
    words.iter().position(|w| w.contains(time_ms))
}

/// Elapsed share of the word's interval; zero-length words count as complete.
fn interval_progress(word: &WordTiming, time_ms: f64) -> f64 {
    let duration = word.duration_ms();
    if duration <= 0.0 {
        return 1.0;
    }
    (time_ms - word.start_ms) / duration
}

fn word_state(
    index: usize,
    word: &WordTiming,
    time_ms: f64,
    transition_ms: f64,
    containing: Option<usize>,
) -> WordHighlightState {
    let mut state = WordHighlightState::idle(index);

    if time_ms > word.end_ms {
        state.is_past = true;
        state.progress = 1.0;
    } else if word.start_ms <= time_ms {
        state.is_active = containing == Some(index);
        state.progress = interval_progress(word, time_ms);
    } else if transition_ms > 0.0 && time_ms > word.start_ms - transition_ms {
        let ramp_start = word.start_ms - transition_ms;
        state.progress = (time_ms - ramp_start) / transition_ms;
    }

    state.progress = clamp_progress(state.progress);
    state
}

fn resolve_active(words: &[WordTiming], time_ms: f64, containing: Option<usize>) -> WordHighlight {
    if let Some(index) = containing {
        return WordHighlight {
            active_index: Some(index),
            progress: clamp_progress(interval_progress(&words[index], time_ms)),
        };
    }

    // 直近に終わった単語（どの単語よりも前なら None）
    if let Some(next) = words.iter().position(|w| w.start_ms > time_ms) {
        return match next.checked_sub(1) {
            Some(index) => WordHighlight {
                active_index: Some(index),
                progress: 1.0,
            },
            None => WordHighlight {
                active_index: None,
                progress: 0.0,
            },
        };
    }

    WordHighlight {
        active_index: Some(words.len() - 1),
        progress: 1.0,
    }
}

fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 1.0)
}
