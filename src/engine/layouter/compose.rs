//! Line Composition Optimizer.
//!
//! Enumerates every candidate line split of a caption up front, then scores
//! each candidate as a whole. The score needs global comparisons across all
//! lines of a candidate (longest vs shortest, variance), so candidates are
//! materialized before scoring.

use super::types::LineComposition;

const ORPHAN_PENALTY: f64 = 1000.0;
const IMBALANCE_WEIGHT: f64 = 2.0;
const LINE_COUNT_WEIGHT: f64 = 0.5;

/// Best-scoring composition of `text` in at most `max_lines` lines.
pub fn compose_lines(text: &str, max_lines: usize) -> LineComposition {
    match trivial_composition(text, max_lines) {
        Some(single) => single,
        None => rank(enumerate(text, max_lines))
            .into_iter()
            .next()
            .unwrap_or_else(|| unsplit(text)),
    }
}

/// Every candidate composition, sorted ascending by score.
///
/// Ties keep enumeration order: the unsplit line, then two-line splits,
/// then three-line splits.
pub fn get_all_compositions(text: &str, max_lines: usize) -> Vec<LineComposition> {
    match trivial_composition(text, max_lines) {
        Some(single) => vec![single],
        None => rank(enumerate(text, max_lines)),
    }
}

/// Readability cost of a set of lines.
///
/// `1000 × orphans + 2 × (longest − shortest) + stddev(lengths) + 0.5 × lines`,
/// where an orphan is a line holding exactly one word and lengths are in characters.
pub fn score_lines<S: AsRef<str>>(lines: &[S]) -> f64 {
    if lines.is_empty() {
        return 0.0;
    }

    let lengths: Vec<f64> = lines
        .iter()
        .map(|l| l.as_ref().chars().count() as f64)
        .collect();
    let orphans = lines
        .iter()
        .filter(|l| l.as_ref().split_whitespace().count() == 1)
        .count() as f64;

    let longest = lengths.iter().cloned().fold(f64::MIN, f64::max);
    let shortest = lengths.iter().cloned().fold(f64::MAX, f64::min);

    let n = lengths.len() as f64;
    let mean = lengths.iter().sum::<f64>() / n;
    let variance = lengths.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / n;

    ORPHAN_PENALTY * orphans
        + IMBALANCE_WEIGHT * (longest - shortest)
        + variance.sqrt()
        + LINE_COUNT_WEIGHT * n
}

/// Empty text, a single word, or a one-line budget need no search.
fn trivial_composition(text: &str, max_lines: usize) -> Option<LineComposition> {
    let words: Vec<&str> = text.split_whitespace().collect();

    if words.len() <= 1 || max_lines <= 1 {
        return Some(LineComposition {
            lines: vec![words.join(" ")],
            score: 0.0,
        });
    }
    None
}

fn unsplit(text: &str) -> LineComposition {
    let lines = vec![text.split_whitespace().collect::<Vec<_>>().join(" ")];
    let score = score_lines(&lines);
    LineComposition { lines, score }
}

/// Candidate arena: every line split allowed by `max_lines`.
fn enumerate(text: &str, max_lines: usize) -> Vec<Vec<String>> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let n = words.len();
    let join = |range: &[&str]| range.join(" ");

    let mut candidates: Vec<Vec<String>> = Vec::new();

    // 分割しない一行は常に候補に入れる
    candidates.push(vec![join(&words[..])]);

    if max_lines >= 2 {
        for i in 1..n {
            candidates.push(vec![join(&words[..i]), join(&words[i..])]);
        }
    }

    if max_lines >= 3 {
        for i in 1..n {
            for j in (i + 1)..n {
                candidates.push(vec![
                    join(&words[..i]),
                    join(&words[i..j]),
                    join(&words[j..]),
                ]);
            }
        }
    }

    candidates
}

/// Scores every candidate and sorts them; the sort is stable so ties stay
/// in enumeration order.
fn rank(candidates: Vec<Vec<String>>) -> Vec<LineComposition> {
    let mut scored: Vec<LineComposition> = candidates
        .into_iter()
        .map(|lines| {
            let score = score_lines(&lines);
            LineComposition { lines, score }
        })
        .collect();

    scored.sort_by(|a, b| a.score.total_cmp(&b.score));
    scored
}
