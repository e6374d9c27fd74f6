use caption_fit::engine::layouter::score_lines;
use caption_fit::{compose_lines, get_all_compositions};

const HEADLINES: [&str; 6] = [
    "Markets rally after surprise rate cut",
    "  Storm   forces\tevacuations\nalong the coast ",
    "Local team wins",
    "Scientists discover new species in deep ocean trench near Japan",
    "Breaking",
    "A B C D E F G",
];

fn normalized(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[test]
fn one_line_budget_returns_normalized_input() {
    for text in HEADLINES {
        let c = compose_lines(text, 1);
        assert_eq!(c.lines, vec![normalized(text)]);
    }
}

#[test]
fn lines_rejoin_to_normalized_text() {
    for text in HEADLINES {
        for max_lines in 1..=3 {
            for c in get_all_compositions(text, max_lines) {
                assert_eq!(c.joined(), normalized(text), "{:?} / {}", text, max_lines);
            }
        }
    }
}

#[test]
fn rankings_are_sorted_and_match_compose_lines() {
    for text in HEADLINES {
        for max_lines in 1..=3 {
            let all = get_all_compositions(text, max_lines);
            assert!(all.windows(2).all(|w| w[0].score <= w[1].score));
            assert_eq!(all[0].lines, compose_lines(text, max_lines).lines);
            assert!(all.iter().all(|c| c.line_count() <= max_lines));
        }
    }
}

#[test]
fn two_line_budget_considers_every_split() {
    let text = "Markets rally after surprise rate cut";
    let n = text.split_whitespace().count();
    let all = get_all_compositions(text, 2);
    let splits = all.iter().filter(|c| c.line_count() == 2).count();
    assert_eq!(splits, n - 1);
}

fn orphans(lines: &[String]) -> usize {
    lines
        .iter()
        .filter(|l| l.split_whitespace().count() == 1)
        .count()
}

#[test]
fn best_split_avoids_orphans_when_possible() {
    for text in HEADLINES {
        let all = get_all_compositions(text, 2);
        let splits: Vec<_> = all.iter().filter(|c| c.line_count() == 2).collect();
        let Some(best) = splits.first() else {
            continue;
        };
        if splits.iter().any(|c| orphans(&c.lines) == 0) {
            assert_eq!(orphans(&best.lines), 0, "{:?} -> {:?}", text, best.lines);
        }
    }

    let all = get_all_compositions("Markets rally after surprise rate cut", 2);
    let best = all.iter().find(|c| c.line_count() == 2).unwrap();
    assert_eq!(orphans(&best.lines), 0);
}

#[test]
fn every_split_orphaned_still_ranks_the_split() {
    let all = get_all_compositions("Hello world", 2);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].lines, ["Hello world"]);
    assert_eq!(all[1].lines, ["Hello", "world"]);
    assert_eq!(orphans(&all[1].lines), 2);
    assert!(all[1].score > 2000.0);

    // "Local / team wins" and "Local team / wins" each strand one word
    let all = get_all_compositions("Local team wins", 2);
    let splits: Vec<_> = all.iter().filter(|c| c.line_count() == 2).collect();
    assert_eq!(splits.len(), 2);
    assert!(splits.iter().all(|c| orphans(&c.lines) == 1));
    assert!(splits.iter().all(|c| c.score > 1000.0));
}

#[test]
fn three_line_split_is_scored_like_any_other() {
    let all = get_all_compositions("aa bb cc dd ee ff", 3);
    let balanced = all
        .iter()
        .find(|c| c.lines == ["aa bb", "cc dd", "ee ff"])
        .expect("balanced three-line split enumerated");
    assert!((balanced.score - score_lines(&balanced.lines)).abs() < 1e-12);
    assert!((balanced.score - 1.5).abs() < 1e-12);
}
