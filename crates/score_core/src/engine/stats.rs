//! Derived display statistics
//!
//! Pure functions over accumulated totals. Nothing here is stored on a
//! `MatchResult`; every value is recomputed on read.

use std::collections::HashMap;

/// Number of glyphs in a progress bar
pub const PROGRESS_BAR_LEN: u32 = 10;
pub const FILLED_GLYPH: char = '█';
pub const EMPTY_GLYPH: char = '░';

/// Home share of a two-sided total, in percent. 50 when both are zero.
pub fn share_percent(home: f64, away: f64) -> f64 {
    let total = home + away;
    if total == 0.0 {
        50.0
    } else {
        home / total * 100.0
    }
}

/// 10-glyph bar; glyph `i` (1-based) is filled iff `percent >= i * 10`.
pub fn build_progress_bar(percent: f64) -> String {
    (1..=PROGRESS_BAR_LEN)
        .map(|i| {
            if percent >= (i * 10) as f64 {
                FILLED_GLYPH
            } else {
                EMPTY_GLYPH
            }
        })
        .collect()
}

/// Every minute rendered as `<minute>', ` including the last one.
pub fn goal_log(minutes: &[u32]) -> String {
    minutes.iter().map(|m| format!("{}', ", m)).collect()
}

/// The `n` most frequent minutes, sorted ascending.
///
/// Equal counts keep first-seen order when choosing which minutes survive
/// the cut.
pub fn top_goal_periods(minutes: &[u32], n: usize) -> Vec<u32> {
    let mut index: HashMap<u32, usize> = HashMap::new();
    let mut counts: Vec<(u32, usize)> = Vec::new();

    for &minute in minutes {
        match index.get(&minute) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(minute, counts.len());
                counts.push((minute, 1));
            }
        }
    }

    // stable: ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let mut top: Vec<u32> = counts.into_iter().take(n).map(|(minute, _)| minute).collect();
    top.sort_unstable();
    top
}
