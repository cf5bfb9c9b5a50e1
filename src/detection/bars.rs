use crate::config::constants;
use crate::models::{BarLine, LineCandidate};

/// Turn vertical candidates into bar lines sorted by x.
///
/// Candidates shorter than `min_bar_height` are dropped. A candidate whose
/// successor starts less than `DOUBLE_BAR_DISTANCE` px to its right is merged
/// with it (double bar line) and the scan skips both. Only pairs are ever
/// merged: in a run of three close candidates the third stays on its own.
pub fn group_bar_lines(candidates: &[LineCandidate], min_bar_height: u32) -> Vec<BarLine> {
    let mut tall: Vec<LineCandidate> = candidates
        .iter()
        .filter(|c| i64::from(c.height) >= i64::from(min_bar_height))
        .copied()
        .collect();

    tall.sort_by_key(|c| c.x);

    let mut grouped = Vec::with_capacity(tall.len());
    let mut i = 0;
    while i < tall.len() {
        let current = tall[i];

        if let Some(next) = tall.get(i + 1) {
            if next.x - current.x < constants::DOUBLE_BAR_DISTANCE {
                grouped.push(BarLine {
                    x: (current.x + next.x) / 2,
                    y: current.y,
                    width: current.width.max(next.width),
                    height: current.height.max(next.height),
                });
                i += 2;
                continue;
            }
        }

        grouped.push(BarLine::from(current));
        i += 1;
    }

    grouped
}
