use crate::config::constants;
use crate::models::{LineCandidate, StaffSystem};

/// Cluster horizontal candidates into padded staff systems, top to bottom.
pub fn build_staff_systems(candidates: &[LineCandidate], image_width: u32) -> Vec<StaffSystem> {
    let min_width = image_width as f64 * constants::STAFF_MIN_WIDTH_RATIO;

    let mut line_ys: Vec<i32> = candidates
        .iter()
        .filter(|c| c.width as f64 > min_width)
        .map(|c| c.y)
        .collect();
    line_ys.sort_unstable();

    cluster_staff_lines(&line_ys)
}

/// Group sorted staff-line y coordinates. Starting at each unconsumed line,
/// take following lines while the gap stays under `STAFF_LINE_GAP`, up to
/// `STAFF_MAX_LINES`. Groups of at least `STAFF_MIN_LINES` become a system;
/// otherwise the starting line is skipped.
pub fn cluster_staff_lines(line_ys: &[i32]) -> Vec<StaffSystem> {
    let mut systems = Vec::new();
    let mut i = 0;

    while i < line_ys.len() {
        let mut j = i + 1;
        while j < line_ys.len()
            && j < i + constants::STAFF_MAX_LINES
            && line_ys[j] - line_ys[j - 1] < constants::STAFF_LINE_GAP
        {
            j += 1;
        }

        if j - i >= constants::STAFF_MIN_LINES {
            let first = line_ys[i];
            let last = line_ys[j - 1];
            systems.push(StaffSystem {
                y: first - constants::STAFF_PADDING,
                height: last - first + 2 * constants::STAFF_PADDING,
            });
            i = j;
        } else {
            i += 1;
        }
    }

    systems
}
