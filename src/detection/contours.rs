use image::{GrayImage, Luma};
use imageproc::region_labelling::{connected_components, Connectivity};
use std::collections::BTreeMap;

use crate::detection::preprocessing::BACKGROUND;
use crate::models::LineCandidate;

/// Bounding boxes of the 8-connected foreground components of a mask,
/// in label (raster discovery) order
pub fn find_line_candidates(mask: &GrayImage) -> Vec<LineCandidate> {
    let labeled = connected_components(mask, Connectivity::Eight, Luma([BACKGROUND]));

    // label -> (min_x, min_y, max_x, max_y)
    let mut regions: BTreeMap<u32, (u32, u32, u32, u32)> = BTreeMap::new();

    for (x, y, label) in labeled.enumerate_pixels() {
        let label_val = label[0];
        if label_val == 0 {
            continue; // Skip background
        }

        regions
            .entry(label_val)
            .and_modify(|(min_x, min_y, max_x, max_y)| {
                *min_x = (*min_x).min(x);
                *min_y = (*min_y).min(y);
                *max_x = (*max_x).max(x);
                *max_y = (*max_y).max(y);
            })
            .or_insert((x, y, x, y));
    }

    regions
        .into_values()
        .map(|(min_x, min_y, max_x, max_y)| LineCandidate::from_extent(min_x, min_y, max_x, max_y))
        .collect()
}
