use image::GrayImage;

use crate::config::constants;
use crate::detection::contours::find_line_candidates;
use crate::detection::morphology::{self, StructuringElement};
use crate::error::Result;
use crate::models::LineCandidate;

/// Opened mask plus the components found in it
#[derive(Debug, Clone)]
pub struct LineExtraction {
    pub opened: GrayImage,
    pub candidates: Vec<LineCandidate>,
}

/// Isolate strokes aligned with `element` and box each one.
/// No size filtering happens here.
pub fn extract_lines(
    mask: &GrayImage,
    element: StructuringElement,
    iterations: u32,
) -> Result<LineExtraction> {
    let opened = morphology::open(mask, element, iterations)?;
    let candidates = find_line_candidates(&opened);
    Ok(LineExtraction { opened, candidates })
}

/// Bar-line candidates: element is 1 px wide and `min_bar_height` tall
pub fn extract_vertical_lines(mask: &GrayImage, min_bar_height: u32) -> Result<LineExtraction> {
    extract_lines(
        mask,
        StructuringElement::vertical(min_bar_height),
        constants::OPENING_ITERATIONS,
    )
}

/// Staff-line candidates: element is wide enough to bridge small gaps
/// in degraded staff lines
pub fn extract_horizontal_lines(mask: &GrayImage) -> Result<LineExtraction> {
    let (width, height) = constants::HORIZONTAL_KERNEL;
    extract_lines(
        mask,
        StructuringElement::new(width, height),
        constants::OPENING_ITERATIONS,
    )
}
