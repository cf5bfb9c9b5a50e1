pub mod preprocessing;
pub mod morphology;
pub mod contours;
pub mod lines;
pub mod bars;
pub mod staff;
pub mod measures;

use image::{DynamicImage, GrayImage};
use serde::Serialize;

use crate::config::DetectionParams;
use crate::error::Result;
use crate::models::{BarLine, LineCandidate, Measure, StaffSystem};
use preprocessing::BinarizeMode;

/// Every intermediate product of one detection run
#[derive(Debug, Clone)]
pub struct Analysis {
    pub width: u32,
    pub height: u32,
    /// Adaptive-threshold mask feeding bar detection
    pub adaptive_mask: GrayImage,
    pub vertical_lines: GrayImage,
    /// Fixed-threshold mask feeding staff detection
    pub fixed_mask: GrayImage,
    pub horizontal_lines: GrayImage,
    pub vertical_candidates: Vec<LineCandidate>,
    pub horizontal_candidates: Vec<LineCandidate>,
    pub bar_lines: Vec<BarLine>,
    pub staff_systems: Vec<StaffSystem>,
    pub measures: Vec<Measure>,
}

/// How much a caller should trust a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Medium,
}

/// Detection algorithms available to the advanced variant. Only the
/// morphological pipeline exists today; line-transform, template matching
/// or learned detectors would be added here and their results combined
/// in `MeasureDetector::detect_advanced`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    MorphologicalOperations,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvancedDetection {
    pub measures: Vec<Measure>,
    pub confidence: Confidence,
    pub algorithm: Algorithm,
}

impl AdvancedDetection {
    /// Label measures produced by the morphological pipeline
    pub fn from_measures(measures: Vec<Measure>) -> Self {
        Self {
            measures,
            confidence: Confidence::Medium,
            algorithm: Algorithm::MorphologicalOperations,
        }
    }
}

/// Measure detector for one rendered page
#[derive(Debug, Clone, Default)]
pub struct MeasureDetector {
    pub params: DetectionParams,
}

impl MeasureDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(mut self, params: DetectionParams) -> Self {
        self.params = params;
        self
    }

    /// Run the full pipeline and return the numbered measures
    pub fn detect(&self, img: &DynamicImage) -> Result<Vec<Measure>> {
        Ok(self.analyze(img)?.measures)
    }

    /// Run the pipeline keeping every intermediate mask and sequence
    pub fn analyze(&self, img: &DynamicImage) -> Result<Analysis> {
        self.params.validate()?;

        log::debug!("Converting {}x{} page to grayscale", img.width(), img.height());
        let gray = preprocessing::to_grayscale(img);
        preprocessing::ensure_non_empty(&gray)?;
        let (width, height) = gray.dimensions();

        // Bar lines
        let adaptive_mask = preprocessing::binarize(&gray, BinarizeMode::adaptive())?;
        let vertical = lines::extract_vertical_lines(&adaptive_mask, self.params.min_bar_height)?;
        log::debug!("Found {} vertical line candidates", vertical.candidates.len());

        let bar_lines = bars::group_bar_lines(&vertical.candidates, self.params.min_bar_height);
        log::debug!("Grouped into {} bar lines", bar_lines.len());

        // Staff systems
        let fixed_mask = preprocessing::binarize(&gray, BinarizeMode::fixed())?;
        let horizontal = lines::extract_horizontal_lines(&fixed_mask)?;
        log::debug!("Found {} horizontal line candidates", horizontal.candidates.len());

        let staff_systems = staff::build_staff_systems(&horizontal.candidates, width);
        log::debug!("Clustered into {} staff systems", staff_systems.len());

        let measures = measures::assemble_measures(&bar_lines, &staff_systems, self.params.min_bar_width);
        log::info!(
            "Detected {} measures from {} bar lines on {}x{} page",
            measures.len(),
            bar_lines.len(),
            width,
            height
        );

        Ok(Analysis {
            width,
            height,
            adaptive_mask,
            vertical_lines: vertical.opened,
            fixed_mask,
            horizontal_lines: horizontal.opened,
            vertical_candidates: vertical.candidates,
            horizontal_candidates: horizontal.candidates,
            bar_lines,
            staff_systems,
            measures,
        })
    }

    /// Run every available algorithm and label the combined result
    pub fn detect_advanced(&self, img: &DynamicImage) -> Result<AdvancedDetection> {
        Ok(AdvancedDetection::from_measures(self.detect(img)?))
    }
}

/// Detect numbered measures on a page image
pub fn detect_measures(img: &DynamicImage, min_bar_width: u32, min_bar_height: u32) -> Result<Vec<Measure>> {
    let params = DetectionParams::new()
        .with_min_bar_width(min_bar_width)
        .with_min_bar_height(min_bar_height);
    MeasureDetector::new().with_params(params).detect(img)
}

/// Detect staff systems on a grayscale page image
pub fn detect_staff_systems(gray: &GrayImage) -> Result<Vec<StaffSystem>> {
    let mask = preprocessing::binarize(gray, BinarizeMode::fixed())?;
    let horizontal = lines::extract_horizontal_lines(&mask)?;
    Ok(staff::build_staff_systems(&horizontal.candidates, gray.width()))
}
