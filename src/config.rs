use serde::{Deserialize, Serialize};

use crate::error::{DetectionError, Result};

/// Fixed tuning values shared by every detection run. Consumers compare
/// measure coordinates across runs, so these must not drift.
pub mod constants {
    /// Side of the Gaussian window used by the adaptive threshold
    pub const ADAPTIVE_BLOCK_SIZE: u32 = 15;
    /// Subtracted from the local weighted mean
    pub const ADAPTIVE_C: i32 = 10;
    /// Global threshold for staff-line binarization
    pub const FIXED_THRESHOLD: u8 = 127;

    pub const OPENING_ITERATIONS: u32 = 2;
    /// Structuring element (width, height) for staff lines
    pub const HORIZONTAL_KERNEL: (u32, u32) = (40, 1);

    /// Bar candidates closer than this are one double bar line
    pub const DOUBLE_BAR_DISTANCE: i32 = 20;

    /// Consecutive staff lines must be closer than this
    pub const STAFF_LINE_GAP: i32 = 30;
    pub const STAFF_MAX_LINES: usize = 5;
    pub const STAFF_MIN_LINES: usize = 3;
    /// Added above the first and below the last line of a staff
    pub const STAFF_PADDING: i32 = 20;
    /// Staff lines must be wider than this fraction of the page
    pub const STAFF_MIN_WIDTH_RATIO: f64 = 0.5;

    pub const DEFAULT_MIN_BAR_WIDTH: u32 = 50;
    pub const DEFAULT_MIN_BAR_HEIGHT: u32 = 100;
    pub const DEFAULT_DPI: u32 = 300;
    pub const DEFAULT_PAGE: usize = 0;
}

/// Per-request detection parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionParams {
    /// Minimum horizontal distance between two bar lines for a measure to be kept
    pub min_bar_width: u32,
    /// Minimum height of a vertical stroke to count as a bar line
    pub min_bar_height: u32,
}

impl DetectionParams {
    pub fn new() -> Self {
        Self {
            min_bar_width: constants::DEFAULT_MIN_BAR_WIDTH,
            min_bar_height: constants::DEFAULT_MIN_BAR_HEIGHT,
        }
    }

    pub fn with_min_bar_width(mut self, min_bar_width: u32) -> Self {
        self.min_bar_width = min_bar_width;
        self
    }

    pub fn with_min_bar_height(mut self, min_bar_height: u32) -> Self {
        self.min_bar_height = min_bar_height;
        self
    }

    /// Reject parameters the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.min_bar_width == 0 {
            return Err(DetectionError::Input("min_bar_width must be positive".to_string()));
        }
        if self.min_bar_height == 0 {
            return Err(DetectionError::Input("min_bar_height must be positive".to_string()));
        }
        Ok(())
    }
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self::new()
    }
}
