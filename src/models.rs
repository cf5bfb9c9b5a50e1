use serde::{Deserialize, Serialize};

/// Bounding box of one connected component in an opened mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCandidate {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl LineCandidate {
    /// Build from inclusive pixel extents
    pub fn from_extent(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self {
            x: min_x as i32,
            y: min_y as i32,
            width: (max_x - min_x + 1) as i32,
            height: (max_y - min_y + 1) as i32,
        }
    }
}

/// A logical bar line, possibly the merge of a double bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarLine {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BarLine {
    pub fn center_y(&self) -> i32 {
        self.y + self.height / 2
    }
}

impl From<LineCandidate> for BarLine {
    fn from(c: LineCandidate) -> Self {
        Self {
            x: c.x,
            y: c.y,
            width: c.width,
            height: c.height,
        }
    }
}

/// Padded vertical extent of one staff. `y` can be negative when the
/// top line sits closer to the page edge than the padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffSystem {
    pub y: i32,
    pub height: i32,
}

impl StaffSystem {
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Inclusive at both ends
    pub fn contains(&self, y: i32) -> bool {
        self.y <= y && y <= self.bottom()
    }
}

/// One numbered measure rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    #[serde(rename = "barNumber")]
    pub bar_number: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}
