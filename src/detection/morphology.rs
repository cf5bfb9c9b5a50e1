use image::GrayImage;

use crate::detection::preprocessing::{BACKGROUND, FOREGROUND};
use crate::error::{DetectionError, Result};

/// Rectangular structuring element, anchored at (`width / 2`, `height / 2`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuringElement {
    pub width: u32,
    pub height: u32,
}

impl StructuringElement {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// 1 px wide, `height` tall: keeps vertical strokes
    pub fn vertical(height: u32) -> Self {
        Self::new(1, height)
    }

    /// `width` wide, 1 px tall: keeps horizontal strokes
    pub fn horizontal(width: u32) -> Self {
        Self::new(width, 1)
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Erode,
    Dilate,
}

/// Morphological opening: `iterations` erosions followed by as many dilations.
/// Pixels outside the image never influence the result.
pub fn open(mask: &GrayImage, element: StructuringElement, iterations: u32) -> Result<GrayImage> {
    if element.width == 0 || element.height == 0 {
        return Err(DetectionError::Input(format!(
            "structuring element must be non-empty, got {}x{}",
            element.width, element.height
        )));
    }

    let mut current = mask.clone();
    for _ in 0..iterations {
        current = apply(&current, element, Op::Erode)?;
    }
    for _ in 0..iterations {
        current = apply(&current, element, Op::Dilate)?;
    }
    Ok(current)
}

pub fn erode(mask: &GrayImage, element: StructuringElement) -> Result<GrayImage> {
    apply(mask, element, Op::Erode)
}

pub fn dilate(mask: &GrayImage, element: StructuringElement) -> Result<GrayImage> {
    apply(mask, element, Op::Dilate)
}

// A rectangle is separable: min/max over it equals min/max over its rows
// of min/max over its columns, also once clipped to the image.
fn apply(mask: &GrayImage, element: StructuringElement, op: Op) -> Result<GrayImage> {
    let rows = sweep(mask, element.width, Axis::Horizontal, op)?;
    sweep(&rows, element.height, Axis::Vertical, op)
}

fn sweep(mask: &GrayImage, len: u32, axis: Axis, op: Op) -> Result<GrayImage> {
    if len <= 1 {
        return Ok(mask.clone());
    }

    let (width, height) = mask.dimensions();
    let (width, height) = (width as usize, height as usize);
    let src = mask.as_raw();
    let mut out = vec![BACKGROUND; src.len()];

    let (lines, line_len) = match axis {
        Axis::Horizontal => (height, width),
        Axis::Vertical => (width, height),
    };
    let index = |line: usize, pos: usize| match axis {
        Axis::Horizontal => line * width + pos,
        Axis::Vertical => pos * width + line,
    };

    let anchor = (len / 2) as usize;
    let len = len as usize;
    // prefix[i] = foreground pixels in positions [0, i)
    let mut prefix = vec![0usize; line_len + 1];

    for line in 0..lines {
        for pos in 0..line_len {
            let fg = (src[index(line, pos)] != BACKGROUND) as usize;
            prefix[pos + 1] = prefix[pos] + fg;
        }

        for pos in 0..line_len {
            let lo = pos.saturating_sub(anchor);
            let hi = pos.saturating_add(len - 1 - anchor).min(line_len - 1);
            let count = prefix[hi + 1] - prefix[lo];

            let set = match op {
                Op::Erode => count == hi - lo + 1,
                Op::Dilate => count > 0,
            };
            if set {
                out[index(line, pos)] = FOREGROUND;
            }
        }
    }

    GrayImage::from_raw(width as u32, height as u32, out).ok_or_else(|| {
        DetectionError::Processing("morphology buffer does not match image size".to_string())
    })
}
