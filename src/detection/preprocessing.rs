use image::{DynamicImage, GrayImage, Luma, Rgb};
use imageproc::map::map_colors;

use crate::config::constants;
use crate::error::{DetectionError, Result};

/// Mask value for ink (line-candidate) pixels
pub const FOREGROUND: u8 = 255;
/// Mask value for everything else
pub const BACKGROUND: u8 = 0;

/// Thresholding policy used to turn a grayscale page into a mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinarizeMode {
    /// Compare every pixel against a Gaussian-weighted mean of its
    /// `block_size`×`block_size` neighbourhood minus `c`
    Adaptive { block_size: u32, c: i32 },
    /// Single global threshold
    Fixed { threshold: u8 },
}

impl BinarizeMode {
    /// Policy used for bar-line detection
    pub fn adaptive() -> Self {
        BinarizeMode::Adaptive {
            block_size: constants::ADAPTIVE_BLOCK_SIZE,
            c: constants::ADAPTIVE_C,
        }
    }

    /// Policy used for staff-line detection
    pub fn fixed() -> Self {
        BinarizeMode::Fixed {
            threshold: constants::FIXED_THRESHOLD,
        }
    }
}

/// Convert image to grayscale. Color pages use BT.601 weights in 14-bit
/// fixed point, rounded; luma pages are only narrowed to 8 bits.
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    match img {
        DynamicImage::ImageLuma8(gray) => gray.clone(),
        DynamicImage::ImageLuma16(_) | DynamicImage::ImageLumaA8(_) | DynamicImage::ImageLumaA16(_) => {
            img.to_luma8()
        }
        _ => map_colors(&img.to_rgb8(), |Rgb([r, g, b])| Luma([bt601_luma(r, g, b)])),
    }
}

fn bt601_luma(r: u8, g: u8, b: u8) -> u8 {
    const R: u32 = 4899;
    const G: u32 = 9617;
    const B: u32 = 1868;
    const SHIFT: u32 = 14;

    let sum = R * r as u32 + G * g as u32 + B * b as u32 + (1 << (SHIFT - 1));
    (sum >> SHIFT) as u8
}

/// Produce an inverted binary mask: dark ink becomes `FOREGROUND`
pub fn binarize(gray: &GrayImage, mode: BinarizeMode) -> Result<GrayImage> {
    ensure_non_empty(gray)?;

    match mode {
        BinarizeMode::Adaptive { block_size, c } => adaptive_threshold(gray, block_size, c),
        BinarizeMode::Fixed { threshold } => Ok(fixed_threshold(gray, threshold)),
    }
}

pub(crate) fn ensure_non_empty(gray: &GrayImage) -> Result<()> {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return Err(DetectionError::Input(format!(
            "image must have positive dimensions, got {}x{}",
            width, height
        )));
    }
    Ok(())
}

fn fixed_threshold(gray: &GrayImage, threshold: u8) -> GrayImage {
    let (width, height) = gray.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        if gray.get_pixel(x, y)[0] > threshold {
            Luma([BACKGROUND])
        } else {
            Luma([FOREGROUND])
        }
    })
}

fn adaptive_threshold(gray: &GrayImage, block_size: u32, c: i32) -> Result<GrayImage> {
    if block_size < 3 || block_size % 2 == 0 {
        return Err(DetectionError::Input(format!(
            "adaptive block size must be odd and at least 3, got {}",
            block_size
        )));
    }

    let kernel = gaussian_kernel(block_size);
    let local_mean = gaussian_mean(gray, &kernel);

    let (width, height) = gray.dimensions();
    Ok(GrayImage::from_fn(width, height, |x, y| {
        let pixel = gray.get_pixel(x, y)[0] as i32;
        let mean = local_mean[(y * width + x) as usize].round() as i32;
        if pixel > mean - c {
            Luma([BACKGROUND])
        } else {
            Luma([FOREGROUND])
        }
    }))
}

/// Separable Gaussian-weighted mean with replicated borders, kept in f32
/// so the result is rounded only once by the caller
fn gaussian_mean(gray: &GrayImage, kernel: &[f32]) -> Vec<f32> {
    let (width, height) = gray.dimensions();
    let (width, height) = (width as usize, height as usize);
    let radius = (kernel.len() / 2) as isize;
    let src = gray.as_raw();

    let clamp = |v: isize, len: usize| v.clamp(0, len as isize - 1) as usize;

    let mut rows = vec![0f32; src.len()];
    for y in 0..height {
        for x in 0..width {
            rows[y * width + x] = kernel
                .iter()
                .enumerate()
                .map(|(k, w)| {
                    let sx = clamp(x as isize + k as isize - radius, width);
                    w * src[y * width + sx] as f32
                })
                .sum();
        }
    }

    let mut mean = vec![0f32; src.len()];
    for y in 0..height {
        for x in 0..width {
            mean[y * width + x] = kernel
                .iter()
                .enumerate()
                .map(|(k, w)| {
                    let sy = clamp(y as isize + k as isize - radius, height);
                    w * rows[sy * width + x]
                })
                .sum();
        }
    }

    mean
}

/// Normalized 1-D Gaussian of `size` taps; sigma follows the usual
/// derivation from the window size when none is given
pub fn gaussian_kernel(size: u32) -> Vec<f32> {
    let sigma = 0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    let center = (size as f32 - 1.0) / 2.0;
    let denom = 2.0 * sigma * sigma;

    let weights: Vec<f32> = (0..size)
        .map(|i| {
            let d = i as f32 - center;
            (-(d * d) / denom).exp()
        })
        .collect();
    let sum: f32 = weights.iter().sum();

    weights.into_iter().map(|w| w / sum).collect()
}
