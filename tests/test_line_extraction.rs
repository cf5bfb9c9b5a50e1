//! Binarization, morphology and directional line extraction.

mod common;

use barscan::detection::lines::{extract_horizontal_lines, extract_vertical_lines};
use barscan::detection::morphology::{self, StructuringElement};
use barscan::detection::preprocessing::{self, BinarizeMode, BACKGROUND, FOREGROUND};
use barscan::DetectionError;
use common::*;
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

#[test]
fn test_fixed_threshold_is_inverted_at_127() -> anyhow::Result<()> {
    let gray = GrayImage::from_fn(3, 1, |x, _| Luma([[0, 127, 128][x as usize]]));

    let mask = preprocessing::binarize(&gray, BinarizeMode::fixed())?;

    assert_eq!(mask.as_raw(), &vec![FOREGROUND, FOREGROUND, BACKGROUND]);
    Ok(())
}

#[test]
fn test_adaptive_threshold_ignores_uniform_shading() -> anyhow::Result<()> {
    // Uniformly dark paper has no ink
    let gray = GrayImage::from_pixel(40, 40, Luma([90]));

    let mask = preprocessing::binarize(&gray, BinarizeMode::adaptive())?;

    assert!(mask.pixels().all(|p| p[0] == BACKGROUND));
    Ok(())
}

#[test]
fn test_adaptive_threshold_marks_ink() -> anyhow::Result<()> {
    let mut gray = blank_page(60, 60);
    draw_bar(&mut gray, 30, 5, 50);

    let mask = preprocessing::binarize(&gray, BinarizeMode::adaptive())?;

    assert_eq!(mask.get_pixel(31, 30)[0], FOREGROUND);
    assert_eq!(mask.get_pixel(10, 30)[0], BACKGROUND);
    assert_eq!(mask.get_pixel(28, 30)[0], BACKGROUND);
    Ok(())
}

#[test]
fn test_binarize_rejects_empty_image() {
    let result = preprocessing::binarize(&GrayImage::new(0, 0), BinarizeMode::fixed());

    assert!(matches!(result, Err(DetectionError::Input(_))));
}

#[test]
fn test_gaussian_kernel_is_normalized_and_symmetric() {
    let kernel = preprocessing::gaussian_kernel(15);

    assert_eq!(kernel.len(), 15);
    assert!((kernel.iter().sum::<f32>() - 1.0).abs() < 1e-5);
    for i in 0..7 {
        assert!((kernel[i] - kernel[14 - i]).abs() < 1e-6);
        assert!(kernel[i] < kernel[i + 1]);
    }
}

#[test]
fn test_erode_and_dilate() -> anyhow::Result<()> {
    let mask = mask_from_rects(20, 20, &[(5, 5, 1, 3), (10, 10, 1, 1)]);

    let eroded = morphology::erode(&mask, StructuringElement::vertical(5))?;
    assert!(eroded.pixels().all(|p| p[0] == BACKGROUND));

    let dilated = morphology::dilate(&mask, StructuringElement::horizontal(3))?;
    for x in 9..=11 {
        assert_eq!(dilated.get_pixel(x, 10)[0], FOREGROUND);
    }
    assert_eq!(dilated.get_pixel(12, 10)[0], BACKGROUND);
    Ok(())
}

#[test]
fn test_empty_structuring_element_is_rejected() {
    let mask = mask_from_rects(10, 10, &[]);

    let result = morphology::open(&mask, StructuringElement::new(0, 3), 1);

    assert!(matches!(result, Err(DetectionError::Input(_))));
}

#[test]
fn test_vertical_extraction_keeps_only_tall_strokes() -> anyhow::Result<()> {
    let mask = mask_from_rects(
        200,
        300,
        &[
            (10, 20, 1, 150),  // bar line
            (30, 20, 1, 50),   // stem
            (5, 100, 190, 1),  // staff line
            (60, 60, 12, 10),  // notehead
        ],
    );

    let extraction = extract_vertical_lines(&mask, 60)?;

    assert_eq!(extraction.candidates.len(), 1);
    let bar = extraction.candidates[0];
    assert_eq!(bar.x, 10);
    assert_eq!(bar.width, 1);
    assert_eq!(bar.height, 150);
    Ok(())
}

#[test]
fn test_vertical_candidates_never_shorter_than_element() -> anyhow::Result<()> {
    // Deterministic scatter of vertical strokes with lengths 1..=120
    let mut seed: u32 = 12345;
    let mut next = || {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        (seed >> 16) & 0x7fff
    };
    let rects: Vec<(u32, u32, u32, u32)> = (0..60)
        .map(|_| {
            let x = 5 + next() % 290;
            let len = 1 + next() % 120;
            let y = 5 + next() % (290 - len);
            (x, y, 1 + next() % 3, len)
        })
        .collect();
    let mask = mask_from_rects(300, 300, &rects);

    let element_height = 40;
    let extraction = extract_vertical_lines(&mask, element_height)?;

    for c in &extraction.candidates {
        assert!(
            c.height >= element_height as i32,
            "candidate {:?} shorter than element",
            c
        );
    }
    Ok(())
}

#[test]
fn test_horizontal_extraction_drops_short_strokes() -> anyhow::Result<()> {
    let mask = mask_from_rects(
        1000,
        200,
        &[
            (50, 50, 900, 2),  // staff line
            (100, 120, 30, 2), // beam fragment
            (500, 10, 3, 180), // bar line
        ],
    );

    let extraction = extract_horizontal_lines(&mask)?;

    assert_eq!(extraction.candidates.len(), 1);
    let line = extraction.candidates[0];
    assert_eq!(line.y, 50);
    assert_eq!(line.height, 2);
    assert_eq!(line.width, 900);
    Ok(())
}

#[test]
fn test_extraction_is_deterministic() -> anyhow::Result<()> {
    let mask = mask_from_rects(300, 300, &[(10, 10, 2, 200), (100, 50, 2, 200), (200, 5, 2, 100)]);

    let first = extract_vertical_lines(&mask, 40)?;
    let second = extract_vertical_lines(&mask, 40)?;

    assert_eq!(first.candidates, second.candidates);
    assert_eq!(first.opened, second.opened);
    Ok(())
}

#[test]
fn test_color_pages_use_bt601_weights() {
    let rgb = RgbImage::from_fn(4, 1, |x, _| {
        [Rgb([0, 200, 0]), Rgb([255, 0, 0]), Rgb([0, 0, 255]), Rgb([90, 90, 90])][x as usize]
    });

    let gray = preprocessing::to_grayscale(&DynamicImage::ImageRgb8(rgb));

    assert_eq!(gray.as_raw(), &vec![117, 76, 29, 90]);
}

#[test]
fn test_luma_pages_are_unchanged() {
    let gray = GrayImage::from_fn(3, 1, |x, _| Luma([[0, 127, 255][x as usize]]));

    let converted = preprocessing::to_grayscale(&DynamicImage::ImageLuma8(gray.clone()));

    assert_eq!(converted, gray);
}

#[test]
fn test_adaptive_mean_is_rounded_once() -> anyhow::Result<()> {
    // Local mean at the dark pixel is about 199.76, which rounds to 200,
    // putting the pixel exactly on the `mean - 10` boundary
    let mut gray = GrayImage::from_pixel(31, 31, Luma([200]));
    gray.put_pixel(15, 15, Luma([190]));

    let mask = preprocessing::binarize(&gray, BinarizeMode::adaptive())?;

    assert_eq!(mask.get_pixel(15, 15)[0], FOREGROUND);
    assert_eq!(mask.get_pixel(14, 15)[0], BACKGROUND);
    Ok(())
}

#[test]
fn test_vertical_element_taller_than_511() -> anyhow::Result<()> {
    let mask = mask_from_rects(20, 1500, &[(10, 20, 1, 1400), (15, 20, 1, 1000)]);

    let extraction = extract_vertical_lines(&mask, 600)?;

    assert_eq!(extraction.candidates.len(), 1);
    assert_eq!(extraction.candidates[0].x, 10);
    assert_eq!(extraction.candidates[0].height, 1400);
    Ok(())
}
