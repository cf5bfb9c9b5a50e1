use barscan::LineCandidate;
use image::{GrayImage, Luma};

pub const WHITE: Luma<u8> = Luma([255]);
pub const BLACK: Luma<u8> = Luma([0]);

/// Blank white page
pub fn blank_page(width: u32, height: u32) -> GrayImage {
    GrayImage::from_pixel(width, height, WHITE)
}

/// Paint a filled black rectangle, clipped to the page
pub fn fill_rect(img: &mut GrayImage, x: u32, y: u32, width: u32, height: u32) {
    for py in y..(y + height).min(img.height()) {
        for px in x..(x + width).min(img.width()) {
            img.put_pixel(px, py, BLACK);
        }
    }
}

/// Vertical bar line, 3 px thick
pub fn draw_bar(img: &mut GrayImage, x: u32, top: u32, height: u32) {
    fill_rect(img, x, top, 3, height);
}

/// Five-line staff, lines 2 px thick, `spacing` apart starting at `top`
pub fn draw_staff(img: &mut GrayImage, left: u32, right: u32, top: u32, spacing: u32) {
    for line in 0..5 {
        fill_rect(img, left, top + line * spacing, right - left, 2);
    }
}

/// Synthetic score page: 1000x1200, one staff with lines at
/// y = 100, 120, 140, 160, 180 and five 150 px bar lines at
/// x = 100, 300, 500, 700, 900 spanning y = 80..230
pub fn single_staff_page() -> GrayImage {
    let mut img = blank_page(1000, 1200);
    draw_staff(&mut img, 50, 950, 100, 20);
    for x in [100, 300, 500, 700, 900] {
        draw_bar(&mut img, x, 80, 150);
    }
    img
}

/// Bounding box shorthand
pub fn candidate(x: i32, y: i32, width: i32, height: i32) -> LineCandidate {
    LineCandidate { x, y, width, height }
}

/// Mask with foreground pixels set
pub fn mask_from_rects(width: u32, height: u32, rects: &[(u32, u32, u32, u32)]) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    for &(x, y, w, h) in rects {
        for py in y..(y + h).min(height) {
            for px in x..(x + w).min(width) {
                mask.put_pixel(px, py, Luma([255]));
            }
        }
    }
    mask
}

/// Horizontal staff-line candidates spanning most of a 1000 px page
pub fn staff_line_candidates(ys: &[i32]) -> Vec<LineCandidate> {
    ys.iter().map(|&y| candidate(50, y, 900, 2)).collect()
}

/// Page that works with the default parameters: 1000x800, staff lines at
/// y = 400..480 (20 px apart), 250 px bar lines at x = 100, 400, 700
pub fn default_params_page() -> GrayImage {
    let mut img = blank_page(1000, 800);
    draw_staff(&mut img, 50, 950, 400, 20);
    for x in [100, 400, 700] {
        draw_bar(&mut img, x, 320, 250);
    }
    img
}

/// PNG-encode a page, as a client would upload it
pub fn encode_png(img: &GrayImage) -> anyhow::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image::DynamicImage::ImageLuma8(img.clone())
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

/// Single staff as in `single_staff_page`, without bar lines, with staff
/// lines painted in `ink` on a white color page
pub fn colored_staff_page(ink: image::Rgb<u8>) -> image::RgbImage {
    let mut img = image::RgbImage::from_pixel(1000, 1200, image::Rgb([255, 255, 255]));
    for line in 0..5 {
        let top = 100 + line * 20;
        for y in top..top + 2 {
            for x in 50..950 {
                img.put_pixel(x, y, ink);
            }
        }
    }
    img
}
