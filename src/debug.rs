use anyhow::Result;
use image::{DynamicImage, GrayImage, Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use std::path::{Path, PathBuf};

use crate::detection::Analysis;

const MEASURE_COLOR: Rgb<u8> = Rgb([220, 30, 30]);
const STAFF_COLOR: Rgb<u8> = Rgb([30, 90, 220]);

/// Writes the intermediate images of a detection run to a directory
#[derive(Debug, Clone)]
pub struct DebugDump {
    output_dir: PathBuf,
}

impl DebugDump {
    /// The directory must be empty or non-existent
    pub fn new(output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Save input, both masks, both opened masks and a measure overlay.
    /// Returns the written paths in step order.
    pub fn save(&self, analysis: &Analysis, input: &DynamicImage) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        written.push(self.save_image("00_input.png", |path| input.save(path))?);
        written.push(self.save_mask("01_adaptive_binary.png", &analysis.adaptive_mask)?);
        written.push(self.save_mask("02_vertical_lines.png", &analysis.vertical_lines)?);
        written.push(self.save_mask("03_fixed_binary.png", &analysis.fixed_mask)?);
        written.push(self.save_mask("04_horizontal_lines.png", &analysis.horizontal_lines)?);

        let overlay = render_overlay(analysis, input);
        written.push(self.save_image("05_measures.png", |path| overlay.save(path))?);

        for path in &written {
            log::debug!("Debug: saved {}", path.display());
        }
        Ok(written)
    }

    fn save_mask(&self, name: &str, mask: &GrayImage) -> Result<PathBuf> {
        self.save_image(name, |path| mask.save(path))
    }

    fn save_image<F>(&self, name: &str, save: F) -> Result<PathBuf>
    where
        F: FnOnce(&Path) -> image::ImageResult<()>,
    {
        let path = self.output_dir.join(name);
        save(&path).map_err(|e| anyhow::anyhow!("Failed to save debug image {}: {}", name, e))?;
        Ok(path)
    }
}

/// Input page with staff systems and measures outlined
pub fn render_overlay(analysis: &Analysis, input: &DynamicImage) -> RgbImage {
    let mut canvas = input.to_rgb8();

    for staff in &analysis.staff_systems {
        if staff.height > 0 {
            let rect = Rect::at(0, staff.y).of_size(analysis.width, staff.height as u32);
            draw_hollow_rect_mut(&mut canvas, rect, STAFF_COLOR);
        }
    }

    for measure in &analysis.measures {
        let (width, height) = (measure.width as u32, measure.height as u32);
        if width == 0 || height == 0 {
            continue;
        }
        let rect = Rect::at(measure.x as i32, measure.y as i32).of_size(width, height);
        draw_hollow_rect_mut(&mut canvas, rect, MEASURE_COLOR);
    }

    canvas
}
