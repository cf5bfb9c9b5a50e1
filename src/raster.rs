use image::DynamicImage;

use crate::error::{DetectionError, Result};

/// Produces the raster image of one page of a submitted document
pub trait PageRasterizer: Send + Sync {
    fn rasterize(&self, document: &[u8], page: usize, dpi: u32) -> Result<DynamicImage>;
}

/// Treats the document as an already rendered single-page image in any
/// format the `image` crate decodes. The DPI is fixed by the file itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDocumentRasterizer;

impl PageRasterizer for ImageDocumentRasterizer {
    fn rasterize(&self, document: &[u8], page: usize, dpi: u32) -> Result<DynamicImage> {
        if document.is_empty() {
            return Err(DetectionError::Rasterization("document is empty".to_string()));
        }
        if page != 0 {
            return Err(DetectionError::Rasterization(format!(
                "page {} out of range for single-page image document",
                page
            )));
        }

        log::debug!("Decoding {} byte image document (requested {} dpi)", document.len(), dpi);
        let img = image::load_from_memory(document)
            .map_err(|e| DetectionError::Rasterization(format!("failed to decode page image: {}", e)))?;

        if img.width() == 0 || img.height() == 0 {
            return Err(DetectionError::Rasterization("page image is empty".to_string()));
        }
        Ok(img)
    }
}
