use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::config::{constants, DetectionParams};
use crate::detection::{AdvancedDetection, Algorithm, Analysis, Confidence, MeasureDetector};
use crate::error::{DetectionError, ErrorClass, Result};
use crate::models::Measure;
use crate::raster::PageRasterizer;

/// Parameters of one bar-detection request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarDetectionRequest {
    /// Page to process; echoed back in the response
    #[serde(default)]
    pub page: usize,
    #[serde(flatten)]
    pub params: DetectionParams,
}

impl Default for BarDetectionRequest {
    fn default() -> Self {
        Self {
            page: constants::DEFAULT_PAGE,
            params: DetectionParams::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionResponse {
    pub success: bool,
    pub page: usize,
    pub image_width: u32,
    pub image_height: u32,
    pub bars_detected: usize,
    pub bars: Vec<Measure>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvancedDetectionResponse {
    pub success: bool,
    pub page: usize,
    pub bars: Vec<Measure>,
    pub confidence: Confidence,
    pub algorithm: Algorithm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_class: ErrorClass,
    pub detail: String,
}

impl From<&DetectionError> for ErrorResponse {
    fn from(err: &DetectionError) -> Self {
        Self {
            success: false,
            error_class: err.status(),
            detail: err.to_string(),
        }
    }
}

/// Which response a request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Standard,
    /// Always detects with default parameters and labels the result
    Advanced,
}

impl Variant {
    /// Parameters the variant actually detects with
    pub fn effective_params(self, requested: DetectionParams) -> DetectionParams {
        match self {
            Variant::Standard => requested,
            Variant::Advanced => DetectionParams::default(),
        }
    }
}

/// One rasterized page with its full analysis. Responses and debug output
/// are both built from this, so they always describe the same run.
#[derive(Debug, Clone)]
pub struct PageDetection {
    pub page: usize,
    pub variant: Variant,
    pub image: DynamicImage,
    pub analysis: Analysis,
}

/// Either response shape, serialized without a wrapper
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Standard(DetectionResponse),
    Advanced(AdvancedDetectionResponse),
}

impl PageDetection {
    pub fn standard_response(&self) -> DetectionResponse {
        DetectionResponse {
            success: true,
            page: self.page,
            image_width: self.analysis.width,
            image_height: self.analysis.height,
            bars_detected: self.analysis.measures.len(),
            bars: self.analysis.measures.clone(),
        }
    }

    pub fn advanced_response(&self) -> AdvancedDetectionResponse {
        let detection = AdvancedDetection::from_measures(self.analysis.measures.clone());
        AdvancedDetectionResponse {
            success: true,
            page: self.page,
            bars: detection.measures,
            confidence: detection.confidence,
            algorithm: detection.algorithm,
        }
    }

    /// Response matching the requested variant
    pub fn response(&self) -> Response {
        match self.variant {
            Variant::Standard => Response::Standard(self.standard_response()),
            Variant::Advanced => Response::Advanced(self.advanced_response()),
        }
    }
}

/// Rasterize the requested page and run the pipeline once with the
/// parameters of `variant`
pub fn detect_page(
    rasterizer: &dyn PageRasterizer,
    document: &[u8],
    request: &BarDetectionRequest,
    variant: Variant,
    dpi: u32,
) -> Result<PageDetection> {
    let params = variant.effective_params(request.params);
    params.validate()?;
    let image = rasterizer.rasterize(document, request.page, dpi)?;

    let analysis = MeasureDetector::new().with_params(params).analyze(&image)?;

    Ok(PageDetection {
        page: request.page,
        variant,
        image,
        analysis,
    })
}

/// Rasterize the requested page and detect its measures
pub fn detect_bars(
    rasterizer: &dyn PageRasterizer,
    document: &[u8],
    request: &BarDetectionRequest,
    dpi: u32,
) -> Result<DetectionResponse> {
    Ok(detect_page(rasterizer, document, request, Variant::Standard, dpi)?.standard_response())
}

/// Advanced variant: always runs with default parameters and labels the
/// result with its confidence and algorithm
pub fn detect_bars_advanced(
    rasterizer: &dyn PageRasterizer,
    document: &[u8],
    page: usize,
    dpi: u32,
) -> Result<AdvancedDetectionResponse> {
    let request = BarDetectionRequest {
        page,
        ..Default::default()
    };
    Ok(detect_page(rasterizer, document, &request, Variant::Advanced, dpi)?.advanced_response())
}
