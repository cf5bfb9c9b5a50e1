use serde::Serialize;
use thiserror::Error;

/// Failure kinds surfaced by the detection core
#[derive(Debug, Error)]
pub enum DetectionError {
    /// The image buffer is empty, malformed or has non-positive dimensions,
    /// or a detection parameter is out of range
    #[error("invalid input: {0}")]
    Input(String),

    /// No page image could be produced from the submitted document
    #[error("failed to rasterize page: {0}")]
    Rasterization(String),

    /// Anything else going wrong between binarization and measure assembly
    #[error("processing failed: {0}")]
    Processing(String),
}

/// Error class used by the service boundary to pick a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    ClientError,
    ProcessingError,
}

impl DetectionError {
    pub fn status(&self) -> ErrorClass {
        match self {
            DetectionError::Input(_) | DetectionError::Rasterization(_) => ErrorClass::ClientError,
            DetectionError::Processing(_) => ErrorClass::ProcessingError,
        }
    }
}

pub type Result<T> = std::result::Result<T, DetectionError>;
