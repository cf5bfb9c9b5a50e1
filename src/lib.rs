pub mod config;
pub mod debug;
pub mod detection;
pub mod error;
pub mod models;
pub mod raster;
pub mod service;

pub use config::DetectionParams;
pub use detection::{detect_measures, detect_staff_systems, Analysis, MeasureDetector};
pub use error::{DetectionError, ErrorClass};
pub use models::{BarLine, LineCandidate, Measure, StaffSystem};
pub use raster::{ImageDocumentRasterizer, PageRasterizer};
