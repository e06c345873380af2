//! Image tag types

use serde_json::Value;

/// ExifTool tag names requested for every image
pub const REQUESTED_TAGS: [&str; 5] = [
    "BandName",
    "AcquisitionDuration",
    "RadiometricCorrection",
    "PixelScale",
    "GDALNoData",
];

/// Per-image tags, already converted to output units
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageTags {
    /// Spectral band of the orthophoto (e.g. "Red", "NIR")
    pub band_name: Option<String>,
    /// Capture duration in minutes
    pub acquisition_duration_in_minutes: Option<f64>,
    /// Radiometric correction flag as reported by the tool
    pub radiometric_correction: Option<String>,
    /// Ground sample distance in centimetres per pixel
    pub gsd: Option<f64>,
    /// Nodata value, verbatim from the tool
    pub gdal_no_data: Option<Value>,
}
