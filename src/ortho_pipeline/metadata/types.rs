//! Output document types

use serde::Serialize;
use serde_json::Value;

use crate::ortho_pipeline::raster::types::BoundingBox;
use crate::ortho_pipeline::tags::types::ImageTags;
use crate::ortho_pipeline::telemetry::types::{FlightSummary, Timestamp};

/// Sidecar document written next to each orthophoto.
///
/// Field order here is the key order of the JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrthoMetadata {
    pub band_name: Option<String>,
    pub acquisition_duration_in_minutes: Option<f64>,
    pub radiometric_correction: Option<String>,
    pub gsd: Option<f64>,
    pub gdal_no_data: Option<Value>,
    pub gps_altitude: Option<f64>,
    pub relative_altitude: Option<f64>,
    pub camera_model_name: Option<String>,
    pub drone_model: Option<String>,
    pub create_date: Option<Timestamp>,
    pub utc_at_exposure: Option<Timestamp>,
    pub gps_status: Option<String>,
    pub bbox: BoundingBox,
}

impl OrthoMetadata {
    pub fn merge(summary: &FlightSummary, tags: &ImageTags, bbox: BoundingBox) -> Self {
        Self {
            band_name: tags.band_name.clone(),
            acquisition_duration_in_minutes: tags.acquisition_duration_in_minutes,
            radiometric_correction: tags.radiometric_correction.clone(),
            gsd: tags.gsd,
            gdal_no_data: tags.gdal_no_data.clone(),
            gps_altitude: summary.gps_altitude,
            relative_altitude: summary.relative_altitude,
            camera_model_name: summary.camera_model_name.clone(),
            drone_model: summary.drone_model.clone(),
            create_date: summary.create_date,
            utc_at_exposure: summary.utc_at_exposure,
            gps_status: summary.gps_status.clone(),
            bbox,
        }
    }
}
