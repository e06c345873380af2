use std::path::Path;

use crate::ortho_pipeline::common::error::Result;
use crate::ortho_pipeline::telemetry::types::FlightSummary;

pub trait TelemetryAggregator {
    /// Summarizes a telemetry CSV. `Ok(None)` means none of the expected columns exist.
    fn aggregate(&self, csv_path: &Path) -> Result<Option<FlightSummary>>;
}
