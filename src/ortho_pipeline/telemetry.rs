//! Flight telemetry module
//!
//! Reduces the per-shot rows of `metadata.csv` to one flight summary.

mod aggregator;
mod csv_aggregator;
pub mod stats;
pub mod types;

pub use aggregator::TelemetryAggregator;
pub use csv_aggregator::CsvTelemetryAggregator;
pub use types::{ColumnOutcome, FlightSummary, TelemetryColumn, Timestamp};
