//! Orthophoto metadata pipeline module
//!
//! This module describes drone orthophotos, with separate modules for flight
//! discovery, telemetry aggregation, tag and bounds reading, sidecar output
//! and run orchestration.

pub mod common;
pub mod walker;
pub mod telemetry;
pub mod tags;
pub mod raster;
pub mod metadata;
pub mod describe;

pub use common::{
    DescribeError,
    Result,
};

pub use walker::{
    FlightFolder,
    discover_flights,
};

pub use telemetry::{
    CsvTelemetryAggregator,
    FlightSummary,
    TelemetryAggregator,
};

pub use tags::{
    ExifToolReader,
    ImageTags,
    TagReader,
};

pub use raster::{
    BoundingBox,
    BoundsReader,
    GeoTiffBoundsReader,
};

pub use metadata::{
    JsonMetadataWriter,
    MetadataWriter,
    OrthoMetadata,
};

pub use describe::{
    DescribeConfig,
    DescribeConfigBuilder,
    OrthoDescribePipeline,
    RunReport,
};
