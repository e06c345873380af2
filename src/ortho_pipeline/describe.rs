//! Describe orchestration module
//!
//! Drives discovery, telemetry aggregation, tag and bounds reading and
//! sidecar writing for every flight folder under a root directory.

mod pipeline;
mod timing;
pub mod types;


pub use pipeline::OrthoDescribePipeline;
pub use timing::{RunTimings, StepTotal, Timer};
pub use types::{DescribeConfig, DescribeConfigBuilder, RunReport, SkipReason, SkipRecord};
