//! Metadata output module
//!
//! Merges flight, tag and raster information into one sidecar document per
//! image and persists it as JSON.

mod writer;
mod json_writer;
pub mod types;

pub use writer::MetadataWriter;
pub use json_writer::{JsonMetadataWriter, sidecar_path, to_json_bytes};
pub use types::OrthoMetadata;
