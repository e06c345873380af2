//! Image tag extraction module
//!
//! Reads per-image EXIF/GeoTIFF tags through an external metadata tool.

mod reader;
mod exiftool_reader;
pub mod types;

pub use reader::TagReader;
pub use exiftool_reader::{ExifToolReader, parse_tool_output};
pub use types::{ImageTags, REQUESTED_TAGS};
