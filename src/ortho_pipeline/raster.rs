//! Raster georeferencing module
//!
//! Derives a raster's bounding box from its header without touching pixels.

mod reader;
mod geotiff_reader;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use reader::BoundsReader;
pub use geotiff_reader::{GeoTiffBoundsReader, read_geo_transform};
pub use types::{BoundingBox, GeoTransform};
