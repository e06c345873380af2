use std::path::Path;

use crate::ortho_pipeline::common::error::Result;
use crate::ortho_pipeline::raster::types::BoundingBox;

pub trait BoundsReader {
    fn read_bounds(&self, image_path: &Path) -> Result<BoundingBox>;
}
