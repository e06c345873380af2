use std::path::Path;

use crate::ortho_pipeline::common::error::Result;
use crate::ortho_pipeline::tags::types::ImageTags;

pub trait TagReader {
    fn read_tags(&self, image_path: &Path) -> Result<ImageTags>;
}
