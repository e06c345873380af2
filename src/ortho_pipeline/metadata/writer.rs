use std::path::Path;

use crate::ortho_pipeline::common::error::Result;
use crate::ortho_pipeline::metadata::types::OrthoMetadata;

pub trait MetadataWriter {
    fn write_metadata(&self, metadata: &OrthoMetadata, output_path: &Path) -> Result<()>;
}
