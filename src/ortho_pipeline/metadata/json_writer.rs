use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::debug;

use crate::ortho_pipeline::common::error::{DescribeError, Result};
use crate::ortho_pipeline::metadata::types::OrthoMetadata;
use crate::ortho_pipeline::metadata::writer::MetadataWriter;

const INDENT: &[u8] = b"    ";

/// Writes sidecars as pretty-printed JSON, replacing any existing file.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonMetadataWriter;

impl MetadataWriter for JsonMetadataWriter {
    fn write_metadata(&self, metadata: &OrthoMetadata, output_path: &Path) -> Result<()> {
        debug!("Writing metadata to {}", output_path.display());

        let buffer = to_json_bytes(metadata)?;
        std::fs::write(output_path, &buffer).map_err(|e| {
            DescribeError::OutputWriteError(format!("{}: {}", output_path.display(), e))
        })?;

        Ok(())
    }
}

/// Serializes with a four space indent.
pub fn to_json_bytes(metadata: &OrthoMetadata) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    metadata
        .serialize(&mut serializer)
        .map_err(|e| DescribeError::OutputWriteError(e.to_string()))?;
    Ok(buffer)
}

/// `<ortho_dir>/<image stem>.json`
pub fn sidecar_path(ortho_dir: &Path, image_path: &Path) -> PathBuf {
    let mut name = image_path
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    name.push(".json");
    ortho_dir.join(name)
}
