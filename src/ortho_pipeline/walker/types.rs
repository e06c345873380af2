//! Flight folder types

use std::path::PathBuf;

/// A survey flight directory with an ortho image folder
#[derive(Debug, Clone, PartialEq)]
pub struct FlightFolder {
    /// Directory that contains the `ortho` child
    pub root: PathBuf,
    /// The `ortho` directory itself; sidecars are written here
    pub ortho_dir: PathBuf,
    /// Sibling telemetry CSV, if one exists
    pub metadata_csv: Option<PathBuf>,
    /// Raster files in `ortho_dir`, sorted by file name
    pub images: Vec<PathBuf>,
}
