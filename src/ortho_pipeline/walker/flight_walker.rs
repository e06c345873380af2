use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::ortho_pipeline::common::error::{DescribeError, Result};
use crate::ortho_pipeline::describe::types::DescribeConfig;
use crate::ortho_pipeline::walker::types::FlightFolder;

const RASTER_EXTENSION: &str = "tif";

/// Walks `root` and returns every directory that has an ortho child.
pub fn discover_flights(root: &Path, config: &DescribeConfig) -> Result<Vec<FlightFolder>> {
    if !root.is_dir() {
        return Err(DescribeError::InvalidConfig(format!(
            "root directory does not exist: {}",
            root.display()
        )));
    }

    let mut flights = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable directory entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let ortho_dir = entry.path().join(&config.ortho_dir_name);
        if !ortho_dir.is_dir() {
            continue;
        }

        let images = match list_rasters(&ortho_dir) {
            Ok(images) => images,
            Err(e) => {
                warn!("Cannot list {}: {}", ortho_dir.display(), e);
                continue;
            }
        };

        let csv_path = entry.path().join(&config.metadata_file_name);
        let metadata_csv = csv_path.is_file().then_some(csv_path);

        debug!(
            "Found flight {} with {} images (telemetry: {})",
            entry.path().display(),
            images.len(),
            metadata_csv.is_some()
        );

        flights.push(FlightFolder {
            root: entry.path().to_path_buf(),
            ortho_dir,
            metadata_csv,
            images,
        });
    }

    Ok(flights)
}

/// Lists non-hidden `.tif` files directly inside `dir`.
pub fn list_rasters(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        let is_raster = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(RASTER_EXTENSION));
        if is_raster {
            images.push(path);
        }
    }

    images.sort();
    Ok(images)
}
