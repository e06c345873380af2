//! Describe run configuration and report types

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;

use crate::ortho_pipeline::common::error::{DescribeError, Result};
use crate::ortho_pipeline::describe::timing::RunTimings;

/// Configuration for a describe run
#[derive(Debug, Clone)]
pub struct DescribeConfig {
    /// Base directory to scan for flight folders
    pub root_dir: PathBuf,
    /// ExifTool executable, looked up on PATH when not absolute
    pub exiftool_path: PathBuf,
    /// Extra arguments placed before the tag list
    pub exiftool_prefix_args: Vec<String>,
    /// Upper bound for one ExifTool invocation
    pub tool_timeout: Duration,
    /// Name of the image folder inside a flight folder
    pub ortho_dir_name: String,
    /// Name of the telemetry file next to the image folder
    pub metadata_file_name: String,
}

impl Default for DescribeConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            exiftool_path: PathBuf::from("exiftool"),
            exiftool_prefix_args: Vec::new(),
            tool_timeout: Duration::from_secs(60),
            ortho_dir_name: "ortho".to_string(),
            metadata_file_name: "metadata.csv".to_string(),
        }
    }
}

impl DescribeConfig {
    pub fn builder() -> DescribeConfigBuilder {
        DescribeConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.root_dir.as_os_str().is_empty() {
            return Err(DescribeError::InvalidConfig("root_dir is empty".to_string()));
        }
        if self.tool_timeout.is_zero() {
            return Err(DescribeError::InvalidConfig("tool_timeout must be positive".to_string()));
        }
        if self.ortho_dir_name.is_empty() || self.metadata_file_name.is_empty() {
            return Err(DescribeError::InvalidConfig("folder and file names must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Builder for DescribeConfig
#[derive(Default)]
pub struct DescribeConfigBuilder {
    root_dir: Option<PathBuf>,
    exiftool_path: Option<PathBuf>,
    exiftool_prefix_args: Option<Vec<String>>,
    tool_timeout: Option<Duration>,
    ortho_dir_name: Option<String>,
    metadata_file_name: Option<String>,
}

impl DescribeConfigBuilder {
    pub fn root_dir(mut self, root_dir: impl AsRef<Path>) -> Self {
        self.root_dir = Some(root_dir.as_ref().to_path_buf());
        self
    }

    pub fn exiftool_path(mut self, path: impl AsRef<Path>) -> Self {
        self.exiftool_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn exiftool_prefix_args(mut self, args: Vec<String>) -> Self {
        self.exiftool_prefix_args = Some(args);
        self
    }

    pub fn tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = Some(timeout);
        self
    }

    pub fn ortho_dir_name(mut self, name: impl Into<String>) -> Self {
        self.ortho_dir_name = Some(name.into());
        self
    }

    pub fn metadata_file_name(mut self, name: impl Into<String>) -> Self {
        self.metadata_file_name = Some(name.into());
        self
    }

    pub fn build(self) -> DescribeConfig {
        let default = DescribeConfig::default();
        DescribeConfig {
            root_dir: self.root_dir.unwrap_or(default.root_dir),
            exiftool_path: self.exiftool_path.unwrap_or(default.exiftool_path),
            exiftool_prefix_args: self.exiftool_prefix_args.unwrap_or(default.exiftool_prefix_args),
            tool_timeout: self.tool_timeout.unwrap_or(default.tool_timeout),
            ortho_dir_name: self.ortho_dir_name.unwrap_or(default.ortho_dir_name),
            metadata_file_name: self.metadata_file_name.unwrap_or(default.metadata_file_name),
        }
    }
}

/// Why a folder or image produced no sidecar
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    MissingTelemetry,
    NoTelemetryColumns,
    TelemetryUnreadable(String),
    RasterUnreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingTelemetry => write!(f, "no telemetry file"),
            SkipReason::NoTelemetryColumns => write!(f, "no expected telemetry columns"),
            SkipReason::TelemetryUnreadable(e) => write!(f, "{}", e),
            SkipReason::RasterUnreadable(e) => write!(f, "{}", e),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkipRecord {
    /// Flight folder or image path
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Outcome of a completed run
#[derive(Debug, Default)]
pub struct RunReport {
    pub flights_visited: usize,
    pub written: Vec<PathBuf>,
    pub skipped: Vec<SkipRecord>,
    pub timings: RunTimings,
}

impl RunReport {
    /// Records a skipped folder or image and logs it once.
    pub(crate) fn skip(&mut self, path: &Path, reason: SkipReason) {
        warn!("Skipping {}: {}", path.display(), reason);
        self.skipped.push(SkipRecord {
            path: path.to_path_buf(),
            reason,
        });
    }

    pub fn images_skipped(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| matches!(s.reason, SkipReason::RasterUnreadable(_)))
            .count()
    }

    pub fn folders_skipped(&self) -> usize {
        self.skipped.len() - self.images_skipped()
    }
}
