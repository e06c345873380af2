use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DescribeError {
    #[error("Failed to read telemetry file: {0}")]
    TelemetryReadError(String),

    #[error("Metadata tool not found: {0}")]
    ToolNotFound(String),

    #[error("Metadata tool exited with {status}: {stderr}")]
    ToolFailed { status: String, stderr: String },

    #[error("Metadata tool timed out after {0:?}")]
    ToolTimeout(Duration),

    #[error("Unparsable metadata tool output: {0}")]
    ToolOutputError(String),

    #[error("Failed to read raster header: {0}")]
    RasterReadError(String),

    #[error("Raster has no georeferencing: {0}")]
    MissingGeoreference(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DescribeError {
    /// Errors that stop the whole run instead of skipping one image or folder.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DescribeError::ToolNotFound(_)
                | DescribeError::ToolFailed { .. }
                | DescribeError::ToolTimeout(_)
                | DescribeError::ToolOutputError(_)
                | DescribeError::OutputWriteError(_)
                | DescribeError::InvalidConfig(_)
                | DescribeError::IoError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DescribeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_errors_are_not_fatal() {
        assert!(!DescribeError::RasterReadError("x.tif".into()).is_fatal());
        assert!(!DescribeError::MissingGeoreference("x.tif".into()).is_fatal());
        assert!(!DescribeError::TelemetryReadError("metadata.csv".into()).is_fatal());
    }

    #[test]
    fn test_tool_errors_are_fatal() {
        assert!(DescribeError::ToolNotFound("exiftool".into()).is_fatal());
        assert!(DescribeError::ToolTimeout(Duration::from_secs(1)).is_fatal());
        assert!(DescribeError::ToolOutputError("empty".into()).is_fatal());
    }
}
