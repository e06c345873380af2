//! Tag reader backed by the ExifTool command line program.
//!
//! ExifTool is started once per image with the five requested tags and `-j`,
//! and must print a one element JSON array on stdout. The child is polled
//! against a deadline and killed when it overruns; stdout and stderr are
//! drained on helper threads so a chatty child cannot block on a full pipe.

use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::ortho_pipeline::common::error::{DescribeError, Result};
use crate::ortho_pipeline::describe::types::DescribeConfig;
use crate::ortho_pipeline::tags::reader::TagReader;
use crate::ortho_pipeline::tags::types::{ImageTags, REQUESTED_TAGS};
use crate::ortho_pipeline::telemetry::stats::leading_number;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Seconds to minutes.
const SECONDS_PER_MINUTE: f64 = 60.0;

/// Pixel scale (metres) to ground sample distance (centimetres).
const GSD_SCALE: f64 = 100.0;

pub struct ExifToolReader {
    program: PathBuf,
    prefix_args: Vec<String>,
    timeout: Duration,
}

impl ExifToolReader {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            prefix_args: Vec::new(),
            timeout,
        }
    }

    pub fn from_config(config: &DescribeConfig) -> Self {
        Self::new(config.exiftool_path.clone(), config.tool_timeout)
            .with_prefix_args(config.exiftool_prefix_args.clone())
    }

    /// Arguments placed before the tag list, e.g. a `-config` file.
    pub fn with_prefix_args(mut self, args: Vec<String>) -> Self {
        self.prefix_args = args;
        self
    }

    fn run_tool(&self, image_path: &Path) -> Result<Vec<u8>> {
        let mut child = Command::new(&self.program)
            .args(&self.prefix_args)
            .args(REQUESTED_TAGS.iter().map(|tag| format!("-{tag}")))
            .arg("-j")
            .arg(image_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => DescribeError::ToolNotFound(self.program.display().to_string()),
                _ => DescribeError::IoError(e),
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let stdout_reader = thread::spawn(move || drain(stdout));
        let stderr_reader = thread::spawn(move || drain(stderr));

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                // pipe readers finish on their own once the child is gone
                let _ = child.kill();
                let _ = child.wait();
                return Err(DescribeError::ToolTimeout(self.timeout));
            }
            thread::sleep(POLL_INTERVAL);
        };

        let stdout = stdout_reader.join().unwrap_or_default();
        let stderr = stderr_reader.join().unwrap_or_default();

        if !status.success() {
            return Err(DescribeError::ToolFailed {
                status: status.to_string(),
                stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
            });
        }

        Ok(stdout)
    }
}

impl TagReader for ExifToolReader {
    #[instrument(skip_all, fields(image = %image_path.display()))]
    fn read_tags(&self, image_path: &Path) -> Result<ImageTags> {
        let stdout = self.run_tool(image_path)?;
        let tags = parse_tool_output(&stdout)?;
        debug!("Tags: {:?}", tags);
        Ok(tags)
    }
}

fn drain<R: Read>(pipe: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    buf
}

/// Converts ExifTool `-j` output into image tags.
pub fn parse_tool_output(stdout: &[u8]) -> Result<ImageTags> {
    if stdout.iter().all(u8::is_ascii_whitespace) {
        return Err(DescribeError::ToolOutputError("empty output".to_string()));
    }

    let objects: Vec<Map<String, Value>> = serde_json::from_slice(stdout)
        .map_err(|e| DescribeError::ToolOutputError(e.to_string()))?;
    let tags = objects
        .into_iter()
        .next()
        .ok_or_else(|| DescribeError::ToolOutputError("empty result array".to_string()))?;

    Ok(ImageTags {
        band_name: tags.get("BandName").and_then(text_value),
        acquisition_duration_in_minutes: tags
            .get("AcquisitionDuration")
            .and_then(number_value)
            .map(|secs| secs / SECONDS_PER_MINUTE),
        radiometric_correction: tags.get("RadiometricCorrection").and_then(text_value),
        gsd: tags
            .get("PixelScale")
            .and_then(number_value)
            .map(|scale| scale * GSD_SCALE),
        gdal_no_data: tags.get("GDALNoData").filter(|v| !v.is_null()).cloned(),
    })
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        other => Some(other.to_string()),
    }
}

fn number_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_number(s),
        Value::Array(items) => items.first().and_then(number_value),
        _ => None,
    }
}
