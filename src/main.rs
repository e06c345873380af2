use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use ortho_describe_rs::logger;
use ortho_describe_rs::ortho_pipeline::{DescribeConfig, OrthoDescribePipeline};

/// Writes a JSON metadata sidecar next to every orthophoto under ROOT_DIR
#[derive(Debug, Parser)]
#[command(name = "ortho_describe", version)]
struct Cli {
    /// Base directory holding flight folders
    root_dir: PathBuf,

    /// ExifTool executable
    #[arg(long, default_value = "exiftool")]
    exiftool: PathBuf,

    /// Seconds before a single ExifTool call is abandoned
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Name of the image folder inside each flight folder
    #[arg(long, default_value = "ortho")]
    ortho_dir: String,

    /// Name of the telemetry CSV inside each flight folder
    #[arg(long, default_value = "metadata.csv")]
    metadata_file: String,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(&cli.log_level);

    info!("Starting ortho_describe...");

    let config = DescribeConfig::builder()
        .root_dir(&cli.root_dir)
        .exiftool_path(&cli.exiftool)
        .tool_timeout(Duration::from_secs(cli.timeout_secs))
        .ortho_dir_name(cli.ortho_dir)
        .metadata_file_name(cli.metadata_file)
        .build();
    let pipeline = OrthoDescribePipeline::new(config).context("invalid configuration")?;

    let report = pipeline
        .run()
        .with_context(|| format!("describing {} failed", cli.root_dir.display()))?;

    report.timings.log_summary();
    info!(
        "Wrote {} sidecars, skipped {} images and {} folders",
        report.written.len(),
        report.images_skipped(),
        report.folders_skipped()
    );

    Ok(())
}
