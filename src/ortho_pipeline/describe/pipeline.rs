use std::path::{Path, PathBuf};

use tracing::{debug, error, info, instrument};

use crate::ortho_pipeline::{
    common::error::Result,
    describe::timing::{RunTimings, Timer},
    describe::types::{DescribeConfig, RunReport, SkipReason},
    metadata::{sidecar_path, JsonMetadataWriter, MetadataWriter, OrthoMetadata},
    raster::{BoundsReader, GeoTiffBoundsReader},
    tags::{ExifToolReader, TagReader},
    telemetry::{CsvTelemetryAggregator, FlightSummary, TelemetryAggregator},
    walker::{discover_flights, FlightFolder},
};

pub struct OrthoDescribePipeline<A, T, B, W>
where
    A: TelemetryAggregator,
    T: TagReader,
    B: BoundsReader,
    W: MetadataWriter,
{
    aggregator: A,
    tag_reader: T,
    bounds_reader: B,
    writer: W,
    config: DescribeConfig,
}

impl OrthoDescribePipeline<CsvTelemetryAggregator, ExifToolReader, GeoTiffBoundsReader, JsonMetadataWriter> {
    pub fn new(config: DescribeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            aggregator: CsvTelemetryAggregator,
            tag_reader: ExifToolReader::from_config(&config),
            bounds_reader: GeoTiffBoundsReader,
            writer: JsonMetadataWriter,
            config,
        })
    }
}

impl<A, T, B, W> OrthoDescribePipeline<A, T, B, W>
where
    A: TelemetryAggregator,
    T: TagReader,
    B: BoundsReader,
    W: MetadataWriter,
{
    pub fn with_custom(
        aggregator: A,
        tag_reader: T,
        bounds_reader: B,
        writer: W,
        config: DescribeConfig,
    ) -> Self {
        Self {
            aggregator,
            tag_reader,
            bounds_reader,
            writer,
            config,
        }
    }

    /// Describes every image under the configured root.
    ///
    /// Missing telemetry, unusable telemetry and unreadable rasters are
    /// recorded in the report, one warning each. Tag tool and write failures stop
    /// the run.
    #[instrument(skip(self), fields(root = %self.config.root_dir.display()))]
    pub fn run(&self) -> Result<RunReport> {
        info!("Scanning for flight folders");
        let flights = discover_flights(&self.config.root_dir, &self.config)?;
        info!(flights = flights.len(), "Discovery complete");

        let mut report = RunReport::default();
        for flight in &flights {
            report.flights_visited += 1;
            self.describe_flight(flight, &mut report)?;
        }

        info!(
            written = report.written.len(),
            images_skipped = report.images_skipped(),
            folders_skipped = report.folders_skipped(),
            "Run complete"
        );
        Ok(report)
    }

    #[instrument(skip_all, fields(flight = %flight.root.display()))]
    pub fn describe_flight(&self, flight: &FlightFolder, report: &mut RunReport) -> Result<()> {
        let Some(csv_path) = &flight.metadata_csv else {
            debug!("{} images left undescribed", flight.images.len());
            report.skip(&flight.root, SkipReason::MissingTelemetry);
            return Ok(());
        };

        if flight.images.is_empty() {
            debug!("No rasters in {}", flight.ortho_dir.display());
            return Ok(());
        }

        let timer = Timer::start("aggregate_telemetry");
        let aggregated = self.aggregator.aggregate(csv_path);
        let (name, duration) = timer.stop();
        report.timings.add_step(name, duration);

        let summary = match aggregated {
            Ok(Some(summary)) => summary,
            Ok(None) => {
                report.skip(&flight.root, SkipReason::NoTelemetryColumns);
                return Ok(());
            }
            Err(e) if !e.is_fatal() => {
                report.skip(&flight.root, SkipReason::TelemetryUnreadable(e.to_string()));
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        for image in &flight.images {
            match self.describe_image(image, &flight.ortho_dir, &summary, &mut report.timings) {
                Ok(output) => report.written.push(output),
                Err(e) if !e.is_fatal() => {
                    report.skip(image, SkipReason::RasterUnreadable(e.to_string()));
                }
                Err(e) => {
                    error!("Aborting at {}: {}", image.display(), e);
                    return Err(e);
                }
            }
        }

        Ok(())
    }

    /// Reads tags and bounds for one image and writes its sidecar.
    #[instrument(skip_all, fields(image = %image_path.display()))]
    pub fn describe_image(
        &self,
        image_path: &Path,
        ortho_dir: &Path,
        summary: &FlightSummary,
        timings: &mut RunTimings,
    ) -> Result<PathBuf> {
        let timer = Timer::start("read_tags");
        let tags = self.tag_reader.read_tags(image_path)?;
        let (name, duration) = timer.stop();
        timings.add_step(name, duration);

        let timer = Timer::start("read_bounds");
        let bbox = self.bounds_reader.read_bounds(image_path)?;
        let (name, duration) = timer.stop();
        timings.add_step(name, duration);

        let metadata = OrthoMetadata::merge(summary, &tags, bbox);
        let output_path = sidecar_path(ortho_dir, image_path);

        let timer = Timer::start("write_metadata");
        self.writer.write_metadata(&metadata, &output_path)?;
        let (name, duration) = timer.stop();
        timings.add_step(name, duration);

        info!(output = %output_path.display(), "Metadata written");
        Ok(output_path)
    }

    pub fn config(&self) -> &DescribeConfig {
        &self.config
    }
}
