//! Telemetry aggregation over `metadata.csv` using the csv crate.
//!
//! Each of the seven expected columns is located independently in the header
//! and reduced on its own, so a missing or garbled column only nulls its own
//! field:
//! - numeric columns reduce to their median
//! - categorical columns reduce to their mode
//! - timestamp columns reduce to their earliest value

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::ortho_pipeline::common::error::{DescribeError, Result};
use crate::ortho_pipeline::telemetry::aggregator::TelemetryAggregator;
use crate::ortho_pipeline::telemetry::stats;
use crate::ortho_pipeline::telemetry::types::{
    ColumnOutcome, FlightSummary, TelemetryColumn, Timestamp,
};

/// Telemetry aggregator reading comma separated files with a header row.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvTelemetryAggregator;

/// Raw cells of the expected columns, in `TelemetryColumn::ALL` order
struct ColumnCells {
    cells: [Option<Vec<String>>; 7],
}

impl ColumnCells {
    fn get(&self, column: TelemetryColumn) -> Option<&[String]> {
        self.cells[column as usize].as_deref()
    }

    fn present(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    fn numeric(&self, column: TelemetryColumn, strip_sign: bool) -> ColumnOutcome<f64> {
        let Some(cells) = self.get(column) else {
            return ColumnOutcome::Absent;
        };
        let values: Vec<f64> = cells
            .iter()
            .filter_map(|c| stats::parse_number(c, strip_sign))
            .collect();
        match stats::median(&values) {
            Some(v) => ColumnOutcome::Value(v),
            None => ColumnOutcome::NoUsableValues,
        }
    }

    fn categorical(&self, column: TelemetryColumn) -> ColumnOutcome<String> {
        let Some(cells) = self.get(column) else {
            return ColumnOutcome::Absent;
        };
        let values = cells.iter().map(|c| c.trim()).filter(|c| !c.is_empty());
        match stats::mode(values) {
            Some(v) => ColumnOutcome::Value(v),
            None => ColumnOutcome::NoUsableValues,
        }
    }

    fn timestamp(&self, column: TelemetryColumn) -> ColumnOutcome<Timestamp> {
        let Some(cells) = self.get(column) else {
            return ColumnOutcome::Absent;
        };
        let values: Vec<_> = cells.iter().filter_map(|c| stats::parse_timestamp(c)).collect();
        match stats::earliest(&values) {
            Some(v) => ColumnOutcome::Value(v),
            None => ColumnOutcome::NoUsableValues,
        }
    }
}

fn resolve<T: std::fmt::Debug>(column: TelemetryColumn, outcome: ColumnOutcome<T>) -> Option<T> {
    match &outcome {
        ColumnOutcome::Absent => debug!("Column '{}' absent", column.header()),
        ColumnOutcome::NoUsableValues => debug!("Column '{}' has no usable values", column.header()),
        ColumnOutcome::Value(v) => debug!("Column '{}' -> {:?}", column.header(), v),
    }
    outcome.into_option()
}

impl CsvTelemetryAggregator {
    /// Aggregates telemetry from any CSV source.
    pub fn aggregate_reader<R: Read>(&self, reader: R) -> Result<Option<FlightSummary>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = csv_reader
            .byte_headers()
            .map_err(|e| DescribeError::TelemetryReadError(e.to_string()))?
            .clone();

        let indices: Vec<Option<usize>> = TelemetryColumn::ALL
            .iter()
            .map(|column| {
                headers.iter().position(|h| {
                    std::str::from_utf8(h)
                        .is_ok_and(|h| h.trim_start_matches('\u{feff}') == column.header())
                })
            })
            .collect();

        let mut cells: [Option<Vec<String>>; 7] = Default::default();
        for (slot, idx) in cells.iter_mut().zip(&indices) {
            if idx.is_some() {
                *slot = Some(Vec::new());
            }
        }

        // undecodable cells count as empty; other columns are never decoded
        for record in csv_reader.byte_records() {
            let record = record.map_err(|e| DescribeError::TelemetryReadError(e.to_string()))?;
            for (slot, idx) in cells.iter_mut().zip(&indices) {
                if let (Some(values), Some(idx)) = (slot.as_mut(), idx) {
                    let cell = record
                        .get(*idx)
                        .and_then(|bytes| std::str::from_utf8(bytes).ok())
                        .unwrap_or_default();
                    values.push(cell.to_string());
                }
            }
        }

        let columns = ColumnCells { cells };
        if columns.present() == 0 {
            return Ok(None);
        }

        use TelemetryColumn::*;
        Ok(Some(FlightSummary {
            gps_altitude: resolve(GpsAltitude, columns.numeric(GpsAltitude, false)),
            relative_altitude: resolve(RelativeAltitude, columns.numeric(RelativeAltitude, true)),
            camera_model_name: resolve(CameraModelName, columns.categorical(CameraModelName)),
            drone_model: resolve(DroneModel, columns.categorical(DroneModel)),
            create_date: resolve(CreateDate, columns.timestamp(CreateDate)),
            utc_at_exposure: resolve(UtcAtExposure, columns.timestamp(UtcAtExposure)),
            gps_status: resolve(GpsStatus, columns.categorical(GpsStatus)),
        }))
    }
}

impl TelemetryAggregator for CsvTelemetryAggregator {
    fn aggregate(&self, csv_path: &Path) -> Result<Option<FlightSummary>> {
        debug!("Aggregating telemetry from {}", csv_path.display());

        let file = File::open(csv_path).map_err(|e| {
            DescribeError::TelemetryReadError(format!("{}: {}", csv_path.display(), e))
        })?;

        let summary = self.aggregate_reader(file).map_err(|e| match e {
            DescribeError::TelemetryReadError(msg) => {
                DescribeError::TelemetryReadError(format!("{}: {}", csv_path.display(), msg))
            }
            other => other,
        })?;

        if summary.is_none() {
            debug!("None of the expected telemetry columns found in {}", csv_path.display());
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_CSV: &str = "\
SourceFile,GPS Altitude,Relative Altitude,Camera Model Name,Drone Model,Create Date,UTC At Exposure,Gps Status
IMG_0001.JPG,120.5,+80.1,M3M,Mavic 3M,2023:06:01 10:15:32,2023:06:01 08:15:32.250,A
IMG_0002.JPG,121.5,+80.3,M3M,Mavic 3M,2023:06:01 10:15:30,2023:06:01 08:15:30,A
IMG_0003.JPG,119.0,+79.9,FC6310,Mavic 3M,2023:06:01 10:15:34,2023:06:01 08:15:34,V
IMG_0004.JPG,122.0,+81.0,M3M,Mavic 3M,2023:06:01 10:15:36,2023:06:01 08:15:36,A
";

    #[test]
    fn test_full_csv_matches_reference_reductions() {
        let summary = CsvTelemetryAggregator
            .aggregate_reader(FULL_CSV.as_bytes())
            .unwrap()
            .unwrap();

        // sorted gps: 119.0 120.5 121.5 122.0 -> (120.5 + 121.5) / 2
        assert_eq!(summary.gps_altitude, Some(121.0));
        // sorted rel: 79.9 80.1 80.3 81.0 -> (80.1 + 80.3) / 2
        assert!((summary.relative_altitude.unwrap() - 80.2).abs() < 1e-9);
        assert_eq!(summary.camera_model_name.as_deref(), Some("M3M"));
        assert_eq!(summary.drone_model.as_deref(), Some("Mavic 3M"));
        assert_eq!(
            summary.create_date.map(|t| t.to_iso8601()).as_deref(),
            Some("2023-06-01T10:15:30")
        );
        assert_eq!(
            summary.utc_at_exposure.map(|t| t.to_iso8601()).as_deref(),
            Some("2023-06-01T08:15:30")
        );
        assert_eq!(summary.gps_status.as_deref(), Some("A"));
    }

    #[test]
    fn test_missing_relative_altitude_only_nulls_that_field() {
        let csv = "\
GPS Altitude,Camera Model Name,Drone Model,Create Date,UTC At Exposure,Gps Status
100,M3M,Mavic 3M,2023:06:01 10:15:30,2023:06:01 08:15:30,A
";
        let summary = CsvTelemetryAggregator
            .aggregate_reader(csv.as_bytes())
            .unwrap()
            .unwrap();

        assert_eq!(summary.relative_altitude, None);
        assert_eq!(summary.gps_altitude, Some(100.0));
        assert_eq!(summary.camera_model_name.as_deref(), Some("M3M"));
        assert_eq!(summary.drone_model.as_deref(), Some("Mavic 3M"));
        assert!(summary.create_date.is_some());
        assert!(summary.utc_at_exposure.is_some());
        assert_eq!(summary.gps_status.as_deref(), Some("A"));
    }

    #[test]
    fn test_no_expected_columns_gives_none() {
        let csv = "SourceFile,Yaw\nIMG_0001.JPG,12.0\n";
        let summary = CsvTelemetryAggregator.aggregate_reader(csv.as_bytes()).unwrap();

        assert!(summary.is_none());
    }

    #[test]
    fn test_empty_and_unparsable_cells_degrade_to_null() {
        let csv = "\
GPS Altitude,Relative Altitude,Create Date,Gps Status
,abc,yesterday,
,,,
";
        let summary = CsvTelemetryAggregator
            .aggregate_reader(csv.as_bytes())
            .unwrap()
            .unwrap();

        assert_eq!(summary, FlightSummary::default());
    }

    #[test]
    fn test_header_only_csv_is_all_null() {
        let csv = "GPS Altitude,Drone Model\n";
        let summary = CsvTelemetryAggregator
            .aggregate_reader(csv.as_bytes())
            .unwrap()
            .unwrap();

        assert_eq!(summary, FlightSummary::default());
    }

    #[test]
    fn test_short_rows_and_offsets() {
        let csv = "\
Gps Status,UTC At Exposure
A,2023:06:01 10:00:00+02:00
V
A,2023:06:01 09:00:00Z
";
        let summary = CsvTelemetryAggregator
            .aggregate_reader(csv.as_bytes())
            .unwrap()
            .unwrap();

        assert_eq!(summary.gps_status.as_deref(), Some("A"));
        let utc = summary.utc_at_exposure.unwrap();
        assert!(matches!(utc, Timestamp::Zoned(_)));
        assert_eq!(utc.to_iso8601(), "2023-06-01T10:00:00+02:00");
    }

    #[test]
    fn test_invalid_utf8_outside_expected_columns_is_ignored() {
        let csv = b"SourceFile,GPS Altitude,Gps Status\n\
IMG_\xe9t\xe9.JPG,120.0,A\n\
IMG_\xe9t\xe9_2.JPG,122.0,A\n";
        let summary = CsvTelemetryAggregator
            .aggregate_reader(&csv[..])
            .unwrap()
            .unwrap();

        assert_eq!(summary.gps_altitude, Some(121.0));
        assert_eq!(summary.gps_status.as_deref(), Some("A"));
    }

    #[test]
    fn test_invalid_utf8_cell_only_drops_that_value() {
        let csv = b"GPS Altitude,Drone Model\n\
120.0,M\xe9vic\n\
122.0,\xff\n";
        let summary = CsvTelemetryAggregator
            .aggregate_reader(&csv[..])
            .unwrap()
            .unwrap();

        assert_eq!(summary.gps_altitude, Some(121.0));
        assert_eq!(summary.drone_model, None);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = CsvTelemetryAggregator.aggregate(&dir.path().join("metadata.csv"));

        assert!(matches!(result, Err(DescribeError::TelemetryReadError(_))));
    }

    #[test]
    fn test_aggregate_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.csv");
        std::fs::write(&path, FULL_CSV).unwrap();

        let summary = CsvTelemetryAggregator.aggregate(&path).unwrap().unwrap();

        assert_eq!(summary.gps_altitude, Some(121.0));
    }
}
