//! Telemetry summary types

use chrono::{DateTime, FixedOffset, NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};

/// Columns of `metadata.csv` the aggregator consumes. Discriminants follow `ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryColumn {
    GpsAltitude,
    RelativeAltitude,
    CameraModelName,
    DroneModel,
    CreateDate,
    UtcAtExposure,
    GpsStatus,
}

impl TelemetryColumn {
    pub const ALL: [TelemetryColumn; 7] = [
        TelemetryColumn::GpsAltitude,
        TelemetryColumn::RelativeAltitude,
        TelemetryColumn::CameraModelName,
        TelemetryColumn::DroneModel,
        TelemetryColumn::CreateDate,
        TelemetryColumn::UtcAtExposure,
        TelemetryColumn::GpsStatus,
    ];

    /// Header name as written by the flight logger
    pub fn header(self) -> &'static str {
        match self {
            TelemetryColumn::GpsAltitude => "GPS Altitude",
            TelemetryColumn::RelativeAltitude => "Relative Altitude",
            TelemetryColumn::CameraModelName => "Camera Model Name",
            TelemetryColumn::DroneModel => "Drone Model",
            TelemetryColumn::CreateDate => "Create Date",
            TelemetryColumn::UtcAtExposure => "UTC At Exposure",
            TelemetryColumn::GpsStatus => "Gps Status",
        }
    }
}

/// Result of reducing one column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnOutcome<T> {
    /// Reduced value over the usable cells
    Value(T),
    /// Column not in the CSV header
    Absent,
    /// Column present, but no cell was usable
    NoUsableValues,
}

impl<T> ColumnOutcome<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            ColumnOutcome::Value(v) => Some(v),
            ColumnOutcome::Absent | ColumnOutcome::NoUsableValues => None,
        }
    }
}

/// Acquisition timestamp, with or without an explicit UTC offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    Naive(NaiveDateTime),
    Zoned(DateTime<FixedOffset>),
}

impl Timestamp {
    /// Ordering key. Naive values are taken as UTC.
    pub fn instant(&self) -> NaiveDateTime {
        match self {
            Timestamp::Naive(dt) => *dt,
            Timestamp::Zoned(dt) => dt.naive_utc(),
        }
    }

    /// `YYYY-MM-DDThh:mm:ss[.ffffff][+hh:mm]`; the fraction is printed as
    /// microseconds and only when non-zero.
    pub fn to_iso8601(&self) -> String {
        let fraction = if self.instant().nanosecond() / 1_000 == 0 { "" } else { "%.6f" };
        match self {
            Timestamp::Naive(dt) => dt.format(&format!("%Y-%m-%dT%H:%M:%S{fraction}")).to_string(),
            Timestamp::Zoned(dt) => dt
                .format(&format!("%Y-%m-%dT%H:%M:%S{fraction}%:z"))
                .to_string(),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

/// Flight-level aggregate of the telemetry rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlightSummary {
    /// Median GPS altitude
    pub gps_altitude: Option<f64>,
    /// Median altitude above the take-off point
    pub relative_altitude: Option<f64>,
    /// Most frequent camera model
    pub camera_model_name: Option<String>,
    /// Most frequent drone model
    pub drone_model: Option<String>,
    /// Earliest creation timestamp
    pub create_date: Option<Timestamp>,
    /// Earliest exposure timestamp
    pub utc_at_exposure: Option<Timestamp>,
    /// Most frequent GPS status
    pub gps_status: Option<String>,
}
