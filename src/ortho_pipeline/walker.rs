//! Flight folder discovery
//!
//! Finds flight directories holding an `ortho` folder of rasters and a
//! telemetry CSV next to it.

mod flight_walker;
pub mod types;

pub use flight_walker::{discover_flights, list_rasters};
pub use types::FlightFolder;
