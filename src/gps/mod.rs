// src/gps/mod.rs
//! Coordinates, position data and tracks

pub mod coordinate;
pub mod data;
pub mod recorder;
pub mod track;

pub use coordinate::{Coordinate, CoordinateFormat, Dms};
pub use data::{PositionInfo, SatelliteInfo};
pub use recorder::{TrackRecorder, TrackStats};
pub use track::{Track, TrackPoint};
