// src/lib.rs
//! NMEA Geotag Library
//!
//! Decodes NMEA 0183 sentences from GPS receivers or log files, merges them
//! into a position and satellite picture and records a time-indexed track
//! that photo capture times can be looked up against.

pub mod config;
pub mod error;
pub mod export;
pub mod gps;
pub mod import;
pub mod monitor;
pub mod nmea;

// Re-export main types for convenience
pub use error::{GpsError, NmeaError, Result};
pub use gps::{Coordinate, CoordinateFormat, PositionInfo, SatelliteInfo, Track, TrackPoint, TrackRecorder};
pub use monitor::Receiver;
pub use nmea::{Parser, Sentence, SentenceData, SentenceType};
