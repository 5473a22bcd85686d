// src/gps/data.rs
//! Position and satellite data assembled from NMEA sentences

use super::coordinate::Coordinate;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Information about one satellite in view.
///
/// Ordering compares the satellite ID first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SatelliteInfo {
    pub id: u32,             // Satellite PRN/ID number
    pub azimuth: u32,        // Azimuth in degrees, 0..360
    pub elevation: u32,      // Elevation in degrees, 0..90
    pub snr: u32,            // Signal-to-noise ratio in dB; 0 when not tracked
    pub used_for_fix: bool,  // Whether the last GSA listed this satellite
}

impl SatelliteInfo {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// GNSS constellation guessed from the NMEA satellite ID range
    pub fn constellation(&self) -> &'static str {
        match self.id {
            1..=32 => "GPS",
            33..=64 => "SBAS",
            65..=96 => "GLONASS",
            120..=163 => "BEIDOU",
            193..=197 => "QZSS",
            211..=246 => "GALILEO",
            _ => "UNKNOWN",
        }
    }
}

/// Current position, speed and direction.
///
/// Filled field by field as sentences arrive:
/// - coordinate: GGA, GLL, RMC, GNS
/// - position precision: GGA, GSA, GNS
/// - altitude, geoid height: GGA, GNS
/// - speed: RMC, VTG
/// - angle, magnetic variation: RMC
/// - timestamp: RMC sets it, GGA/GLL/GNS move the time of day
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PositionInfo {
    pub coordinate: Coordinate,
    pub position_precision: f64,  // HDOP
    pub altitude: f64,            // meters above mean sea level
    pub geoid_height: f64,        // meters, mean sea level above the WGS84 ellipsoid
    pub speed: f64,               // km/h
    pub angle: f64,               // degrees, true north
    pub magnetic_variation: f64,  // degrees, west negative
    pub timestamp: Option<DateTime<Utc>>,
}

impl PositionInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a coordinate has been received
    pub fn has_fix(&self) -> bool {
        self.coordinate.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_constellation_ranges() {
        assert_eq!(SatelliteInfo::new(7).constellation(), "GPS");
        assert_eq!(SatelliteInfo::new(70).constellation(), "GLONASS");
        assert_eq!(SatelliteInfo::new(220).constellation(), "GALILEO");
        assert_eq!(SatelliteInfo::new(0).constellation(), "UNKNOWN");
    }

    #[test]
    fn test_satellites_order_by_id() {
        let mut used = SatelliteInfo::new(3);
        used.used_for_fix = true;
        let set: BTreeSet<_> = [SatelliteInfo::new(12), used, SatelliteInfo::new(5)]
            .into_iter()
            .collect();
        let ids: Vec<u32> = set.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 5, 12]);
    }

    #[test]
    fn test_new_position_has_no_fix() {
        let info = PositionInfo::new();
        assert!(!info.has_fix());
        assert!(info.timestamp.is_none());
    }
}
