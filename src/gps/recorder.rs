// src/gps/recorder.rs
//! Track recording from parser updates

use super::track::Track;
use crate::nmea::Parser;
use chrono::{DateTime, Utc};
use log::trace;

/// Collects track points whenever the parser reports a new timed position.
///
/// A point is recorded once the parser has seen both a position and a
/// date/time update since its flags were last reset, the timestamp moved on
/// from the previous point and the coordinate is valid. Recording resets the
/// parser's update flags.
#[derive(Debug, Clone, Default)]
pub struct TrackRecorder {
    track: Track,
    last_timestamp: Option<DateTime<Utc>>,
    min_distance: f64, // Minimum distance in meters between points
}

impl TrackRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_min_distance(&mut self, meters: f64) {
        self.min_distance = meters.max(0.0);
    }

    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    /// Inspects the parser state and records a point if it qualifies.
    /// Returns whether a point was added.
    pub fn update(&mut self, parser: &mut Parser) -> bool {
        if !parser.updated_position_info() || !parser.updated_date_time() {
            return false;
        }

        let position = parser.position_info();
        let Some(timestamp) = position.timestamp else {
            return false;
        };
        if self.last_timestamp == Some(timestamp) {
            return false;
        }
        let coordinate = position.coordinate;

        parser.reset_update_flags();

        if !coordinate.is_valid() {
            return false;
        }

        // Check distance threshold
        if self.min_distance > 0.0 {
            if let Some(last_point) = self.track.points().last() {
                if last_point.coordinate.distance_to(&coordinate) < self.min_distance {
                    return false; // Too close to last point
                }
            }
        }

        trace!("track point {} at {}", coordinate, timestamp);
        self.track.add_point(coordinate, timestamp);
        self.last_timestamp = Some(timestamp);
        true
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn into_track(self) -> Track {
        self.track
    }

    pub fn stats(&self) -> TrackStats {
        let duration = match (self.track.start_time(), self.track.end_time()) {
            (Some(start), Some(end)) => end.signed_duration_since(start),
            _ => chrono::Duration::zero(),
        };

        TrackStats {
            points: self.track.num_points(),
            distance_km: self.track.total_distance() / 1000.0,
            duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackStats {
    pub points: usize,
    pub distance_km: f64,
    pub duration: chrono::Duration,
}

impl TrackStats {
    pub fn format_duration(&self) -> String {
        let total_seconds = self.duration.num_seconds();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
