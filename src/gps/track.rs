// src/gps/track.rs
//! Time-indexed track of recorded positions

use super::coordinate::Coordinate;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// A coordinate together with the time it was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrackPoint {
    pub coordinate: Coordinate,
    pub timestamp: DateTime<Utc>,
}

impl TrackPoint {
    pub fn new(coordinate: Coordinate, timestamp: DateTime<Utc>) -> Self {
        Self {
            coordinate,
            timestamp,
        }
    }
}

/// Append-only track.
///
/// Points are kept in insertion order; a second view indexes them by
/// timestamp. When several points share a timestamp, the index keeps the one
/// added first.
#[derive(Debug, Clone, Default)]
pub struct Track {
    points: Vec<TrackPoint>,
    by_time: BTreeMap<DateTime<Utc>, usize>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_point(&mut self, coordinate: Coordinate, timestamp: DateTime<Utc>) {
        let index = self.points.len();
        self.points.push(TrackPoint::new(coordinate, timestamp));
        self.by_time.entry(timestamp).or_insert(index);
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in insertion order
    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    /// Points in ascending time order, one per distinct timestamp
    pub fn points_by_time(&self) -> impl Iterator<Item = &TrackPoint> + '_ {
        self.by_time.values().map(move |&index| &self.points[index])
    }

    /// Earliest timestamp; `None` for an empty track
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.by_time.keys().next().copied()
    }

    /// Latest timestamp; `None` for an empty track
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.by_time.keys().next_back().copied()
    }

    /// Returns the first point recorded at or after `timestamp`.
    ///
    /// Despite the name this is a lower-bound search, not the point with the
    /// smallest absolute time difference: a photo taken just after a fix is
    /// matched with the following fix. Returns `None` past the end of the track.
    pub fn find_nearest(&self, timestamp: DateTime<Utc>) -> Option<TrackPoint> {
        self.by_time
            .range(timestamp..)
            .next()
            .map(|(_, &index)| self.points[index])
    }

    /// Whether `timestamp` lies between the start and end time, inclusive
    pub fn in_track_range(&self, timestamp: DateTime<Utc>) -> bool {
        match (self.start_time(), self.end_time()) {
            (Some(start), Some(end)) => start <= timestamp && timestamp <= end,
            _ => false,
        }
    }

    /// Sum of the distances between consecutive points, in meters
    pub fn total_distance(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].coordinate.distance_to(&pair[1].coordinate))
            .sum()
    }
}
