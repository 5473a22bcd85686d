// src/gps/coordinate.rs
//! WGS84 coordinates stored as fixed-point milli-arcseconds

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde::Deserialize;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Milli-arcseconds per degree
const MAS_PER_DEGREE: i64 = 60 * 60 * 1000;

/// Nautical mile in meters
const NAUTICAL_MILE_M: f64 = 1852.0;

/// One axis of a coordinate split into degrees, minutes, seconds and milliseconds.
///
/// The sign is kept separately so that values between 0° and -1° survive the split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dms {
    pub negative: bool,
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub milliseconds: u32,
}

impl Dms {
    pub fn new(negative: bool, degrees: u32, minutes: u32, seconds: u32, milliseconds: u32) -> Self {
        Self {
            negative,
            degrees,
            minutes,
            seconds,
            milliseconds,
        }
    }

    fn from_mas(mas: i32) -> Self {
        let abs = mas.unsigned_abs();
        Self {
            negative: mas < 0,
            degrees: abs / (60 * 60 * 1000),
            minutes: (abs / (60 * 1000)) % 60,
            seconds: (abs / 1000) % 60,
            milliseconds: abs % 1000,
        }
    }

    fn to_mas(self) -> i64 {
        let abs = ((i64::from(self.degrees) * 60 + i64::from(self.minutes)) * 60
            + i64::from(self.seconds))
            * 1000
            + i64::from(self.milliseconds);
        if self.negative {
            -abs
        } else {
            abs
        }
    }

    fn components_valid(&self, max_degrees: u32) -> bool {
        self.degrees <= max_degrees
            && self.minutes < 60
            && self.seconds < 60
            && self.milliseconds < 1000
    }
}

/// Text representations for a coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoordinateFormat {
    /// `N 48°07.038`
    #[default]
    DegreesMinutes,
    /// `N 48°07'02.280`
    DegreesMinutesSeconds,
    /// `-6.50562000`
    SignedDegrees,
    /// `W 6.50562000`
    HemisphereDegrees,
}

impl FromStr for CoordinateFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "dm" | "degrees-minutes" => Ok(CoordinateFormat::DegreesMinutes),
            "dms" | "degrees-minutes-seconds" => Ok(CoordinateFormat::DegreesMinutesSeconds),
            "signed" | "signed-degrees" => Ok(CoordinateFormat::SignedDegrees),
            "hemisphere" | "hemisphere-degrees" => Ok(CoordinateFormat::HemisphereDegrees),
            _ => Err(format!("unknown coordinate format: {}", s)),
        }
    }
}

/// Earth coordinate in WGS84.
///
/// Latitude and longitude are held in milli-arcseconds so that the
/// degree/minute/second accessors are exact. A coordinate is either valid
/// (latitude within ±90°, longitude within ±180°) or explicitly invalid; the
/// default value is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coordinate {
    latitude: i32,
    longitude: i32,
    valid: bool,
}

impl Coordinate {
    /// Creates a coordinate from decimal degrees, rounding to the nearest
    /// milli-arcsecond. Out of range input gives an invalid coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        let in_range = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
        if !in_range {
            return Self::invalid();
        }

        Self {
            latitude: (latitude * MAS_PER_DEGREE as f64 + 0.5).floor() as i32,
            longitude: (longitude * MAS_PER_DEGREE as f64 + 0.5).floor() as i32,
            valid: true,
        }
    }

    /// Creates a coordinate from sexagesimal components. Each component is
    /// range-checked; a violation marks the coordinate invalid.
    pub fn from_components(latitude: Dms, longitude: Dms) -> Self {
        let lat = latitude.to_mas();
        let long = longitude.to_mas();

        let valid = latitude.components_valid(90)
            && longitude.components_valid(180)
            && lat.abs() <= 90 * MAS_PER_DEGREE
            && long.abs() <= 180 * MAS_PER_DEGREE;

        Self {
            latitude: i32::try_from(lat).unwrap_or(0),
            longitude: i32::try_from(long).unwrap_or(0),
            valid,
        }
    }

    /// Creates a coordinate from raw milli-arcsecond values
    pub fn from_milli_arcseconds(latitude: i32, longitude: i32) -> Self {
        let valid = i64::from(latitude).abs() <= 90 * MAS_PER_DEGREE
            && i64::from(longitude).abs() <= 180 * MAS_PER_DEGREE;
        Self {
            latitude,
            longitude,
            valid,
        }
    }

    pub fn invalid() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Latitude in decimal degrees, south negative
    pub fn latitude(&self) -> f64 {
        self.latitude as f64 / MAS_PER_DEGREE as f64
    }

    /// Longitude in decimal degrees, west negative
    pub fn longitude(&self) -> f64 {
        self.longitude as f64 / MAS_PER_DEGREE as f64
    }

    /// Raw latitude and longitude in milli-arcseconds
    pub fn milli_arcseconds(&self) -> (i32, i32) {
        (self.latitude, self.longitude)
    }

    pub fn latitude_dms(&self) -> Dms {
        Dms::from_mas(self.latitude)
    }

    pub fn longitude_dms(&self) -> Dms {
        Dms::from_mas(self.longitude)
    }

    /// Great-circle distance in meters (haversine on a sphere of one
    /// nautical mile per arc minute).
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude().to_radians();
        let lon1 = self.longitude().to_radians();
        let lat2 = other.latitude().to_radians();
        let lon2 = other.longitude().to_radians();

        let n1 = ((lat1 - lat2) / 2.0).sin();
        let n2 = ((lon1 - lon2) / 2.0).sin();

        let d = n1 * n1 + lat1.cos() * lat2.cos() * n2 * n2;
        let d = 2.0 * d.sqrt().asin();

        NAUTICAL_MILE_M * radians_to_nautical_miles(d)
    }

    /// Formats latitude and longitude separately
    pub fn format(&self, format: CoordinateFormat) -> (String, String) {
        let lat_hemisphere = if self.latitude >= 0 { 'N' } else { 'S' };
        let long_hemisphere = if self.longitude >= 0 { 'E' } else { 'W' };

        (
            format_axis(self.latitude, self.latitude(), lat_hemisphere, format),
            format_axis(self.longitude, self.longitude(), long_hemisphere, format),
        )
    }
}

fn radians_to_nautical_miles(rad: f64) -> f64 {
    ((180.0 * 60.0) / PI) * rad
}

fn format_axis(mas: i32, degrees: f64, hemisphere: char, format: CoordinateFormat) -> String {
    let dms = Dms::from_mas(mas);
    match format {
        CoordinateFormat::DegreesMinutes => {
            // thousandths of a minute
            let fraction = (dms.seconds * 1000 + dms.milliseconds) / 60;
            format!("{} {}°{:02}.{:03}", hemisphere, dms.degrees, dms.minutes, fraction)
        }
        CoordinateFormat::DegreesMinutesSeconds => format!(
            "{} {}°{:02}'{:02}.{:03}",
            hemisphere, dms.degrees, dms.minutes, dms.seconds, dms.milliseconds
        ),
        CoordinateFormat::SignedDegrees => format!("{:.8}", degrees),
        CoordinateFormat::HemisphereDegrees => format!("{} {:.8}", hemisphere, degrees.abs()),
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid {
            return write!(f, "invalid");
        }
        let (lat, long) = self.format(CoordinateFormat::DegreesMinutes);
        write!(f, "{} {}", lat, long)
    }
}

impl Serialize for Coordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if !self.valid {
            return serializer.serialize_none();
        }
        let mut state = serializer.serialize_struct("Coordinate", 2)?;
        state.serialize_field("latitude", &self.latitude())?;
        state.serialize_field("longitude", &self.longitude())?;
        state.end()
    }
}
