// src/nmea/fields.rs
//! Decoders for the primitive sub-fields shared by several sentence types

use crate::error::NmeaError;
use crate::gps::coordinate::{Coordinate, Dms};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

type Result<T> = std::result::Result<T, NmeaError>;

/// FAA mode indicator (NMEA 2.3 and later)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaaMode {
    NotValid,
    Autonomous,
    Differential,
    Precise,
    RealTimeKinematic,
    FloatRtk,
    Estimated,
    Manual,
    Simulator,
}

impl FaaMode {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(FaaMode::NotValid),
            'A' => Some(FaaMode::Autonomous),
            'D' => Some(FaaMode::Differential),
            'P' => Some(FaaMode::Precise),
            'R' => Some(FaaMode::RealTimeKinematic),
            'F' => Some(FaaMode::FloatRtk),
            'E' => Some(FaaMode::Estimated),
            'M' => Some(FaaMode::Manual),
            'S' => Some(FaaMode::Simulator),
            _ => None,
        }
    }
}

/// 8-bit XOR over `data`
pub fn checksum(data: &[u8]) -> u8 {
    data.iter().fold(0, |acc, byte| acc ^ byte)
}

/// Parses `hhmmss` or `hhmmss.sss` into a time of day.
pub fn parse_utc_time(field: &str) -> Result<NaiveTime> {
    let invalid = || NmeaError::invalid("UTC time", field);
    let bytes = field.as_bytes();

    if bytes.len() < 6 || !bytes[..6].iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }

    let millis = if bytes.len() == 6 {
        0
    } else {
        let fraction = &bytes[7..];
        if bytes[6] != b'.' || fraction.is_empty() || !fraction.iter().all(u8::is_ascii_digit) {
            return Err(invalid());
        }
        let value: f64 = format!("0{}", &field[6..]).parse().map_err(|_| invalid())?;
        (value * 1000.0 + 0.5).floor() as u32
    };

    let hours = two_digits(&bytes[0..2]);
    let minutes = two_digits(&bytes[2..4]);
    let seconds = two_digits(&bytes[4..6]);

    if hours >= 24 || minutes > 59 || seconds > 59 || millis > 999 {
        return Err(invalid());
    }

    NaiveTime::from_hms_milli_opt(hours, minutes, seconds, millis).ok_or_else(invalid)
}

/// Parses a `ddmmyy` date together with a UTC time field.
///
/// Two-digit years below 80 are taken as 20xx, all others as 19xx, so dates
/// are resolved correctly from 1980 through 2079.
pub fn parse_utc_date_time(date: &str, time: &str) -> Result<DateTime<Utc>> {
    let invalid = || NmeaError::invalid("UTC date", date);
    let bytes = date.as_bytes();

    if bytes.len() != 6 || !bytes.iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }

    let day = two_digits(&bytes[0..2]);
    let month = two_digits(&bytes[2..4]);
    let year = two_digits(&bytes[4..6]) as i32;
    let year = if year < 80 { 2000 + year } else { 1900 + year };

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
    let time = parse_utc_time(time)?;

    Ok(date.and_time(time).and_utc())
}

/// Parses an NMEA `ddmm.mmmm` / `dddmm.mmmm` pair with hemisphere letters.
///
/// Four empty fields mean the receiver has no position and give an invalid
/// coordinate instead of an error.
pub fn parse_lat_long(
    latitude: &str,
    latitude_dir: &str,
    longitude: &str,
    longitude_dir: &str,
) -> Result<Coordinate> {
    if latitude.is_empty() && latitude_dir.is_empty() && longitude.is_empty() && longitude_dir.is_empty() {
        return Ok(Coordinate::invalid());
    }

    let lat_south = match latitude_dir {
        "N" => false,
        "S" => true,
        _ => return Err(NmeaError::invalid("latitude", &format!("{}{}", latitude_dir, latitude))),
    };
    let long_west = match longitude_dir {
        "E" => false,
        "W" => true,
        _ => {
            return Err(NmeaError::invalid(
                "longitude",
                &format!("{}{}", longitude_dir, longitude),
            ))
        }
    };

    let lat = parse_angle(latitude, lat_south)
        .ok_or_else(|| NmeaError::invalid("latitude", &format!("{}{}", latitude_dir, latitude)))?;
    let long = parse_angle(longitude, long_west)
        .ok_or_else(|| NmeaError::invalid("longitude", &format!("{}{}", longitude_dir, longitude)))?;

    let coord = Coordinate::from_components(lat, long);
    if !coord.is_valid() {
        return Err(NmeaError::invalid(
            "lat/long",
            &format!("{}{} / {}{}", latitude_dir, latitude, longitude_dir, longitude),
        ));
    }

    Ok(coord)
}

/// Parses a single-character FAA mode indicator
pub fn parse_faa_mode(field: &str) -> Result<FaaMode> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => FaaMode::from_char(c).ok_or_else(|| NmeaError::invalid("FAA mode", field)),
        _ => Err(NmeaError::invalid("FAA mode", field)),
    }
}

/// Unsigned integer field; a null field reads as 0.
pub(crate) fn parse_uint(field: &str, what: &'static str) -> Result<u32> {
    if field.is_empty() {
        return Ok(0);
    }
    field.parse().map_err(|_| NmeaError::invalid(what, field))
}

/// Decimal field; a null field reads as 0.0.
pub(crate) fn parse_float(field: &str, what: &'static str) -> Result<f64> {
    if field.is_empty() {
        return Ok(0.0);
    }
    field
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| NmeaError::invalid(what, field))
}

fn two_digits(digits: &[u8]) -> u32 {
    u32::from(digits[0] - b'0') * 10 + u32::from(digits[1] - b'0')
}

/// `[d]ddmm.mmmm` to sexagesimal components, rounded to milli-arcseconds
fn parse_angle(field: &str, negative: bool) -> Option<Dms> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    let value: f64 = field.parse().ok()?;

    let degrees = (value / 100.0).trunc();
    let minutes = value - degrees * 100.0;
    if degrees > 180.0 || minutes >= 60.0 {
        return None;
    }

    let total = degrees as u64 * 3_600_000 + (minutes * 60_000.0 + 0.5).floor() as u64;
    Some(Dms::new(
        negative,
        u32::try_from(total / 3_600_000).ok()?,
        ((total / 60_000) % 60) as u32,
        ((total / 1000) % 60) as u32,
        (total % 1000) as u32,
    ))
}
