// src/nmea/sentence.rs
//! Framing of a raw NMEA 0183 line into a typed sentence with field slices

use super::fields::checksum;
use crate::error::NmeaError;

/// Talker prefixes of satellite systems: GPS, GLONASS, Galileo, multi-GNSS
const TALKERS: [&str; 4] = ["$GP", "$GL", "$GA", "$GN"];

/// Prefix of manufacturer specific sentences
const PRIVATE_PREFIX: &str = "$P";

/// Supported NMEA 0183 sentence types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentenceType {
    /// Global Positioning System fix data
    Gga,
    /// DOP and active satellites
    Gsa,
    /// Recommended minimum navigation information
    Rmc,
    /// Track made good and ground speed
    Vtg,
    /// Satellites in view
    Gsv,
    /// Geographic position, latitude/longitude
    Gll,
    /// GNSS fix data
    Gns,
    /// Manufacturer data, e.g. `$PSRFTXT`
    Private,
}

impl SentenceType {
    fn from_code(code: &str) -> Option<Self> {
        match code {
            "GGA" => Some(SentenceType::Gga),
            "GSA" => Some(SentenceType::Gsa),
            "RMC" => Some(SentenceType::Rmc),
            "VTG" => Some(SentenceType::Vtg),
            "GSV" => Some(SentenceType::Gsv),
            "GLL" => Some(SentenceType::Gll),
            "GNS" => Some(SentenceType::Gns),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SentenceType::Gga => "GGA",
            SentenceType::Gsa => "GSA",
            SentenceType::Rmc => "RMC",
            SentenceType::Vtg => "VTG",
            SentenceType::Gsv => "GSV",
            SentenceType::Gll => "GLL",
            SentenceType::Gns => "GNS",
            SentenceType::Private => "P",
        }
    }
}

/// One framed sentence.
///
/// Fields borrow from the line passed to [`Sentence::parse`]; nothing is
/// copied until a decoder asks for it. Sentences longer than the 82
/// characters NMEA 0183 allows are accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence<'a> {
    kind: SentenceType,
    raw: &'a str,
    fields: Vec<&'a str>,
}

impl<'a> Sentence<'a> {
    /// Validates prefix and checksum of `line` and splits it into fields.
    pub fn parse(line: &'a str) -> Result<Self, NmeaError> {
        let unknown = || NmeaError::UnknownSentenceType {
            sentence: line.to_string(),
        };

        let is_satellite_talker = TALKERS.iter().any(|talker| line.starts_with(talker));
        if !is_satellite_talker && !line.starts_with(PRIVATE_PREFIX) {
            return Err(unknown());
        }

        let star = line.find('*');
        if let Some(pos) = star {
            verify_checksum(line, pos)?;
        }
        let end = star.unwrap_or(line.len());

        let (kind, start) = if is_satellite_talker {
            if line.as_bytes().get(6) != Some(&b',') {
                return Err(NmeaError::invalid("sentence format", line));
            }
            let code = line.get(3..6).ok_or_else(unknown)?;
            (SentenceType::from_code(code).ok_or_else(unknown)?, 7)
        } else {
            (SentenceType::Private, PRIVATE_PREFIX.len())
        };

        let body = line
            .get(start..end)
            .ok_or_else(|| NmeaError::invalid("sentence format", line))?;

        Ok(Self {
            kind,
            raw: line,
            fields: body.split(',').collect(),
        })
    }

    pub fn kind(&self) -> SentenceType {
        self.kind
    }

    /// The complete line, including `$` and checksum
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Field text at `index`; an index past the end reads as a null field.
    pub fn field(&self, index: usize) -> &'a str {
        self.fields.get(index).copied().unwrap_or("")
    }

    pub fn is_null_field(&self, index: usize) -> bool {
        self.field(index).is_empty()
    }

    pub fn fields(&self) -> &[&'a str] {
        &self.fields
    }
}

fn verify_checksum(line: &str, star: usize) -> Result<(), NmeaError> {
    let calculated = checksum(&line.as_bytes()[1..star]);

    let received = line
        .get(star + 1..star + 3)
        .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
        .and_then(|hex| u8::from_str_radix(hex, 16).ok());

    if received != Some(calculated) {
        return Err(NmeaError::ChecksumMismatch {
            calculated,
            sentence: line.to_string(),
        });
    }
    Ok(())
}
