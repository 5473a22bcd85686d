// src/nmea/data.rs
//! Decoded payloads of the supported NMEA 0183 sentence types

use super::fields::{
    parse_faa_mode, parse_float, parse_lat_long, parse_uint, parse_utc_date_time, parse_utc_time,
    FaaMode,
};
use super::sentence::{Sentence, SentenceType};
use crate::error::NmeaError;
use crate::gps::coordinate::Coordinate;
use crate::gps::data::SatelliteInfo;
use chrono::{DateTime, NaiveTime, Utc};

type Result<T> = std::result::Result<T, NmeaError>;

/// 1 knot = 1 nautical mile per hour
const KNOTS_TO_KMH: f64 = 1.852;

/// GPS quality indicator from GGA
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityIndicator {
    FixNotAvailable,
    Gps,
    Dgps,
    /// PPS, RTK, float RTK, estimated, manual or simulation (3..8)
    Other,
}

/// GSA selection mode; manual means the receiver is forced to 2D or 3D
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Automatic,
    Manual,
}

/// GSA fix mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixMode {
    Unknown,
    NoFix,
    Fix2D,
    Fix3D,
}

/// RMC/GLL status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpsStatus {
    Active,
    Void,
}

/// `$--GGA,hhmmss.ss,llll.ll,a,yyyyy.yy,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx`
#[derive(Debug, Clone, PartialEq)]
pub struct Gga {
    pub time: NaiveTime,
    pub coordinate: Coordinate,
    pub quality: QualityIndicator,
    pub satellites: u32,
    pub hdop: f64,
    /// meters above mean sea level
    pub altitude: f64,
    /// meters between WGS84 ellipsoid and mean sea level
    pub geoid_separation: f64,
    /// seconds since the last DGPS correction
    pub dgps_age: f64,
    pub dgps_station: u32,
}

/// `$--GSA,a,a,x,x,x,x,x,x,x,x,x,x,x,x,x.x,x.x,x.x[,a]`
#[derive(Debug, Clone, PartialEq)]
pub struct Gsa {
    pub selection_mode: SelectionMode,
    pub fix_mode: FixMode,
    /// IDs of the satellites used for the fix, at most 12
    pub satellite_ids: Vec<u32>,
    pub pdop: f64,
    pub hdop: f64,
    pub vdop: f64,
    pub faa_mode: Option<FaaMode>,
}

/// `$--RMC,hhmmss.ss,A,llll.ll,a,yyyyy.yy,a,x.x,x.x,ddmmyy,x.x,a[,a]`
#[derive(Debug, Clone, PartialEq)]
pub struct Rmc {
    pub date_time: DateTime<Utc>,
    pub status: GpsStatus,
    pub coordinate: Coordinate,
    /// km/h
    pub speed: f64,
    /// degrees true
    pub track_angle: f64,
    /// degrees, west negative
    pub magnetic_variation: f64,
    pub faa_mode: Option<FaaMode>,
}

/// `$--VTG,x.x,T,x.x,M,x.x,N,x.x,K[,a]`, or the pre-3.01 form `$--VTG,x.x,x.x,x.x,x.x`
#[derive(Debug, Clone, PartialEq)]
pub struct Vtg {
    pub track_true: f64,
    pub track_magnetic: f64,
    pub speed_knots: f64,
    /// km/h
    pub speed: f64,
    pub faa_mode: Option<FaaMode>,
}

/// `$--GSV,x,x,x,x,x,x,x,...` with up to four satellites per message
#[derive(Debug, Clone, PartialEq)]
pub struct Gsv {
    pub message_count: u32,
    /// 1-based index within the group
    pub message_index: u32,
    pub satellites_in_view: u32,
    pub satellites: Vec<SatelliteInfo>,
}

impl Gsv {
    pub fn is_first(&self) -> bool {
        self.message_index == 1
    }

    pub fn is_last(&self) -> bool {
        self.message_index >= self.message_count
    }
}

/// `$--GLL,llll.ll,a,yyyyy.yy,a,hhmmss.ss,a[,m]`
#[derive(Debug, Clone, PartialEq)]
pub struct Gll {
    pub coordinate: Coordinate,
    pub time: NaiveTime,
    pub status: GpsStatus,
    pub faa_mode: Option<FaaMode>,
}

/// `$--GNS,hhmmss.ss,llll.ll,a,yyyyy.yy,a,c--c,xx,x.x,x.x,x.x,x.x,x.x`
#[derive(Debug, Clone, PartialEq)]
pub struct Gns {
    pub time: NaiveTime,
    pub coordinate: Coordinate,
    /// One mode per constellation: GPS, GLONASS, ...
    pub faa_modes: Vec<FaaMode>,
    pub satellites_in_use: u32,
    pub hdop: f64,
    pub altitude: f64,
    pub geoid_separation: f64,
    pub dgps_age: f64,
    pub dgps_station: u32,
}

/// `$Pmmm...`: manufacturer code plus free-form fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateData {
    pub manufacturer: String,
    pub fields: Vec<String>,
}

/// Payload of any supported sentence
#[derive(Debug, Clone, PartialEq)]
pub enum SentenceData {
    Gga(Gga),
    Gsa(Gsa),
    Rmc(Rmc),
    Vtg(Vtg),
    Gsv(Gsv),
    Gll(Gll),
    Gns(Gns),
    Private(PrivateData),
}

impl SentenceData {
    /// Frames and decodes one line
    pub fn parse(line: &str) -> Result<Self> {
        let sentence = Sentence::parse(line)?;
        Self::decode(&sentence)
    }

    /// Decodes a framed sentence according to its type.
    ///
    /// Errors carry the complete raw sentence.
    pub fn decode(sentence: &Sentence<'_>) -> Result<Self> {
        let data = match sentence.kind() {
            SentenceType::Gga => decode_gga(sentence).map(SentenceData::Gga),
            SentenceType::Gsa => decode_gsa(sentence).map(SentenceData::Gsa),
            SentenceType::Rmc => decode_rmc(sentence).map(SentenceData::Rmc),
            SentenceType::Vtg => decode_vtg(sentence).map(SentenceData::Vtg),
            SentenceType::Gsv => decode_gsv(sentence).map(SentenceData::Gsv),
            SentenceType::Gll => decode_gll(sentence).map(SentenceData::Gll),
            SentenceType::Gns => decode_gns(sentence).map(SentenceData::Gns),
            SentenceType::Private => decode_private(sentence).map(SentenceData::Private),
        };
        data.map_err(|e| e.in_sentence(sentence.raw()))
    }

    pub fn sentence_type(&self) -> SentenceType {
        match self {
            SentenceData::Gga(_) => SentenceType::Gga,
            SentenceData::Gsa(_) => SentenceType::Gsa,
            SentenceData::Rmc(_) => SentenceType::Rmc,
            SentenceData::Vtg(_) => SentenceType::Vtg,
            SentenceData::Gsv(_) => SentenceType::Gsv,
            SentenceData::Gll(_) => SentenceType::Gll,
            SentenceData::Gns(_) => SentenceType::Gns,
            SentenceData::Private(_) => SentenceType::Private,
        }
    }
}

fn expect_field_count(sentence: &Sentence<'_>, counts: &[usize]) -> Result<()> {
    if counts.contains(&sentence.field_count()) {
        Ok(())
    } else {
        Err(wrong_field_count(sentence))
    }
}

fn wrong_field_count(sentence: &Sentence<'_>) -> NmeaError {
    NmeaError::WrongFieldCount {
        count: sentence.field_count(),
        sentence: sentence.raw().to_string(),
    }
}

/// Lat/long quartet starting at `index`
fn lat_long_at(sentence: &Sentence<'_>, index: usize) -> Result<Coordinate> {
    parse_lat_long(
        sentence.field(index),
        sentence.field(index + 1),
        sentence.field(index + 2),
        sentence.field(index + 3),
    )
}

/// FAA mode in the optional trailing field at `index`
fn optional_faa_mode(sentence: &Sentence<'_>, index: usize) -> Result<Option<FaaMode>> {
    if sentence.field_count() > index {
        parse_faa_mode(sentence.field(index)).map(Some)
    } else {
        Ok(None)
    }
}

fn parse_status(field: &str) -> Result<GpsStatus> {
    match field {
        "A" => Ok(GpsStatus::Active),
        "V" => Ok(GpsStatus::Void),
        _ => Err(NmeaError::invalid("GPS status", field)),
    }
}

fn expect_literal(field: &str, literal: &str, what: &'static str) -> Result<()> {
    if field == literal {
        Ok(())
    } else {
        Err(NmeaError::invalid(what, field))
    }
}

fn decode_gga(sentence: &Sentence<'_>) -> Result<Gga> {
    expect_field_count(sentence, &[14])?;

    let quality = match parse_uint(sentence.field(5), "quality indicator")? {
        0 => QualityIndicator::FixNotAvailable,
        1 => QualityIndicator::Gps,
        2 => QualityIndicator::Dgps,
        3..=8 => QualityIndicator::Other,
        _ => return Err(NmeaError::invalid("quality indicator", sentence.field(5))),
    };

    // fields 10 and 12 are the unit of the altitude values, always meters
    expect_literal(sentence.field(9), "M", "altitude unit")?;
    expect_literal(sentence.field(11), "M", "geoidal separation unit")?;

    Ok(Gga {
        time: parse_utc_time(sentence.field(0))?,
        coordinate: lat_long_at(sentence, 1)?,
        quality,
        satellites: parse_uint(sentence.field(6), "satellite count")?,
        hdop: parse_float(sentence.field(7), "HDOP")?,
        altitude: parse_float(sentence.field(8), "altitude")?,
        geoid_separation: parse_float(sentence.field(10), "geoidal separation")?,
        dgps_age: parse_float(sentence.field(12), "DGPS age")?,
        dgps_station: parse_uint(sentence.field(13), "DGPS station")?,
    })
}

fn decode_gsa(sentence: &Sentence<'_>) -> Result<Gsa> {
    expect_field_count(sentence, &[17, 18])?;

    let selection_mode = match sentence.field(0) {
        "A" => SelectionMode::Automatic,
        "M" => SelectionMode::Manual,
        other => return Err(NmeaError::invalid("selection mode", other)),
    };

    let fix_mode = match parse_uint(sentence.field(1), "fix mode")? {
        0 => FixMode::Unknown,
        1 => FixMode::NoFix,
        2 => FixMode::Fix2D,
        3 => FixMode::Fix3D,
        _ => return Err(NmeaError::invalid("fix mode", sentence.field(1))),
    };

    let satellite_ids = sentence.fields()[2..14]
        .iter()
        .filter(|field| !field.is_empty())
        .map(|field| parse_uint(field, "satellite ID"))
        .collect::<Result<Vec<_>>>()?;

    Ok(Gsa {
        selection_mode,
        fix_mode,
        satellite_ids,
        pdop: parse_float(sentence.field(14), "PDOP")?,
        hdop: parse_float(sentence.field(15), "HDOP")?,
        vdop: parse_float(sentence.field(16), "VDOP")?,
        faa_mode: optional_faa_mode(sentence, 17)?,
    })
}

fn decode_rmc(sentence: &Sentence<'_>) -> Result<Rmc> {
    expect_field_count(sentence, &[11, 12])?;

    // time is field 1, date is field 9
    let date_time = parse_utc_date_time(sentence.field(8), sentence.field(0))?;
    let status = parse_status(sentence.field(1))?;
    let coordinate = lat_long_at(sentence, 2)?;
    let speed_knots = parse_float(sentence.field(6), "speed over ground")?;
    let track_angle = parse_float(sentence.field(7), "track angle")?;

    let mut magnetic_variation = 0.0;
    if !sentence.is_null_field(9) {
        magnetic_variation = parse_float(sentence.field(9), "magnetic variation")?;
        match sentence.field(10) {
            "E" => {}
            "W" => magnetic_variation = -magnetic_variation,
            other => return Err(NmeaError::invalid("magnetic variation direction", other)),
        }
    }

    Ok(Rmc {
        date_time,
        status,
        coordinate,
        speed: speed_knots * KNOTS_TO_KMH,
        track_angle,
        magnetic_variation,
        faa_mode: optional_faa_mode(sentence, 11)?,
    })
}

fn decode_vtg(sentence: &Sentence<'_>) -> Result<Vtg> {
    let count = sentence.field_count();
    let modern = sentence.field(1) == "T";

    if count == 4 && !modern {
        return Ok(Vtg {
            track_true: parse_float(sentence.field(0), "true track")?,
            track_magnetic: parse_float(sentence.field(1), "magnetic track")?,
            speed_knots: parse_float(sentence.field(2), "speed in knots")?,
            speed: parse_float(sentence.field(3), "speed in km/h")?,
            faa_mode: None,
        });
    }

    if !(modern && (count == 8 || count == 9)) {
        return Err(wrong_field_count(sentence));
    }

    expect_literal(sentence.field(3), "M", "VTG unit")?;
    expect_literal(sentence.field(5), "N", "VTG unit")?;
    expect_literal(sentence.field(7), "K", "VTG unit")?;

    Ok(Vtg {
        track_true: parse_float(sentence.field(0), "true track")?,
        track_magnetic: parse_float(sentence.field(2), "magnetic track")?,
        speed_knots: parse_float(sentence.field(4), "speed in knots")?,
        speed: parse_float(sentence.field(6), "speed in km/h")?,
        faa_mode: optional_faa_mode(sentence, 8)?,
    })
}

fn decode_gsv(sentence: &Sentence<'_>) -> Result<Gsv> {
    let count = sentence.field_count();
    if count < 3 || (count - 3) % 4 != 0 {
        return Err(wrong_field_count(sentence));
    }

    let message_count = parse_uint(sentence.field(0), "GSV message count")?;
    if message_count < 1 {
        return Err(NmeaError::invalid("GSV message count", sentence.field(0)));
    }

    let message_index = parse_uint(sentence.field(1), "GSV message index")?;
    if message_index == 0 || message_index > message_count {
        return Err(NmeaError::invalid("GSV message index", sentence.field(1)));
    }

    let satellites = sentence.fields()[3..]
        .chunks_exact(4)
        .map(|group| -> Result<SatelliteInfo> {
            Ok(SatelliteInfo {
                id: parse_uint(group[0], "satellite ID")?,
                elevation: parse_uint(group[1], "elevation")?,
                azimuth: parse_uint(group[2], "azimuth")?,
                snr: parse_uint(group[3], "SNR")?,
                used_for_fix: false,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Gsv {
        message_count,
        message_index,
        satellites_in_view: parse_uint(sentence.field(2), "satellites in view")?,
        satellites,
    })
}

fn decode_gll(sentence: &Sentence<'_>) -> Result<Gll> {
    expect_field_count(sentence, &[6, 7])?;

    Ok(Gll {
        coordinate: lat_long_at(sentence, 0)?,
        time: parse_utc_time(sentence.field(4))?,
        status: parse_status(sentence.field(5))?,
        faa_mode: optional_faa_mode(sentence, 6)?,
    })
}

fn decode_gns(sentence: &Sentence<'_>) -> Result<Gns> {
    expect_field_count(sentence, &[12])?;

    let modes = sentence.field(5);
    let faa_modes = modes
        .chars()
        .map(|c| FaaMode::from_char(c).ok_or_else(|| NmeaError::invalid("FAA mode", modes)))
        .collect::<Result<Vec<_>>>()?;

    Ok(Gns {
        time: parse_utc_time(sentence.field(0))?,
        coordinate: lat_long_at(sentence, 1)?,
        faa_modes,
        satellites_in_use: parse_uint(sentence.field(6), "satellites in use")?,
        hdop: parse_float(sentence.field(7), "HDOP")?,
        altitude: parse_float(sentence.field(8), "altitude")?,
        geoid_separation: parse_float(sentence.field(9), "geoidal separation")?,
        dgps_age: parse_float(sentence.field(10), "DGPS age")?,
        dgps_station: parse_uint(sentence.field(11), "DGPS station")?,
    })
}

fn decode_private(sentence: &Sentence<'_>) -> Result<PrivateData> {
    if sentence.field_count() == 0 {
        return Err(wrong_field_count(sentence));
    }

    let first = sentence.field(0);
    let split = first.char_indices().nth(3).map_or(first.len(), |(index, _)| index);
    let (manufacturer, rest) = first.split_at(split);

    let fields = std::iter::once(rest)
        .chain(sentence.fields()[1..].iter().copied())
        .map(str::to_string)
        .collect();

    Ok(PrivateData {
        manufacturer: manufacturer.to_string(),
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use rstest::rstest;

    fn parse(line: &str) -> SentenceData {
        SentenceData::parse(line).unwrap_or_else(|e| panic!("{} failed: {}", line, e))
    }

    #[test]
    fn test_gga() {
        let SentenceData::Gga(gga) =
            parse("$GPGGA,092750.000,5321.6802,N,00630.3372,W,1,8,1.03,61.7,M,55.2,M,,*76")
        else {
            panic!("not GGA");
        };
        assert_eq!((gga.time.hour(), gga.time.minute(), gga.time.second()), (9, 27, 50));
        assert!((gga.coordinate.latitude() - 53.361_336_7).abs() < 1e-6);
        assert!((gga.coordinate.longitude() + 6.505_62).abs() < 1e-6);
        assert_eq!(gga.quality, QualityIndicator::Gps);
        assert_eq!(gga.satellites, 8);
        assert_eq!(gga.hdop, 1.03);
        assert_eq!(gga.altitude, 61.7);
        assert_eq!(gga.geoid_separation, 55.2);
        assert_eq!(gga.dgps_age, 0.0);
        assert_eq!(gga.dgps_station, 0);
    }

    #[rstest]
    #[case("0", QualityIndicator::FixNotAvailable)]
    #[case("", QualityIndicator::FixNotAvailable)]
    #[case("2", QualityIndicator::Dgps)]
    #[case("6", QualityIndicator::Other)]
    #[case("8", QualityIndicator::Other)]
    fn test_gga_quality(#[case] field: &str, #[case] quality: QualityIndicator) {
        let line = format!("$GPGGA,123519,4807.038,N,01131.000,E,{},08,0.9,545.4,M,46.9,M,,", field);
        let SentenceData::Gga(gga) = parse(&line) else {
            panic!("not GGA");
        };
        assert_eq!(gga.quality, quality);
    }

    #[test]
    fn test_gga_errors() {
        let err = SentenceData::parse("$GPGGA,123519,4807.038,N,01131.000,E,9,08,0.9,545.4,M,46.9,M,,")
            .unwrap_err();
        assert!(matches!(err, NmeaError::InvalidFormat { what: "quality indicator", .. }));

        let line = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,F,46.9,M,,";
        let err = SentenceData::parse(line).unwrap_err();
        assert_eq!(
            err,
            NmeaError::InvalidFormat {
                what: "altitude unit",
                sentence: line.to_string()
            }
        );

        let line = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,";
        assert_eq!(
            SentenceData::parse(line),
            Err(NmeaError::WrongFieldCount {
                count: 13,
                sentence: line.to_string()
            })
        );
    }

    #[test]
    fn test_gga_field_error_carries_sentence() {
        let line = "$GPGGA,243519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,";
        let err = SentenceData::parse(line).unwrap_err();
        assert_eq!(err.sentence(), line);
    }

    #[test]
    fn test_gsa() {
        let SentenceData::Gsa(gsa) = parse("$GPGSA,A,3,10,07,05,02,29,04,08,13,,,,,1.72,1.03,1.38*0A")
        else {
            panic!("not GSA");
        };
        assert_eq!(gsa.selection_mode, SelectionMode::Automatic);
        assert_eq!(gsa.fix_mode, FixMode::Fix3D);
        assert_eq!(gsa.satellite_ids, vec![10, 7, 5, 2, 29, 4, 8, 13]);
        assert_eq!((gsa.pdop, gsa.hdop, gsa.vdop), (1.72, 1.03, 1.38));
        assert_eq!(gsa.faa_mode, None);
    }

    #[test]
    fn test_gsa_with_faa_mode() {
        let SentenceData::Gsa(gsa) =
            parse("$GPGSA,A,3,10,07,05,02,29,04,08,13,,,,,1.72,1.03,1.38,A*67")
        else {
            panic!("not GSA");
        };
        assert_eq!(gsa.faa_mode, Some(FaaMode::Autonomous));
        assert_eq!(gsa.vdop, 1.38);
    }

    #[test]
    fn test_gsa_no_fix() {
        let SentenceData::Gsa(gsa) = parse("$GPGSA,A,1,,,,,,,,,,,,,,,*1E") else {
            panic!("not GSA");
        };
        assert_eq!(gsa.fix_mode, FixMode::NoFix);
        assert!(gsa.satellite_ids.is_empty());
    }

    #[rstest]
    #[case("$GPGSA,X,3,10,07,05,02,29,04,08,13,,,,,1.72,1.03,1.38")]
    #[case("$GPGSA,A,4,10,07,05,02,29,04,08,13,,,,,1.72,1.03,1.38")]
    #[case("$GPGSA,A,3,10,07,05,02,29,04,08,13,,,,,1.72,1.03,1.38,Q")]
    fn test_gsa_invalid(#[case] line: &str) {
        assert!(matches!(
            SentenceData::parse(line),
            Err(NmeaError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_rmc() {
        let SentenceData::Rmc(rmc) =
            parse("$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A")
        else {
            panic!("not RMC");
        };
        assert_eq!(rmc.date_time, Utc.with_ymd_and_hms(1994, 3, 23, 12, 35, 19).unwrap());
        assert_eq!(rmc.status, GpsStatus::Active);
        assert!((rmc.speed - 22.4 * 1.852).abs() < 1e-9);
        assert_eq!(rmc.track_angle, 84.4);
        assert_eq!(rmc.magnetic_variation, -3.1);
        assert_eq!(rmc.faa_mode, None);
    }

    #[test]
    fn test_rmc_with_faa_mode() {
        let SentenceData::Rmc(rmc) =
            parse("$GPRMC,162614,A,5230.5900,N,01322.3900,E,10.0,90.0,131006,1.2,E,A*13")
        else {
            panic!("not RMC");
        };
        assert_eq!(rmc.magnetic_variation, 1.2);
        assert_eq!(rmc.faa_mode, Some(FaaMode::Autonomous));
        assert_eq!(rmc.date_time, Utc.with_ymd_and_hms(2006, 10, 13, 16, 26, 14).unwrap());
    }

    #[rstest]
    #[case("$GPRMC,123519,X,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W")]
    #[case("$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,")]
    #[case("$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,,003.1,W")]
    fn test_rmc_invalid(#[case] line: &str) {
        assert!(matches!(
            SentenceData::parse(line),
            Err(NmeaError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_vtg_modern() {
        let SentenceData::Vtg(vtg) = parse("$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K,A*25") else {
            panic!("not VTG");
        };
        assert_eq!(vtg.track_true, 54.7);
        assert_eq!(vtg.track_magnetic, 34.4);
        assert_eq!(vtg.speed_knots, 5.5);
        assert_eq!(vtg.speed, 10.2);
        assert_eq!(vtg.faa_mode, Some(FaaMode::Autonomous));

        let SentenceData::Vtg(vtg) = parse("$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K*48") else {
            panic!("not VTG");
        };
        assert_eq!(vtg.faa_mode, None);
    }

    #[test]
    fn test_vtg_legacy() {
        let SentenceData::Vtg(vtg) = parse("$GPVTG,054.7,034.4,005.5,010.2") else {
            panic!("not VTG");
        };
        assert_eq!(vtg.track_true, 54.7);
        assert_eq!(vtg.track_magnetic, 34.4);
        assert_eq!(vtg.speed, 10.2);
        assert_eq!(vtg.faa_mode, None);
    }

    #[test]
    fn test_vtg_errors() {
        assert!(matches!(
            SentenceData::parse("$GPVTG,054.7,T,034.4,M,005.5,X,010.2,K"),
            Err(NmeaError::InvalidFormat { what: "VTG unit", .. })
        ));
        assert!(matches!(
            SentenceData::parse("$GPVTG,054.7,T,034.4,M"),
            Err(NmeaError::WrongFieldCount { count: 4, .. })
        ));
        assert!(matches!(
            SentenceData::parse("$GPVTG,054.7,034.4,M,005.5,N,010.2,K,A"),
            Err(NmeaError::WrongFieldCount { count: 8, .. })
        ));
    }

    #[test]
    fn test_gsv() {
        let SentenceData::Gsv(gsv) = parse("$GPGSV,3,3,11,29,09,301,24,16,09,020,,36,,,*76") else {
            panic!("not GSV");
        };
        assert_eq!((gsv.message_count, gsv.message_index, gsv.satellites_in_view), (3, 3, 11));
        assert!(gsv.is_last());
        assert!(!gsv.is_first());
        assert_eq!(gsv.satellites.len(), 3);
        assert_eq!(
            gsv.satellites[0],
            SatelliteInfo {
                id: 29,
                azimuth: 301,
                elevation: 9,
                snr: 24,
                used_for_fix: false
            }
        );
        assert_eq!(gsv.satellites[1].snr, 0);
        assert_eq!(gsv.satellites[2], SatelliteInfo::new(36));
    }

    #[test]
    fn test_gsv_header_only() {
        let SentenceData::Gsv(gsv) = parse("$GLGSV,1,1,00") else {
            panic!("not GSV");
        };
        assert!(gsv.satellites.is_empty());
        assert!(gsv.is_first() && gsv.is_last());
    }

    #[rstest]
    #[case("$GPGSV,0,1,11,29,09,301,24")]
    #[case("$GPGSV,3,0,11,29,09,301,24")]
    #[case("$GPGSV,3,4,11,29,09,301,24")]
    fn test_gsv_invalid_index(#[case] line: &str) {
        assert!(matches!(
            SentenceData::parse(line),
            Err(NmeaError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_gsv_wrong_field_count() {
        assert!(matches!(
            SentenceData::parse("$GPGSV,3,1,11,29,09,301"),
            Err(NmeaError::WrongFieldCount { count: 6, .. })
        ));
        assert!(matches!(
            SentenceData::parse("$GPGSV,3"),
            Err(NmeaError::WrongFieldCount { count: 1, .. })
        ));
    }

    #[test]
    fn test_gll() {
        let SentenceData::Gll(gll) = parse("$GPGLL,4916.45,N,12311.12,W,225444,A*31") else {
            panic!("not GLL");
        };
        assert!((gll.coordinate.latitude() - 49.274_166_7).abs() < 1e-6);
        assert!((gll.coordinate.longitude() + 123.185_333_3).abs() < 1e-6);
        assert_eq!(gll.time.hour(), 22);
        assert_eq!(gll.status, GpsStatus::Active);
        assert_eq!(gll.faa_mode, None);

        let SentenceData::Gll(gll) = parse("$GPGLL,4916.45,N,12311.12,W,225444,V,A*4B") else {
            panic!("not GLL");
        };
        assert_eq!(gll.status, GpsStatus::Void);
        assert_eq!(gll.faa_mode, Some(FaaMode::Autonomous));
    }

    #[test]
    fn test_gns() {
        let SentenceData::Gns(gns) =
            parse("$GNGNS,014035.00,4332.69262,S,17235.48549,E,RR,13,0.9,25.63,11.24,,*70")
        else {
            panic!("not GNS");
        };
        assert!((gns.coordinate.latitude() + 43.544_877).abs() < 1e-6);
        assert!((gns.coordinate.longitude() - 172.591_425).abs() < 1e-6);
        assert_eq!(gns.faa_modes, vec![FaaMode::RealTimeKinematic; 2]);
        assert_eq!(gns.satellites_in_use, 13);
        assert_eq!(gns.hdop, 0.9);
        assert_eq!(gns.altitude, 25.63);
        assert_eq!(gns.geoid_separation, 11.24);
    }

    #[test]
    fn test_gns_without_position() {
        let SentenceData::Gns(gns) = parse("$GPGNS,014035.00,,,,,,8,,,,1.0,23*76") else {
            panic!("not GNS");
        };
        assert!(!gns.coordinate.is_valid());
        assert!(gns.faa_modes.is_empty());
        assert_eq!(gns.satellites_in_use, 8);
        assert_eq!(gns.dgps_age, 1.0);
        assert_eq!(gns.dgps_station, 23);
    }

    #[test]
    fn test_private() {
        let data = parse("$PSRFTXT,WAAS Enable*66");
        assert_eq!(data.sentence_type(), SentenceType::Private);
        assert_eq!(
            data,
            SentenceData::Private(PrivateData {
                manufacturer: "SRF".to_string(),
                fields: vec!["TXT".to_string(), "WAAS Enable".to_string()],
            })
        );

        let SentenceData::Private(short) = parse("$PAB") else {
            panic!("not private");
        };
        assert_eq!(short.manufacturer, "AB");
        assert_eq!(short.fields, vec![String::new()]);
    }
}
