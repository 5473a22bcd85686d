// src/nmea/parser.rs
//! Stateful aggregation of decoded sentences into one position and satellite picture

use super::data::{
    FixMode, Gga, Gll, Gns, Gsa, GpsStatus, Gsv, QualityIndicator, Rmc, SentenceData, Vtg,
};
use super::fields::FaaMode;
use crate::gps::data::{PositionInfo, SatelliteInfo};
use chrono::NaiveTime;
use log::{debug, trace};
use std::collections::BTreeSet;

/// Merges NMEA sentences into the current position and satellite state.
///
/// Receivers emit a burst of partial sentences per fix; each one only moves
/// the fields it carries. The `updated_*` flags record what changed since the
/// last [`Parser::reset_update_flags`].
#[derive(Debug, Clone, Default)]
pub struct Parser {
    position: PositionInfo,
    satellites: Vec<SatelliteInfo>,
    fix_satellites: BTreeSet<u32>,
    updated_position_info: bool,
    updated_date_time: bool,
    updated_satellite_infos: bool,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes one line and folds it into the state.
    ///
    /// Lines that fail to decode are logged and dropped without touching the
    /// state. Returns whether the line was accepted.
    pub fn parse_line(&mut self, line: &str) -> bool {
        match SentenceData::parse(line) {
            Ok(data) => {
                trace!("Applying {} sentence", data.sentence_type().code());
                self.apply(&data);
                true
            }
            Err(e) => {
                debug!("Discarding NMEA sentence: {}", e);
                false
            }
        }
    }

    /// Folds an already decoded sentence into the state
    pub fn apply(&mut self, data: &SentenceData) {
        match data {
            SentenceData::Gga(gga) => self.apply_gga(gga),
            SentenceData::Gsa(gsa) => self.apply_gsa(gsa),
            SentenceData::Rmc(rmc) => self.apply_rmc(rmc),
            SentenceData::Vtg(vtg) => self.apply_vtg(vtg),
            SentenceData::Gsv(gsv) => self.apply_gsv(gsv),
            SentenceData::Gll(gll) => self.apply_gll(gll),
            SentenceData::Gns(gns) => self.apply_gns(gns),
            SentenceData::Private(private) => {
                trace!("Private sentence from {}: {:?}", private.manufacturer, private.fields);
            }
        }
    }

    pub fn position_info(&self) -> &PositionInfo {
        &self.position
    }

    /// Satellites of the last complete GSV group, in message order
    pub fn satellite_infos(&self) -> &[SatelliteInfo] {
        &self.satellites
    }

    pub fn updated_position_info(&self) -> bool {
        self.updated_position_info
    }

    pub fn updated_date_time(&self) -> bool {
        self.updated_date_time
    }

    pub fn updated_satellite_infos(&self) -> bool {
        self.updated_satellite_infos
    }

    pub fn reset_update_flags(&mut self) {
        self.updated_position_info = false;
        self.updated_date_time = false;
        self.updated_satellite_infos = false;
    }

    fn apply_gga(&mut self, gga: &Gga) {
        if gga.quality == QualityIndicator::FixNotAvailable {
            return;
        }

        self.position.coordinate = gga.coordinate;
        self.position.position_precision = gga.hdop;
        self.position.altitude = gga.altitude;
        self.position.geoid_height = gga.geoid_separation;
        self.merge_time(gga.time);
        self.updated_position_info = true;
    }

    fn apply_gsa(&mut self, gsa: &Gsa) {
        self.fix_satellites.clear();

        if matches!(gsa.fix_mode, FixMode::Unknown | FixMode::NoFix)
            || gsa.faa_mode == Some(FaaMode::NotValid)
        {
            return;
        }

        self.fix_satellites.extend(gsa.satellite_ids.iter().copied());
        self.position.position_precision = gsa.hdop;
        self.correlate_satellites();
    }

    fn apply_rmc(&mut self, rmc: &Rmc) {
        if rmc.status == GpsStatus::Void || rmc.faa_mode == Some(FaaMode::NotValid) {
            return;
        }

        self.position.coordinate = rmc.coordinate;
        self.position.speed = rmc.speed;
        self.position.angle = rmc.track_angle;
        self.position.magnetic_variation = rmc.magnetic_variation;
        self.position.timestamp = Some(rmc.date_time);
        self.updated_position_info = true;
        self.updated_date_time = true;
    }

    fn apply_vtg(&mut self, vtg: &Vtg) {
        if vtg.faa_mode == Some(FaaMode::NotValid) {
            return;
        }

        self.position.speed = vtg.speed;
        self.updated_position_info = true;
    }

    fn apply_gsv(&mut self, gsv: &Gsv) {
        if gsv.is_first() {
            self.satellites.clear();
        }
        self.satellites.extend_from_slice(&gsv.satellites);

        if gsv.is_last() {
            self.correlate_satellites();
            self.updated_satellite_infos = true;
        }
    }

    fn apply_gll(&mut self, gll: &Gll) {
        if gll.status == GpsStatus::Void || gll.faa_mode == Some(FaaMode::NotValid) {
            return;
        }

        self.position.coordinate = gll.coordinate;
        self.merge_time(gll.time);
        self.updated_position_info = true;
    }

    // GNS carries per-constellation modes and no single status, so it is
    // always applied.
    fn apply_gns(&mut self, gns: &Gns) {
        self.position.coordinate = gns.coordinate;
        self.position.position_precision = gns.hdop;
        self.position.altitude = gns.altitude;
        self.position.geoid_height = gns.geoid_separation;
        self.merge_time(gns.time);
        self.updated_position_info = true;
    }

    /// Moves the time of day of the current timestamp; needs a date from RMC first.
    fn merge_time(&mut self, time: NaiveTime) {
        if let Some(timestamp) = self.position.timestamp {
            self.position.timestamp = Some(timestamp.date_naive().and_time(time).and_utc());
            self.updated_date_time = true;
        }
    }

    fn correlate_satellites(&mut self) {
        for satellite in &mut self.satellites {
            satellite.used_for_fix = self.fix_satellites.contains(&satellite.id);
        }
    }
}
