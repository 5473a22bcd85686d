// src/import.rs
//! Building a track from a recorded NMEA log

use crate::error::Result;
use crate::gps::recorder::TrackRecorder;
use crate::nmea::{Parser, SentenceData};
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// How lines that fail to decode are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Abort with the decoding error
    Strict,
    /// Count and skip
    #[default]
    Lenient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    /// Non-empty lines read
    pub lines: usize,
    pub rejected: usize,
    pub points_added: usize,
}

/// Feeds every line of `reader` through a fresh [`Parser`] into `recorder`.
pub fn import_nmea<R: BufRead>(
    reader: R,
    recorder: &mut TrackRecorder,
    mode: ImportMode,
) -> Result<ImportSummary> {
    let mut parser = Parser::new();
    let mut summary = ImportSummary::default();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        summary.lines += 1;

        match SentenceData::parse(line) {
            Ok(data) => parser.apply(&data),
            Err(e) if mode == ImportMode::Strict => return Err(e.into()),
            Err(e) => {
                debug!("Line {}: {}", summary.lines, e);
                summary.rejected += 1;
                continue;
            }
        }

        if recorder.update(&mut parser) {
            summary.points_added += 1;
        }
    }

    Ok(summary)
}

pub fn import_nmea_file(
    path: &Path,
    recorder: &mut TrackRecorder,
    mode: ImportMode,
) -> Result<ImportSummary> {
    let file = File::open(path)?;
    let summary = import_nmea(BufReader::new(file), recorder, mode)?;

    info!(
        "Imported {}: {} lines, {} rejected, {} track points",
        path.display(),
        summary.lines,
        summary.rejected,
        summary.points_added
    );

    Ok(summary)
}
