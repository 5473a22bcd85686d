// src/monitor.rs
//! Live NMEA receiver feeding the parser and track recorder

use crate::{
    error::{GpsError, Result},
    gps::{
        data::{PositionInfo, SatelliteInfo},
        recorder::TrackRecorder,
        track::Track,
    },
    nmea::Parser,
};
use log::{debug, info, warn};
use serde::Serialize;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, PoisonError, RwLock,
    },
    time::Duration,
};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader},
    task::JoinHandle,
};
use tokio_serial::{SerialPortBuilderExt, SerialPortInfo};

/// Parser, recorder and the changes not yet picked up by [`Receiver::poll`]
#[derive(Debug, Default)]
struct ReceiverState {
    parser: Parser,
    recorder: TrackRecorder,
    updated_position_info: bool,
    updated_date_time: bool,
    updated_satellite_infos: bool,
}

impl ReceiverState {
    fn feed(&mut self, line: &str) {
        if !self.parser.parse_line(line) {
            return;
        }

        // the recorder consumes the parser flags, so collect them first
        self.updated_position_info |= self.parser.updated_position_info();
        self.updated_date_time |= self.parser.updated_date_time();
        self.updated_satellite_infos |= self.parser.updated_satellite_infos();

        self.recorder.update(&mut self.parser);
    }
}

/// State handed out by [`Receiver::poll`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiverSnapshot {
    pub position: PositionInfo,
    pub satellites: Vec<SatelliteInfo>,
    pub updated_position_info: bool,
    pub updated_date_time: bool,
    pub updated_satellite_infos: bool,
    pub track_points: usize,
}

/// Reads NMEA lines on a background task.
///
/// Cloning shares the state and the running flag.
#[derive(Debug, Clone)]
pub struct Receiver {
    state: Arc<RwLock<ReceiverState>>,
    running: Arc<AtomicBool>,
}

impl Receiver {
    pub fn new() -> Self {
        Self::with_recorder(TrackRecorder::new())
    }

    pub fn with_recorder(recorder: TrackRecorder) -> Self {
        Self {
            state: Arc::new(RwLock::new(ReceiverState {
                recorder,
                ..ReceiverState::default()
            })),
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Opens a serial port and starts reading from it
    pub fn start_serial(&self, port: &str, baudrate: u32) -> Result<JoinHandle<()>> {
        info!("Connecting to GPS on {} at {} baud", port, baudrate);

        let serial = tokio_serial::new(port, baudrate)
            .timeout(Duration::from_millis(1000))
            .open_native_async()
            .map_err(|e| GpsError::Connection(format!("Failed to open serial port {}: {}", port, e)))?;

        Ok(self.start_reader(BufReader::new(serial)))
    }

    /// Starts reading lines from any buffered async source until EOF, a read
    /// error or [`Receiver::stop`].
    pub fn start_reader<R>(&self, reader: R) -> JoinHandle<()>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let state = Arc::clone(&self.state);
        let running = Arc::clone(&self.running);

        tokio::spawn(async move {
            let mut reader = reader;
            let mut buffer = Vec::new();

            while running.load(Ordering::Relaxed) {
                buffer.clear();
                match reader.read_until(b'\n', &mut buffer).await {
                    Ok(0) => {
                        debug!("End of NMEA input");
                        break;
                    }
                    Ok(_) => {
                        // line noise is not UTF-8; the checksum rejects the line later
                        let text = String::from_utf8_lossy(&buffer);
                        let line = text.trim();
                        if !line.is_empty() {
                            let mut state = state.write().unwrap_or_else(PoisonError::into_inner);
                            state.feed(line);
                        }
                    }
                    Err(e) => {
                        warn!("Error reading NMEA input: {}", e);
                        break;
                    }
                }
            }
        })
    }

    /// Returns the current state and clears the change flags
    pub fn poll(&self) -> ReceiverSnapshot {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        let snapshot = ReceiverSnapshot {
            position: state.parser.position_info().clone(),
            satellites: state.parser.satellite_infos().to_vec(),
            updated_position_info: state.updated_position_info,
            updated_date_time: state.updated_date_time,
            updated_satellite_infos: state.updated_satellite_infos,
            track_points: state.recorder.track().num_points(),
        };

        state.updated_position_info = false;
        state.updated_date_time = false;
        state.updated_satellite_infos = false;

        snapshot
    }

    /// Copy of the track recorded so far
    pub fn track(&self) -> Track {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.recorder.track().clone()
    }

    /// Stop the reader task after its current line
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }
}

impl Default for Receiver {
    fn default() -> Self {
        Self::new()
    }
}

/// List available serial ports
pub fn list_serial_ports() -> Result<Vec<SerialPortInfo>> {
    tokio_serial::available_ports()
        .map_err(|e| GpsError::Other(format!("Failed to list serial ports: {}", e)))
}
