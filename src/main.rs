// src/main.rs
//! nmea-geotag - decode NMEA logs and receivers into tracks for geotagging photos

use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use nmea_geotag::{
    config::GeotagConfig,
    export::{ExportFormat, TrackExporter},
    gps::{CoordinateFormat, Track, TrackRecorder},
    import::{import_nmea_file, ImportMode},
    monitor::{self, Receiver, ReceiverSnapshot},
};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "nmea-geotag", version)]
#[command(about = "Decode NMEA 0183 GPS data into tracks for geotagging photos", long_about = None)]
struct Cli {
    /// Coordinate display format: dm, dms, signed or hemisphere (default from config)
    #[arg(long, global = true)]
    coordinates: Option<CoordinateFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a track from an NMEA log and optionally export it
    Import {
        /// NMEA log file, one sentence per line
        file: PathBuf,

        /// Export the track to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Export format: gpx, geojson or csv (detected from the output extension if not specified)
        #[arg(long)]
        format: Option<ExportFormat>,

        /// Abort on the first sentence that fails to decode
        #[arg(long)]
        strict: bool,

        /// Minimum distance in meters between track points
        #[arg(long)]
        min_distance: Option<f64>,
    },

    /// Look up the track position for photo capture times
    Locate {
        /// NMEA log file, one sentence per line
        file: PathBuf,

        /// Capture times in RFC 3339, e.g. 2011-05-28T09:27:50Z
        #[arg(required = true)]
        timestamps: Vec<String>,
    },

    /// Show live data from a serial GPS receiver
    Monitor {
        /// Serial port (default from config)
        #[arg(long)]
        port: Option<String>,

        /// Baud rate (default from config)
        #[arg(long)]
        baud: Option<u32>,

        /// Print one JSON snapshot per position update
        #[arg(long)]
        json: bool,

        /// Export the recorded track on exit
        #[arg(long)]
        output: Option<PathBuf>,

        /// Remember port and baud rate in the config file
        #[arg(long)]
        save: bool,
    },

    /// List available serial ports
    Ports,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut config = GeotagConfig::load().unwrap_or_else(|e| {
        log::warn!("Using default configuration: {}", e);
        GeotagConfig::default()
    });
    let coordinates = cli.coordinates.unwrap_or(config.coordinate_format);

    match cli.command {
        Command::Import {
            file,
            output,
            format,
            strict,
            min_distance,
        } => {
            let mode = if strict {
                ImportMode::Strict
            } else {
                ImportMode::Lenient
            };
            let track = load_track(&file, mode, min_distance.unwrap_or(config.min_distance))?;
            print_track_summary(&track);

            if let Some(output) = output {
                let format = format
                    .or_else(|| ExportFormat::from_path(&output))
                    .unwrap_or(config.export_format);
                export_track(&track, &file, &output, format)?;
            }
        }

        Command::Locate { file, timestamps } => {
            let track = load_track(&file, ImportMode::Lenient, config.min_distance)?;

            for text in timestamps {
                let timestamp = DateTime::parse_from_rfc3339(&text)
                    .with_context(|| format!("Invalid timestamp '{}'", text))?
                    .with_timezone(&Utc);

                match track.find_nearest(timestamp) {
                    Some(point) if track.in_track_range(timestamp) => {
                        let (lat, long) = point.coordinate.format(coordinates);
                        println!("{}  {}  {}  (fix at {})", text, lat, long, point.timestamp.to_rfc3339());
                    }
                    _ => println!("{}  outside track", text),
                }
            }
        }

        Command::Monitor {
            port,
            baud,
            json,
            output,
            save,
        } => {
            let Some(port) = port.or_else(|| config.serial_port.clone()) else {
                bail!("No serial port given; use --port or run `nmea-geotag ports`");
            };
            let baud = baud.unwrap_or(config.serial_baudrate);

            if save {
                config.update_serial(port.clone(), baud);
                config.save().context("Failed to save configuration")?;
            }

            let mut recorder = TrackRecorder::new();
            recorder.set_min_distance(config.min_distance);
            let receiver = Receiver::with_recorder(recorder);
            let reader = receiver.start_serial(&port, baud)?;

            // Set up Ctrl+C handler
            let stopper = receiver.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    stopper.stop();
                }
            });

            while receiver.is_running() && !reader.is_finished() {
                tokio::time::sleep(Duration::from_secs(1)).await;

                let snapshot = receiver.poll();
                if snapshot.updated_position_info || snapshot.updated_satellite_infos {
                    if json {
                        println!("{}", serde_json::to_string(&snapshot)?);
                    } else {
                        print_snapshot(&snapshot, coordinates);
                    }
                }
            }
            receiver.stop();
            println!("\nShutting down...");

            if let Some(output) = output {
                let format = ExportFormat::from_path(&output).unwrap_or(config.export_format);
                let track = receiver.track();
                export_track(&track, Path::new(&port), &output, format)?;
            }
        }

        Command::Ports => {
            let ports = monitor::list_serial_ports()?;
            if ports.is_empty() {
                println!("No serial ports found.");
            } else {
                println!("Available serial ports:");
                for port in ports {
                    println!("  {} - {:?}", port.port_name, port.port_type);
                }
            }
        }
    }

    Ok(())
}

fn load_track(file: &Path, mode: ImportMode, min_distance: f64) -> anyhow::Result<Track> {
    let mut recorder = TrackRecorder::new();
    recorder.set_min_distance(min_distance);

    let summary = import_nmea_file(file, &mut recorder, mode)
        .with_context(|| format!("Failed to import {}", file.display()))?;
    if summary.rejected > 0 {
        eprintln!(
            "Skipped {} of {} lines that could not be decoded",
            summary.rejected, summary.lines
        );
    }

    Ok(recorder.into_track())
}

fn export_track(track: &Track, source: &Path, output: &Path, format: ExportFormat) -> anyhow::Result<()> {
    let name = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "track".to_string());

    TrackExporter::new(name)
        .export_to_file(track, output, format)
        .with_context(|| format!("Failed to export {}", output.display()))?;

    println!("Exported {} to {}", format.display_name(), output.display());
    Ok(())
}

fn print_track_summary(track: &Track) {
    match (track.start_time(), track.end_time()) {
        (Some(start), Some(end)) => {
            println!("Track points: {}", track.num_points());
            println!("Start:        {}", start.to_rfc3339());
            println!("End:          {}", end.to_rfc3339());
            println!("Distance:     {:.2} km", track.total_distance() / 1000.0);
        }
        _ => println!("No track points found."),
    }
}

fn print_snapshot(snapshot: &ReceiverSnapshot, coordinates: CoordinateFormat) {
    let position = &snapshot.position;
    let time = position
        .timestamp
        .map_or_else(|| "--".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string());

    if position.has_fix() {
        let (lat, long) = position.coordinate.format(coordinates);
        println!(
            "{}  {}  {}  alt {:.1} m  {:.1} km/h  HDOP {:.2}",
            time, lat, long, position.altitude, position.speed, position.position_precision
        );
    } else {
        println!("{}  no fix", time);
    }

    if snapshot.updated_satellite_infos {
        let used = snapshot.satellites.iter().filter(|s| s.used_for_fix).count();
        println!(
            "  satellites: {} in view, {} used, {} track points",
            snapshot.satellites.len(),
            used,
            snapshot.track_points
        );
    }
}
