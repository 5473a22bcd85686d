// src/config.rs
//! Persistent settings for the command line tool

use crate::error::{GpsError, Result};
use crate::export::ExportFormat;
use crate::gps::coordinate::CoordinateFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeotagConfig {
    pub serial_port: Option<String>,
    pub serial_baudrate: u32,
    pub coordinate_format: CoordinateFormat,
    pub export_format: ExportFormat,
    pub min_distance: f64, // meters between recorded points, 0 records every fix
}

impl Default for GeotagConfig {
    fn default() -> Self {
        Self {
            serial_port: None,
            serial_baudrate: 9600,
            coordinate_format: CoordinateFormat::default(),
            export_format: ExportFormat::default(),
            min_distance: 0.0,
        }
    }
}

impl GeotagConfig {
    /// Load configuration from `$HOME/.config/nmea-geotag/config.json`
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Save configuration to `$HOME/.config/nmea-geotag/config.json`
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Defaults are returned when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| GpsError::Other(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| GpsError::Other(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| GpsError::Other(format!("Failed to create config directory: {}", e)))?;
        }

        let contents = serde_json::to_string_pretty(self)?;

        std::fs::write(path, contents)
            .map_err(|e| GpsError::Other(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| GpsError::Other("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home)
            .join(".config")
            .join("nmea-geotag")
            .join("config.json"))
    }

    /// Update serial port settings
    pub fn update_serial(&mut self, port: String, baudrate: u32) {
        self.serial_port = Some(port);
        self.serial_baudrate = baudrate;
    }

    pub fn update_export_format(&mut self, format: ExportFormat) {
        self.export_format = format;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("nmea-geotag-test-{}-{}", name, std::process::id()))
            .join("config.json")
    }

    #[test]
    fn test_default_config() {
        let config = GeotagConfig::default();
        assert_eq!(config.serial_port, None);
        assert_eq!(config.serial_baudrate, 9600);
        assert_eq!(config.coordinate_format, CoordinateFormat::DegreesMinutes);
        assert_eq!(config.min_distance, 0.0);
    }

    #[test]
    fn test_update_serial() {
        let mut config = GeotagConfig::default();
        config.update_serial("/dev/ttyUSB0".to_string(), 115200);
        assert_eq!(config.serial_port, Some("/dev/ttyUSB0".to_string()));
        assert_eq!(config.serial_baudrate, 115200);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = temp_config_path("missing");
        assert_eq!(GeotagConfig::load_from(&path).unwrap(), GeotagConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_config_path("roundtrip");
        let mut config = GeotagConfig::default();
        config.update_serial("/dev/ttyACM0".to_string(), 4800);
        config.update_export_format(ExportFormat::Csv);
        config.coordinate_format = CoordinateFormat::SignedDegrees;

        config.save_to(&path).unwrap();
        let loaded = GeotagConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let path = temp_config_path("partial");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{ "coordinate_format": "signed-degrees" }"#).unwrap();

        let config = GeotagConfig::load_from(&path).unwrap();
        assert_eq!(config.coordinate_format, CoordinateFormat::SignedDegrees);
        assert_eq!(config.serial_baudrate, 9600);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
