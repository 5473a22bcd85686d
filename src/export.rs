// src/export.rs
//! Track export to GPX, GeoJSON and CSV

use crate::error::{GpsError, Result};
use crate::gps::track::{Track, TrackPoint};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Gpx,
    GeoJson,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &str {
        match self {
            ExportFormat::Gpx => "gpx",
            ExportFormat::GeoJson => "geojson",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            ExportFormat::Gpx => "GPX (GPS Exchange)",
            ExportFormat::GeoJson => "GeoJSON",
            ExportFormat::Csv => "CSV",
        }
    }

    /// Picks the format from a file extension, case-insensitively
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        extension.parse().ok()
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gpx" => Ok(ExportFormat::Gpx),
            "geojson" | "json" => Ok(ExportFormat::GeoJson),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("unknown export format '{}'", other)),
        }
    }
}

/// Writes the valid points of a track in one of the [`ExportFormat`]s
pub struct TrackExporter {
    name: String,
}

impl TrackExporter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn export_to_file(&self, track: &Track, path: &Path, format: ExportFormat) -> Result<()> {
        let content = self.export_to_string(track, format)?;

        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;

        Ok(())
    }

    pub fn export_to_string(&self, track: &Track, format: ExportFormat) -> Result<String> {
        let points: Vec<&TrackPoint> = track
            .points()
            .iter()
            .filter(|p| p.coordinate.is_valid())
            .collect();

        if points.is_empty() {
            return Err(GpsError::Other("No track points to export".to_string()));
        }

        match format {
            ExportFormat::Gpx => Ok(self.to_gpx(&points)),
            ExportFormat::GeoJson => self.to_geojson(&points),
            ExportFormat::Csv => Ok(Self::to_csv(&points)),
        }
    }

    fn to_gpx(&self, points: &[&TrackPoint]) -> String {
        let mut gpx = String::from(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="nmea-geotag" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
"#,
        );
        gpx.push_str(&format!("    <name>{}</name>\n", Self::escape_xml(&self.name)));
        gpx.push_str("    <trkseg>\n");

        for point in points {
            gpx.push_str(&format!(
                "      <trkpt lat=\"{:.8}\" lon=\"{:.8}\">\n",
                point.coordinate.latitude(),
                point.coordinate.longitude()
            ));
            gpx.push_str(&format!(
                "        <time>{}</time>\n",
                point.timestamp.to_rfc3339()
            ));
            gpx.push_str("      </trkpt>\n");
        }

        gpx.push_str("    </trkseg>\n  </trk>\n</gpx>\n");
        gpx
    }

    fn to_geojson(&self, points: &[&TrackPoint]) -> Result<String> {
        let coordinates: Vec<serde_json::Value> = points
            .iter()
            .map(|p| serde_json::json!([p.coordinate.longitude(), p.coordinate.latitude()]))
            .collect();
        let times: Vec<String> = points.iter().map(|p| p.timestamp.to_rfc3339()).collect();

        let feature_collection = serde_json::json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": coordinates
                },
                "properties": {
                    "name": self.name,
                    "times": times
                }
            }]
        });

        Ok(serde_json::to_string_pretty(&feature_collection)?)
    }

    fn to_csv(points: &[&TrackPoint]) -> String {
        let mut csv = String::from("latitude,longitude,timestamp\n");

        for point in points {
            csv.push_str(&format!(
                "{:.8},{:.8},{}\n",
                point.coordinate.latitude(),
                point.coordinate.longitude(),
                Self::escape_csv(&point.timestamp.to_rfc3339())
            ));
        }

        csv
    }

    fn escape_xml(s: &str) -> String {
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;")
    }

    fn escape_csv(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gps::coordinate::Coordinate;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn sample_track() -> Track {
        let mut track = Track::new();
        track.add_point(
            Coordinate::new(42.0, -71.0),
            Utc.with_ymd_and_hms(2011, 5, 28, 9, 27, 50).unwrap(),
        );
        track.add_point(
            Coordinate::new(42.5, -71.25),
            Utc.with_ymd_and_hms(2011, 5, 28, 9, 27, 51).unwrap(),
        );
        track
    }

    #[test]
    fn test_gpx_export() {
        let gpx = TrackExporter::new("Walk <1>")
            .export_to_string(&sample_track(), ExportFormat::Gpx)
            .unwrap();
        assert!(gpx.contains("<gpx"));
        assert!(gpx.contains("<name>Walk &lt;1&gt;</name>"));
        assert!(gpx.contains("<trkpt lat=\"42.00000000\" lon=\"-71.00000000\">"));
        assert!(gpx.contains("<time>2011-05-28T09:27:51+00:00</time>"));
        assert_eq!(gpx.matches("<trkpt").count(), 2);
    }

    #[test]
    fn test_geojson_export() {
        let json = TrackExporter::new("walk")
            .export_to_string(&sample_track(), ExportFormat::GeoJson)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let feature = &value["features"][0];
        assert_eq!(feature["geometry"]["type"], "LineString");
        assert_eq!(feature["geometry"]["coordinates"][1][0], -71.25);
        assert_eq!(feature["geometry"]["coordinates"][1][1], 42.5);
        assert_eq!(feature["properties"]["times"][0], "2011-05-28T09:27:50+00:00");
    }

    #[test]
    fn test_csv_export() {
        let csv = TrackExporter::new("walk")
            .export_to_string(&sample_track(), ExportFormat::Csv)
            .unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "latitude,longitude,timestamp");
        assert_eq!(lines[1], "42.00000000,-71.00000000,2011-05-28T09:27:50+00:00");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_empty_track_is_an_error() {
        let mut track = Track::new();
        track.add_point(Coordinate::invalid(), Utc::now());
        let result = TrackExporter::new("empty").export_to_string(&track, ExportFormat::Csv);
        assert!(matches!(result, Err(GpsError::Other(_))));
    }

    #[rstest]
    #[case("track.gpx", Some(ExportFormat::Gpx))]
    #[case("track.GeoJSON", Some(ExportFormat::GeoJson))]
    #[case("track.csv", Some(ExportFormat::Csv))]
    #[case("track.kml", None)]
    #[case("track", None)]
    fn test_format_from_path(#[case] path: &str, #[case] expected: Option<ExportFormat>) {
        assert_eq!(ExportFormat::from_path(Path::new(path)), expected);
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ExportFormat::GeoJson.extension(), "geojson");
        assert_eq!(ExportFormat::Gpx.display_name(), "GPX (GPS Exchange)");
        assert_eq!(
            serde_json::to_string(&ExportFormat::GeoJson).unwrap(),
            "\"geojson\""
        );
    }
}
