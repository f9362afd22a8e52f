//! Job configuration parsing.
//!
//! A job is described by a single-line, comma-separated record with fields
//! in fixed order: `lat1, lon1, lat2, lon2, zoom`. All fields are parsed as
//! floating point; the zoom value is truncated to an integer. Any malformed
//! or missing field is fatal and aborts the run before network activity.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::coord::BoundingBox;

/// Number of fields in a job record.
const FIELD_COUNT: usize = 5;

/// Errors raised while reading or parsing the job record.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The job file could not be read.
    #[error("failed to read job file: {0}")]
    Io(#[from] std::io::Error),

    /// The record does not have exactly five fields.
    #[error("expected 5 comma-separated fields, found {0}")]
    FieldCount(usize),

    /// A field could not be parsed as a number.
    #[error("field {name} is not a number: {value:?}")]
    InvalidNumber {
        /// Field name from the fixed schema.
        name: &'static str,
        /// Raw field text.
        value: String,
    },

    /// The zoom value cannot be represented as a zoom level.
    #[error("zoom value {0} is not a valid zoom level")]
    InvalidZoom(f64),

    /// The two corners collapse to a line or point.
    #[error("bounding box corners are degenerate (zero extent on an axis)")]
    DegenerateBox,
}

/// A parsed job: the bounding box corners and the zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JobConfig {
    /// Bounding box corners as given, unordered.
    pub bbox: BoundingBox,

    /// Zoom level, truncated from the configured value.
    pub zoom: u8,
}

impl JobConfig {
    /// Reads and parses the job record from a file.
    ///
    /// Only the first line of the file is consulted.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let line = contents.lines().next().unwrap_or("");
        line.parse()
    }
}

impl std::str::FromStr for JobConfig {
    type Err = ConfigError;

    fn from_str(line: &str) -> Result<Self, ConfigError> {
        const FIELD_NAMES: [&str; FIELD_COUNT] = ["lat1", "lon1", "lat2", "lon2", "zoom"];

        let raw: Vec<&str> = line.split(',').map(str::trim).collect();
        if raw.len() != FIELD_COUNT {
            return Err(ConfigError::FieldCount(raw.len()));
        }

        let mut values = [0.0_f64; FIELD_COUNT];
        for (i, (&name, &field)) in FIELD_NAMES.iter().zip(raw.iter()).enumerate() {
            values[i] = field.parse().map_err(|_| ConfigError::InvalidNumber {
                name,
                value: field.to_string(),
            })?;
        }

        let [lat1, lon1, lat2, lon2, zoom_raw] = values;

        if !zoom_raw.is_finite() || !(0.0..=u8::MAX as f64).contains(&zoom_raw) {
            return Err(ConfigError::InvalidZoom(zoom_raw));
        }
        let zoom = zoom_raw.trunc() as u8;

        let bbox = BoundingBox::new(lat1, lon1, lat2, lon2);
        if bbox.is_degenerate() {
            return Err(ConfigError::DegenerateBox);
        }

        Ok(Self { bbox, zoom })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_valid_record() {
        let job: JobConfig = "40.73, -74.00, 40.70, -73.97, 15".parse().unwrap();

        assert_eq!(job.zoom, 15);
        assert_eq!(job.bbox.lat1, 40.73);
        assert_eq!(job.bbox.lon1, -74.00);
        assert_eq!(job.bbox.lat2, 40.70);
        assert_eq!(job.bbox.lon2, -73.97);
    }

    #[test]
    fn test_parse_without_whitespace() {
        let job: JobConfig = "40.73,-74.00,40.70,-73.97,15".parse().unwrap();
        assert_eq!(job.zoom, 15);
    }

    #[test]
    fn test_zoom_is_truncated() {
        let job: JobConfig = "40.73, -74.00, 40.70, -73.97, 15.9".parse().unwrap();
        assert_eq!(job.zoom, 15);
    }

    #[test]
    fn test_missing_field() {
        let result: Result<JobConfig, _> = "40.73, -74.00, 40.70, -73.97".parse();
        assert!(matches!(result, Err(ConfigError::FieldCount(4))));
    }

    #[test]
    fn test_extra_field() {
        let result: Result<JobConfig, _> = "40.73, -74.00, 40.70, -73.97, 15, 1".parse();
        assert!(matches!(result, Err(ConfigError::FieldCount(6))));
    }

    #[test]
    fn test_non_numeric_field() {
        let result: Result<JobConfig, _> = "40.73, east, 40.70, -73.97, 15".parse();
        match result {
            Err(ConfigError::InvalidNumber { name, value }) => {
                assert_eq!(name, "lon1");
                assert_eq!(value, "east");
            }
            other => panic!("expected InvalidNumber, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_zoom_rejected() {
        let result: Result<JobConfig, _> = "40.73, -74.00, 40.70, -73.97, -3".parse();
        assert!(matches!(result, Err(ConfigError::InvalidZoom(_))));
    }

    #[test]
    fn test_degenerate_box_rejected() {
        let result: Result<JobConfig, _> = "40.73, -74.00, 40.73, -73.97, 15".parse();
        assert!(matches!(result, Err(ConfigError::DegenerateBox)));
    }

    #[test]
    fn test_from_file_reads_first_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "40.73, -74.00, 40.70, -73.97, 15").unwrap();
        writeln!(file, "this line is ignored").unwrap();

        let job = JobConfig::from_file(file.path()).unwrap();
        assert_eq!(job.zoom, 15);
    }

    #[test]
    fn test_from_file_missing() {
        let result = JobConfig::from_file("/nonexistent/job.csv");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = JobConfig::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::FieldCount(1))));
    }
}
