//! Trailer section parsing.

use log::{debug, warn};

use crate::error::Result;
use crate::models::Metadata;
use crate::sections;

/// Entry recorded when a file has no trailer.
pub const NO_TRAILER_KEY: &str = "MetaDataInFile";
pub const NO_TRAILER_VALUE: &str = "none";

pub const SCAN_FIELD_ORIGIN_X: &str = "ScanFieldOriginX";
pub const SCAN_FIELD_ORIGIN_Y: &str = "ScanFieldOriginY";
pub const SCAN_FIELD_ORIGIN_Z: &str = "ScanFieldOriginZ";
pub const SAMPLE_TEMPERATURE: &str = "SampleTemperature";

/// Default sample temperature in °C.
pub const DEFAULT_SAMPLE_TEMPERATURE: f64 = 20.0;

/// Numeric parameters taken from the trailer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailerParameters {
    pub x_offset: f64,
    pub y_offset: f64,
    pub z_offset: f64,
    pub sample_temperature: f64,
}

impl Default for TrailerParameters {
    fn default() -> Self {
        Self {
            x_offset: 0.0,
            y_offset: 0.0,
            z_offset: 0.0,
            sample_temperature: DEFAULT_SAMPLE_TEMPERATURE,
        }
    }
}

/// Merge the trailer into `metadata` and extract the known parameters.
///
/// `lines` is `None` when the file has no trailer section.
pub fn parse(lines: Option<&[&str]>, metadata: &mut Metadata) -> Result<TrailerParameters> {
    let Some(lines) = lines else {
        metadata.insert(NO_TRAILER_KEY, NO_TRAILER_VALUE)?;
        return Ok(TrailerParameters::default());
    };

    for line in lines {
        let pair = sections::key_value(line);
        if sections::is_sentinel(pair) {
            debug!("Skipping malformed trailer line '{}'", line);
            continue;
        }
        metadata.insert(pair.0, pair.1)?;
    }

    Ok(parameters_from(metadata))
}

/// Read the scan-field origin and sample temperature from `metadata`.
///
/// Keys are matched case-sensitively (subject to the metadata key case); values
/// are expected in metres and °C.
pub fn parameters_from(metadata: &Metadata) -> TrailerParameters {
    let defaults = TrailerParameters::default();
    let lookup = |key: &str, default: f64| match metadata.get(key) {
        Some(value) => {
            let parsed = first_number(value);
            if parsed.is_nan() {
                warn!("Trailer entry {} = '{}' holds no number", key, value);
            }
            parsed
        }
        None => default,
    };

    TrailerParameters {
        x_offset: lookup(SCAN_FIELD_ORIGIN_X, defaults.x_offset),
        y_offset: lookup(SCAN_FIELD_ORIGIN_Y, defaults.y_offset),
        z_offset: lookup(SCAN_FIELD_ORIGIN_Z, defaults.z_offset),
        sample_temperature: lookup(SAMPLE_TEMPERATURE, defaults.sample_temperature),
    }
}

/// First whitespace-separated token that parses as a number, NaN if none does.
pub fn first_number(value: &str) -> f64 {
    value
        .split_whitespace()
        .find_map(|token| token.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}
