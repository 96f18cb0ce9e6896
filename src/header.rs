//! Header section parsing.

use chrono::NaiveDateTime;
use log::debug;

use crate::error::{Error, Result};
use crate::models::Metadata;
use crate::sections;

/// Minimum number of header lines, version tag included.
pub const MIN_HEADER_LINES: usize = 13;

/// Timestamp layout of `CreateDate` and `ModDate` (`ddMMyyyyHHmm`).
pub const TIMESTAMP_FORMAT: &str = "%d%m%Y%H%M";

/// Value stored for a count that could not be parsed.
pub const UNPARSED_COUNT: i32 = -1;

/// Typed fields of a BCR header.
#[derive(Debug, Clone, PartialEq)]
pub struct BcrHeader {
    pub version_field: String,
    pub manufacturer_id: String,
    pub create_date: Option<NaiveDateTime>,
    pub mod_date: Option<NaiveDateTime>,
    pub num_points: i32,
    pub num_profiles: i32,
    pub x_scale: f64,
    pub y_scale: f64,
    pub z_scale: f64,
}

impl Default for BcrHeader {
    fn default() -> Self {
        Self {
            version_field: String::new(),
            manufacturer_id: String::new(),
            create_date: None,
            mod_date: None,
            num_points: 0,
            num_profiles: 0,
            x_scale: f64::NAN,
            y_scale: f64::NAN,
            z_scale: f64::NAN,
        }
    }
}

impl BcrHeader {
    /// Grid dimensions, available once the header validated.
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        let points = usize::try_from(self.num_points).ok().filter(|&p| p > 0)?;
        let profiles = usize::try_from(self.num_profiles).ok().filter(|&n| n > 0)?;
        Some((points, profiles))
    }

    fn validate(&self) -> Result<()> {
        if self.num_points <= 0 {
            return Err(Error::HeaderParseError("NumPoints"));
        }
        if self.num_profiles <= 0 {
            return Err(Error::HeaderParseError("NumProfiles"));
        }
        if self.x_scale.is_nan() {
            return Err(Error::HeaderParseError("XScale"));
        }
        if self.y_scale.is_nan() {
            return Err(Error::HeaderParseError("YScale"));
        }
        if self.z_scale.is_nan() {
            return Err(Error::HeaderParseError("ZScale"));
        }
        if self.create_date.is_none() {
            return Err(Error::HeaderParseError("CreateDate"));
        }
        if self.mod_date.is_none() {
            return Err(Error::HeaderParseError("ModDate"));
        }
        Ok(())
    }
}

/// Parse the header lines, adding every key/value pair to `metadata`.
///
/// # Errors
///
/// - [`Error::BadHeaderSection`] for fewer than [`MIN_HEADER_LINES`] lines
/// - [`Error::InvalidVersionField`] if the first line does not start with `a`
/// - [`Error::HeaderParseError`] if a required field is missing or unparsable
/// - [`Error::DuplicateMetadataKey`] from the metadata duplicate policy
pub fn parse(lines: &[&str], metadata: &mut Metadata) -> Result<BcrHeader> {
    if lines.len() < MIN_HEADER_LINES {
        return Err(Error::BadHeaderSection {
            found: lines.len(),
            required: MIN_HEADER_LINES,
        });
    }

    let version_field = lines[0];
    if !version_field
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'a'))
    {
        return Err(Error::InvalidVersionField(version_field.to_string()));
    }

    let mut header = BcrHeader {
        version_field: version_field.to_string(),
        ..BcrHeader::default()
    };

    for line in &lines[1..] {
        let pair = sections::key_value(line);
        if sections::is_sentinel(pair) {
            debug!("Skipping malformed header line '{}'", line);
            continue;
        }
        let (key, value) = pair;
        metadata.insert(key, value)?;

        match key.to_ascii_uppercase().as_str() {
            "MANUFACID" => header.manufacturer_id = value.to_string(),
            "CREATEDATE" => header.create_date = parse_timestamp(value),
            "MODDATE" => header.mod_date = parse_timestamp(value),
            "NUMPOINTS" => header.num_points = parse_count(value),
            "NUMPROFILES" => header.num_profiles = parse_count(value),
            "XSCALE" => header.x_scale = parse_float(value),
            "YSCALE" => header.y_scale = parse_float(value),
            "ZSCALE" => header.z_scale = parse_float(value),
            // ZResolution, Compression, DataType, CheckType and unknown keys
            // stay in the metadata only
            _ => {}
        }
    }

    header.validate()?;
    debug!(
        "Header: {} points x {} profiles, scales ({}, {}, {})",
        header.num_points, header.num_profiles, header.x_scale, header.y_scale, header.z_scale
    );
    Ok(header)
}

/// Parse a `ddMMyyyyHHmm` timestamp; anything but 12 digits is rejected.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if value.len() != 12 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).ok()
}

pub fn parse_count(value: &str) -> i32 {
    value.parse().unwrap_or(UNPARSED_COUNT)
}

/// Locale-independent float parse; NaN when unparsable.
pub fn parse_float(value: &str) -> f64 {
    value.parse().unwrap_or(f64::NAN)
}
