use chrono::NaiveDateTime;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

use crate::error::{Error, Result, Status};
use crate::options::{DuplicateKeys, KeyCase, SectionLayout};

/// A point in physical coordinates (metres).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// True if any coordinate is NaN, i.e. the point came from an out-of-range index.
    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }
}

impl fmt::Display for Point3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Point3D - X:{} Y:{} Z:{}]", self.x, self.y, self.z)
    }
}

/// Ordered key/value store for header and trailer entries.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    entries: Vec<(String, String)>,
    policy: DuplicateKeys,
    key_case: KeyCase,
}

impl Metadata {
    pub fn new(policy: DuplicateKeys, key_case: KeyCase) -> Self {
        Self {
            entries: Vec::new(),
            policy,
            key_case,
        }
    }

    /// Insert an entry, applying the key case and duplicate policy.
    pub fn insert(&mut self, key: &str, value: &str) -> Result<()> {
        let key = self.key_case.apply(key);
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            None => self.entries.push((key, value.to_string())),
            Some(entry) => match self.policy {
                DuplicateKeys::Overwrite => entry.1 = value.to_string(),
                DuplicateKeys::KeepFirst => {}
                DuplicateKeys::Reject => return Err(Error::DuplicateMetadataKey(key)),
            },
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        let key = self.key_case.apply(key);
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// Serialized as a map so entries keep file order.
impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Serializable overview of a parsed document.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DocumentSummary {
    pub status: Status,
    pub error: Option<String>,
    pub layout: SectionLayout,
    pub version_field: String,
    pub manufacturer_id: String,
    pub create_date: Option<NaiveDateTime>,
    pub mod_date: Option<NaiveDateTime>,
    pub num_points: i32,
    pub num_profiles: i32,
    pub x_scale: f64,
    pub y_scale: f64,
    pub z_scale: f64,
    pub x_offset: f64,
    pub y_offset: f64,
    pub z_offset: f64,
    pub sample_temperature: f64,
    pub samples_filled: usize,
    pub metadata: Metadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_preserves_order() {
        let mut meta = Metadata::default();
        meta.insert("b", "1").unwrap();
        meta.insert("a", "2").unwrap();
        meta.insert("c", "3").unwrap();
        let keys: Vec<_> = meta.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_metadata_overwrite_keeps_position() {
        let mut meta = Metadata::new(DuplicateKeys::Overwrite, KeyCase::Preserve);
        meta.insert("a", "1").unwrap();
        meta.insert("b", "2").unwrap();
        meta.insert("a", "3").unwrap();
        assert_eq!(meta.len(), 2);
        assert_eq!(meta.iter().next(), Some(("a", "3")));
    }

    #[test]
    fn test_metadata_keep_first() {
        let mut meta = Metadata::new(DuplicateKeys::KeepFirst, KeyCase::Preserve);
        meta.insert("a", "1").unwrap();
        meta.insert("a", "2").unwrap();
        assert_eq!(meta.get("a"), Some("1"));
    }

    #[test]
    fn test_metadata_reject() {
        let mut meta = Metadata::new(DuplicateKeys::Reject, KeyCase::Preserve);
        meta.insert("a", "1").unwrap();
        let err = meta.insert("a", "2").unwrap_err();
        assert_eq!(err.status(), Status::DuplicateMetadataKey);
    }

    #[test]
    fn test_metadata_upper_case_lookup() {
        let mut meta = Metadata::new(DuplicateKeys::Overwrite, KeyCase::Upper);
        meta.insert("SampleTemperature", "21.5 C").unwrap();
        assert_eq!(meta.get("sampletemperature"), Some("21.5 C"));
        assert_eq!(meta.iter().next(), Some(("SAMPLETEMPERATURE", "21.5 C")));
    }

    #[test]
    fn test_metadata_serializes_in_order() {
        let mut meta = Metadata::default();
        meta.insert("Zeta", "1").unwrap();
        meta.insert("Alpha", "2").unwrap();
        let json = serde_json::to_string(&meta).unwrap();
        assert_eq!(json, r#"{"Zeta":"1","Alpha":"2"}"#);
    }

    #[test]
    fn test_point_display_and_nan() {
        let p = Point3D::new(1.0, 2.5, -0.5);
        assert_eq!(p.to_string(), "[Point3D - X:1 Y:2.5 Z:-0.5]");
        assert!(!p.is_nan());
        assert!(Point3D::new(f64::NAN, 0.0, 0.0).is_nan());
    }
}
