/// Test utilities for building BCR files
use std::fmt::Write;

/// Builder for creating BCR test files
pub struct BcrBuilder {
    version: String,
    header: Vec<(String, String)>,
    extra_header_lines: Vec<String>,
    data: Vec<String>,
    trailer: Option<Vec<String>>,
}

impl BcrBuilder {
    /// Create a builder with a complete, valid header for a `points x profiles` raster
    pub fn new(points: i32, profiles: i32) -> Self {
        let header = [
            ("ManufacID", "ACME-SPM".to_string()),
            ("CreateDate", "010220231230".to_string()),
            ("ModDate", "020220230815".to_string()),
            ("NumPoints", points.to_string()),
            ("NumProfiles", profiles.to_string()),
            ("XScale", "1.0e-6".to_string()),
            ("YScale", "2.0e-6".to_string()),
            ("ZScale", "1.0".to_string()),
            ("ZResolution", "-1".to_string()),
            ("Compression", "0".to_string()),
            ("DataType", "7".to_string()),
            ("CheckType", "0".to_string()),
        ];
        Self {
            version: "aISO-1.0".to_string(),
            header: header
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            extra_header_lines: Vec::new(),
            data: Vec::new(),
            trailer: None,
        }
    }

    /// Replace the version tag
    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Set (or add) a header key
    pub fn header(mut self, key: &str, value: &str) -> Self {
        match self.header.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.header.push((key.to_string(), value.to_string())),
        }
        self
    }

    /// Remove a header key entirely
    pub fn without_header(mut self, key: &str) -> Self {
        self.header.retain(|(k, _)| k != key);
        self
    }

    /// Append a raw header line (comments, decorations, duplicates)
    pub fn raw_header_line(mut self, line: &str) -> Self {
        self.extra_header_lines.push(line.to_string());
        self
    }

    /// Add one data line
    pub fn data_line(mut self, line: &str) -> Self {
        self.data.push(line.to_string());
        self
    }

    /// Add all values, one profile per line
    pub fn values(mut self, values: &[f64], per_line: usize) -> Self {
        for chunk in values.chunks(per_line.max(1)) {
            let line = chunk
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            self.data.push(line);
        }
        self
    }

    /// Add a trailer line (creates the trailer section)
    pub fn trailer_line(mut self, line: &str) -> Self {
        self.trailer
            .get_or_insert_with(Vec::new)
            .push(line.to_string());
        self
    }

    /// Render the file text with CR/LF line endings
    pub fn build(self) -> String {
        let mut out = String::new();
        writeln!(out, "{}\r", self.version).unwrap();
        for (key, value) in &self.header {
            writeln!(out, "{:<12}= {}\r", key, value).unwrap();
        }
        for line in &self.extra_header_lines {
            writeln!(out, "{}\r", line).unwrap();
        }
        out.push_str("*\r\n");
        for line in &self.data {
            writeln!(out, "{}\r", line).unwrap();
        }
        out.push_str("*\r\n");
        if let Some(trailer) = &self.trailer {
            for line in trailer {
                writeln!(out, "{}\r", line).unwrap();
            }
            out.push_str("*\r\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_renders_sections() {
        let text = BcrBuilder::new(2, 1).data_line("1 2").build();
        assert!(text.starts_with("aISO-1.0\r\n"));
        assert_eq!(text.matches('*').count(), 2);
        assert!(text.contains("NumPoints   = 2\r\n"));
    }

    #[test]
    fn test_builder_with_trailer() {
        let text = BcrBuilder::new(1, 1)
            .data_line("0")
            .trailer_line("Key = Value")
            .build();
        assert_eq!(text.matches('*').count(), 3);
    }
}
