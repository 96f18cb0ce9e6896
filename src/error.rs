//! Error and status types for the BCR reader.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::options::SectionLayout;

/// Result type alias for BCR parsing stages.
pub type Result<T> = std::result::Result<T, Error>;

/// Overall outcome of parsing a BCR file.
///
/// `Ok` and `IncompleteData` are the two success states; every other value is a
/// terminal failure recorded by the first stage that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    /// All stages succeeded and the grid is fully populated
    Ok,
    /// Parsing succeeded but the data section supplied fewer samples than declared
    IncompleteData,
    /// The file could not be opened or read
    NoFile,
    /// The file is empty or contains only whitespace
    NoData,
    /// Wrong number of `*`-delimited sections
    InvalidSectionCount,
    /// Fewer header lines than the mandatory key set requires
    BadHeaderSection,
    /// The version tag does not start with `a`
    InvalidVersionField,
    /// A required header field is missing or unparsable, or the declared
    /// dimensions are too large to allocate
    HeaderParseError,
    /// A metadata key occurred twice while duplicates are rejected
    DuplicateMetadataKey,
}

impl Status {
    /// Whether parsed data is available for this status.
    pub fn has_data(self) -> bool {
        matches!(self, Status::Ok | Status::IncompleteData)
    }

    pub fn is_failure(self) -> bool {
        !self.has_data()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Ok => "OK",
            Status::IncompleteData => "IncompleteData",
            Status::NoFile => "NoFile",
            Status::NoData => "NoData",
            Status::InvalidSectionCount => "InvalidSectionCount",
            Status::BadHeaderSection => "BadHeaderSection",
            Status::InvalidVersionField => "InvalidVersionField",
            Status::HeaderParseError => "HeaderParseError",
            Status::DuplicateMetadataKey => "DuplicateMetadataKey",
        };
        f.write_str(name)
    }
}

/// Errors raised by the parsing stages.
///
/// Each variant corresponds to exactly one failure [`Status`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input file could not be read
    #[error("cannot read '{}': {source}", .path.display())]
    NoFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input text is empty or whitespace only
    #[error("file contains no data")]
    NoData,

    /// Section count outside the range accepted by the layout
    #[error("found {found} sections, {layout:?} layout accepts {min} to {max}")]
    InvalidSectionCount {
        found: usize,
        layout: SectionLayout,
        min: usize,
        max: usize,
    },

    /// Header section is too short
    #[error("header has {found} lines, at least {required} required")]
    BadHeaderSection { found: usize, required: usize },

    /// Version tag does not start with `a`
    #[error("invalid version field '{0}'")]
    InvalidVersionField(String),

    /// A required header field failed validation
    #[error("header field {0} is missing or invalid")]
    HeaderParseError(&'static str),

    /// Declared dimensions exceed the addressable or allocatable size
    #[error("raster of {points} x {profiles} samples is too large")]
    RasterTooLarge { points: usize, profiles: usize },

    /// Duplicate metadata key under the reject policy
    #[error("duplicate metadata key '{0}'")]
    DuplicateMetadataKey(String),
}

impl Error {
    /// The status code this error terminates the pipeline with.
    pub fn status(&self) -> Status {
        match self {
            Error::NoFile { .. } => Status::NoFile,
            Error::NoData => Status::NoData,
            Error::InvalidSectionCount { .. } => Status::InvalidSectionCount,
            Error::BadHeaderSection { .. } => Status::BadHeaderSection,
            Error::InvalidVersionField(_) => Status::InvalidVersionField,
            Error::HeaderParseError(_) | Error::RasterTooLarge { .. } => Status::HeaderParseError,
            Error::DuplicateMetadataKey(_) => Status::DuplicateMetadataKey,
        }
    }
}
