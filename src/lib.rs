//! # BCR Reader
//!
//! A Rust library for reading surface-topography raster files in the BCR text format
//! (ISO 25178-7, ISO 25178-71 and EUNA 15178).
//!
//! A BCR file consists of a header, a whitespace-delimited data section and an
//! optional metadata trailer, each closed by a `*`:
//!
//! ```text
//! aISO-1.0
//! ManufacID   = ACME-SPM
//! CreateDate  = 010220231230
//! ModDate     = 010220231230
//! NumPoints   = 3
//! NumProfiles = 2
//! XScale      = 1.0e-6
//! YScale      = 1.0e-6
//! ZScale      = 1.0e-9
//! ...
//! *
//! 12 15 11
//! 10 14 13
//! *
//! ScanFieldOriginX = 0.002 m
//! *
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use bcr_reader::{BcrDocument, Status};
//!
//! let doc = BcrDocument::from_file("surface.bcr");
//! match doc.status() {
//!     Status::Ok | Status::IncompleteData => {
//!         let p = doc.point_at(2, 1).unwrap();
//!         println!("x = {} m, y = {} m, z = {} m", p.x, p.y, p.z);
//!     }
//!     status => eprintln!("cannot read file: {}", status),
//! }
//! ```
//!
//! ## Error Handling
//!
//! Parsing never panics or returns early: the first failing stage records a
//! [`Status`] and an [`Error`], and every later stage is skipped. Callers that
//! prefer `?` can convert the document:
//!
//! ```no_run
//! use bcr_reader::BcrDocument;
//!
//! let doc = BcrDocument::from_file("surface.bcr").into_result()?;
//! println!("{} profiles", doc.num_profiles());
//! # Ok::<(), bcr_reader::Error>(())
//! ```
//!
//! ## Configuration
//!
//! Section counting, duplicate metadata keys and key case are configurable through
//! [`BcrReaderBuilder`]; see [`ReaderOptions`].
//!
//! The legacy `Compression` and `CheckType` parameters are not evaluated, and
//! binary ISO 25178-71 trailers are not interpreted.

// Public API modules
pub mod document;
pub mod error;
pub mod options;

// Re-export commonly used types
pub use document::{BcrDocument, BcrReaderBuilder};
pub use error::{Error, Result, Status};
pub use models::{DocumentSummary, Metadata, Point3D};
pub use options::{DuplicateKeys, KeyCase, ReaderOptions, SectionLayout};
pub use raster::RasterGrid;

// Parsing stages (public but not part of the high-level API)
pub mod data;
pub mod header;
pub mod models;
pub mod raster;
pub mod sections;
pub mod trailer;
