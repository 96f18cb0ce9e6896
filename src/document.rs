//! High-level API for reading BCR files.

use chrono::NaiveDateTime;
use log::{debug, info, warn};
use std::fs;
use std::path::Path;

use crate::data;
use crate::error::{Error, Result, Status};
use crate::header::{self, BcrHeader};
use crate::models::{DocumentSummary, Metadata, Point3D};
use crate::options::{DuplicateKeys, KeyCase, ReaderOptions, SectionLayout};
use crate::raster::RasterGrid;
use crate::sections;
use crate::trailer::{self, TrailerParameters};

/// A parsed BCR surface-topography file.
///
/// Construction never fails: the outcome is recorded in [`status`](Self::status)
/// and, for failures, [`error`](Self::error). Data accessors return NaN or `None`
/// unless the status is `Ok` or `IncompleteData`.
///
/// # Examples
///
/// ```no_run
/// use bcr_reader::{BcrDocument, Status};
///
/// let doc = BcrDocument::from_file("surface.bcr");
/// if doc.status() == Status::Ok {
///     let profile = doc.profile_at(0).unwrap_or_default();
///     println!("first profile has {} points", profile.len());
/// }
/// ```
#[derive(Debug)]
pub struct BcrDocument {
    status: Status,
    error: Option<Error>,
    options: ReaderOptions,
    header: BcrHeader,
    trailer: TrailerParameters,
    metadata: Metadata,
    grid: Option<RasterGrid>,
}

impl BcrDocument {
    /// Read and parse a BCR file with default options.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
        BcrReaderBuilder::new().from_file(path)
    }

    /// Parse BCR text with default options.
    pub fn from_text(text: &str) -> Self {
        BcrReaderBuilder::new().from_text(text)
    }

    fn new(options: ReaderOptions) -> Self {
        Self {
            status: Status::Ok,
            error: None,
            options,
            header: BcrHeader::default(),
            trailer: TrailerParameters::default(),
            metadata: Metadata::new(options.duplicate_keys, options.key_case),
            grid: None,
        }
    }

    fn load(path: &Path, options: ReaderOptions) -> Self {
        debug!("Loading {}", path.display());
        match fs::read(path) {
            Ok(bytes) => Self::parse(&String::from_utf8_lossy(&bytes), options),
            Err(source) => {
                let mut doc = Self::new(options);
                doc.fail(Error::NoFile {
                    path: path.to_path_buf(),
                    source,
                });
                doc
            }
        }
    }

    fn parse(text: &str, options: ReaderOptions) -> Self {
        let mut doc = Self::new(options);
        if let Err(err) = doc.run_pipeline(text) {
            doc.fail(err);
        }
        doc
    }

    fn fail(&mut self, err: Error) {
        warn!("BCR parsing stopped: {}", err);
        self.status = err.status();
        self.error = Some(err);
    }

    fn run_pipeline(&mut self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(Error::NoData);
        }
        let sections = sections::split(text, self.options.layout)?;
        debug!("Split into {} sections", sections.len());

        let header_lines = sections::lines_of(sections[0]);
        self.header = header::parse(&header_lines, &mut self.metadata)?;

        let (points, profiles) = self
            .header
            .dimensions()
            .ok_or(Error::HeaderParseError("NumPoints"))?;
        let mut grid = RasterGrid::new(points, profiles)?;
        let data_lines = sections::lines_of(sections[1]);
        let samples = data::fill_grid(&data_lines, self.header.z_scale, &mut grid);
        if samples != grid.capacity() {
            warn!(
                "Data section holds {} samples, header declares {}",
                samples,
                grid.capacity()
            );
        }

        let trailer_lines = self
            .options
            .layout
            .has_trailer(sections.len())
            .then(|| sections::lines_of(sections[2]));
        self.trailer = trailer::parse(trailer_lines.as_deref(), &mut self.metadata)?;

        let grid = grid
            .with_scales(self.header.x_scale, self.header.y_scale)
            .with_offsets(
                self.trailer.x_offset,
                self.trailer.y_offset,
                self.trailer.z_offset,
            );
        if !grid.is_complete() {
            self.status = Status::IncompleteData;
        }
        info!(
            "Parsed {} x {} raster, {} of {} samples",
            points,
            profiles,
            grid.filled(),
            grid.capacity()
        );
        self.grid = Some(grid);
        Ok(())
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// The error that set a failure status.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Convert a failure status into `Err` so callers can use `?`.
    ///
    /// `IncompleteData` counts as success.
    pub fn into_result(mut self) -> Result<Self> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }

    pub fn options(&self) -> ReaderOptions {
        self.options
    }

    pub fn header(&self) -> &BcrHeader {
        &self.header
    }

    pub fn version_field(&self) -> &str {
        &self.header.version_field
    }

    pub fn manufacturer_id(&self) -> &str {
        &self.header.manufacturer_id
    }

    pub fn create_date(&self) -> Option<NaiveDateTime> {
        self.header.create_date
    }

    pub fn mod_date(&self) -> Option<NaiveDateTime> {
        self.header.mod_date
    }

    pub fn num_points(&self) -> i32 {
        self.header.num_points
    }

    pub fn num_profiles(&self) -> i32 {
        self.header.num_profiles
    }

    pub fn x_scale(&self) -> f64 {
        self.header.x_scale
    }

    pub fn y_scale(&self) -> f64 {
        self.header.y_scale
    }

    pub fn z_scale(&self) -> f64 {
        self.header.z_scale
    }

    pub fn x_offset(&self) -> f64 {
        self.trailer.x_offset
    }

    pub fn y_offset(&self) -> f64 {
        self.trailer.y_offset
    }

    pub fn z_offset(&self) -> f64 {
        self.trailer.z_offset
    }

    /// Sample temperature in °C.
    pub fn sample_temperature(&self) -> f64 {
        self.trailer.sample_temperature
    }

    /// Header and trailer entries in file order.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn data(&self) -> Option<&RasterGrid> {
        self.grid.as_ref().filter(|_| self.status.has_data())
    }

    /// The height raster, if parsing got that far.
    pub fn grid(&self) -> Option<&RasterGrid> {
        self.data()
    }

    pub fn is_complete(&self) -> bool {
        self.data().is_some_and(RasterGrid::is_complete)
    }

    /// Heights of one profile, NaN-filled for an out-of-range index.
    pub fn profile_at(&self, profile: i64) -> Option<Vec<f64>> {
        self.data().map(|grid| grid.profile_at(profile))
    }

    pub fn points_of_profile(&self, profile: i64) -> Option<Vec<Point3D>> {
        self.data().map(|grid| grid.points_of_profile(profile))
    }

    /// Height in metres, NaN if unavailable or out of range.
    pub fn value_at(&self, point: i64, profile: i64) -> f64 {
        self.data()
            .map_or(f64::NAN, |grid| grid.value_at(point, profile))
    }

    pub fn point_at(&self, point: i64, profile: i64) -> Option<Point3D> {
        self.data().map(|grid| grid.point_at(point, profile))
    }

    /// Serializable overview of the document.
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            status: self.status,
            error: self.error.as_ref().map(ToString::to_string),
            layout: self.options.layout,
            version_field: self.header.version_field.clone(),
            manufacturer_id: self.header.manufacturer_id.clone(),
            create_date: self.header.create_date,
            mod_date: self.header.mod_date,
            num_points: self.header.num_points,
            num_profiles: self.header.num_profiles,
            x_scale: self.header.x_scale,
            y_scale: self.header.y_scale,
            z_scale: self.header.z_scale,
            x_offset: self.trailer.x_offset,
            y_offset: self.trailer.y_offset,
            z_offset: self.trailer.z_offset,
            sample_temperature: self.trailer.sample_temperature,
            samples_filled: self.data().map_or(0, RasterGrid::filled),
            metadata: self.metadata.clone(),
        }
    }
}

/// Builder for configuring how BCR files are parsed.
///
/// # Examples
///
/// ```no_run
/// use bcr_reader::{BcrReaderBuilder, DuplicateKeys, SectionLayout};
///
/// let doc = BcrReaderBuilder::new()
///     .layout(SectionLayout::Legacy)
///     .duplicate_keys(DuplicateKeys::Reject)
///     .from_file("surface.bcr");
/// println!("{}", doc.status());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BcrReaderBuilder {
    options: ReaderOptions,
}

impl BcrReaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a complete set of options.
    pub fn with_options(options: ReaderOptions) -> Self {
        Self { options }
    }

    /// Section counting rule. Default is [`SectionLayout::Standard`].
    pub fn layout(mut self, layout: SectionLayout) -> Self {
        self.options.layout = layout;
        self
    }

    /// Handling of repeated metadata keys. Default is [`DuplicateKeys::Overwrite`].
    pub fn duplicate_keys(mut self, policy: DuplicateKeys) -> Self {
        self.options.duplicate_keys = policy;
        self
    }

    /// Case of stored metadata keys. Default is [`KeyCase::Preserve`].
    pub fn key_case(mut self, key_case: KeyCase) -> Self {
        self.options.key_case = key_case;
        self
    }

    pub fn from_file<P: AsRef<Path>>(self, path: P) -> BcrDocument {
        BcrDocument::load(path.as_ref(), self.options)
    }

    pub fn from_text(self, text: &str) -> BcrDocument {
        BcrDocument::parse(text, self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = "aISO-1.0\n\
        ManufacID = test\n\
        CreateDate = 010120240000\n\
        ModDate = 010120240000\n\
        NumPoints = 2\n\
        NumProfiles = 2\n\
        XScale = 1\n\
        YScale = 1\n\
        ZScale = 1\n\
        ZResolution = -1\n\
        Compression = 0\n\
        DataType = 7\n\
        CheckType = 0\n\
        *\n1 2 3 4\n*\n";

    #[test]
    fn test_minimal_document() {
        let doc = BcrDocument::from_text(MINIMAL);
        assert_eq!(doc.status(), Status::Ok);
        assert!(doc.error().is_none());
        assert!(doc.is_complete());
        assert_eq!(doc.value_at(1, 1), 4.0);
        assert_eq!(doc.metadata().get("MetaDataInFile"), Some("none"));
    }

    #[test]
    fn test_failed_document_hides_data() {
        let doc = BcrDocument::from_text(&MINIMAL.replace("aISO", "bISO"));
        assert_eq!(doc.status(), Status::InvalidVersionField);
        assert!(doc.grid().is_none());
        assert!(doc.value_at(0, 0).is_nan());
        assert!(doc.profile_at(0).is_none());
        assert!(doc.point_at(0, 0).is_none());
        assert!(!doc.is_complete());
        assert!(doc.into_result().is_err());
    }

    #[test]
    fn test_document_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BcrDocument>();
    }
}
