//! Parser configuration.

use serde::Serialize;

/// How `*`-delimited sections are counted.
///
/// Files in the wild disagree on whether the remainder after the final `*`
/// (usually a line break) is a section of its own. Both readings are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SectionLayout {
    /// Whitespace after the final `*` is ignored and empty segments are
    /// dropped; 2 sections (header, data) or 3 (header, data, trailer). A
    /// whitespace-only segment between two `*` is kept, so an empty data
    /// section still occupies its slot.
    #[default]
    Standard,
    /// Only empty segments are dropped, so the text after the closing `*` counts;
    /// 3 or 4 sections, with a trailer only when there are 4.
    Legacy,
}

impl SectionLayout {
    /// Inclusive range of accepted section counts.
    pub fn accepted_counts(self) -> (usize, usize) {
        match self {
            SectionLayout::Standard => (2, 3),
            SectionLayout::Legacy => (3, 4),
        }
    }

    /// Whether a file split into `count` sections carries a trailer.
    pub fn has_trailer(self, count: usize) -> bool {
        count == self.accepted_counts().1
    }

    /// The part of `raw_text` that is split into sections.
    pub(crate) fn significant_text(self, raw_text: &str) -> &str {
        match self {
            SectionLayout::Standard => raw_text.trim_end(),
            SectionLayout::Legacy => raw_text,
        }
    }
}

/// What happens when a metadata key is inserted a second time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DuplicateKeys {
    /// The later value replaces the earlier one, keeping the original position
    #[default]
    Overwrite,
    /// The later value is ignored
    KeepFirst,
    /// Parsing fails with `DuplicateMetadataKey`
    Reject,
}

/// How metadata keys are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum KeyCase {
    /// Keys are stored as written in the file
    #[default]
    Preserve,
    /// Keys are folded to upper case on insert and lookup
    Upper,
}

impl KeyCase {
    pub fn apply(self, key: &str) -> String {
        match self {
            KeyCase::Preserve => key.to_string(),
            KeyCase::Upper => key.to_uppercase(),
        }
    }
}

/// Options controlling how a BCR file is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReaderOptions {
    pub layout: SectionLayout,
    pub duplicate_keys: DuplicateKeys,
    pub key_case: KeyCase,
}
