//! Splitting raw BCR text into sections, lines and key/value pairs.

use crate::error::{Error, Result};
use crate::options::SectionLayout;

/// Section delimiter.
pub const SECTION_DELIMITER: char = '*';

/// Start of an inline comment.
pub const COMMENT_MARKER: char = ';';

/// Pair returned for lines that are not `KEY = VALUE`.
pub const SENTINEL_PAIR: (&str, &str) = (" ", " ");

/// Split `raw_text` into its `*`-delimited sections.
///
/// # Errors
///
/// Returns [`Error::InvalidSectionCount`] when the number of sections lies
/// outside the range accepted by `layout`.
pub fn split(raw_text: &str, layout: SectionLayout) -> Result<Vec<&str>> {
    let sections: Vec<&str> = layout
        .significant_text(raw_text)
        .split(SECTION_DELIMITER)
        .filter(|segment| !segment.is_empty())
        .collect();

    let (min, max) = layout.accepted_counts();
    if sections.len() < min || sections.len() > max {
        return Err(Error::InvalidSectionCount {
            found: sections.len(),
            layout,
            min,
            max,
        });
    }
    Ok(sections)
}

/// Non-empty lines of a section with comments removed and whitespace trimmed.
pub fn lines_of(section: &str) -> Vec<&str> {
    section
        .split(['\r', '\n'])
        .map(strip_comment)
        .filter(|line| !line.is_empty())
        .collect()
}

fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT_MARKER) {
        Some(pos) => line[..pos].trim(),
        None => line.trim(),
    }
}

/// Split a `KEY = VALUE` line.
///
/// Lines without exactly one `=` yield [`SENTINEL_PAIR`].
pub fn key_value(line: &str) -> (&str, &str) {
    let mut parts = line.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) => (key.trim(), value.trim()),
        _ => SENTINEL_PAIR,
    }
}

/// Whether a pair is the malformed-line sentinel.
pub fn is_sentinel(pair: (&str, &str)) -> bool {
    pair == SENTINEL_PAIR
}
