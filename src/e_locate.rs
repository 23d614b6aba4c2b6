// src/e_locate.rs

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::e_types::{Anchor, AnchorMiss, Location};

/// Searches `path` for `needle` and returns where it was first found after `anchor`.
///
/// An empty needle returns [`Location::UNKNOWN`] without reading the file.
/// Failing to read the file is an error; not finding the needle is not.
/// Bytes that are not valid UTF-8 are replaced, never rejected.
pub fn locate(path: &Path, needle: &str, anchor: &Anchor, miss: AnchorMiss) -> Result<Location> {
    if needle.is_empty() {
        return Ok(Location::UNKNOWN);
    }
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read source file {}", path.display()))?;
    let content = String::from_utf8_lossy(&bytes);
    Ok(locate_in_text(&content, needle, anchor, miss))
}

/// Same as [`locate`] on text already in memory.
///
/// A match at offset 0 counts as not found.
///
/// # Example
/// ```
/// use webpack_e::e_locate::locate_in_text;
/// use webpack_e::{Anchor, AnchorMiss};
///
/// let src = "import a from 'a'\nimport b from 'missing'\n";
/// let loc = locate_in_text(src, "missing", &Anchor::Start, AnchorMiss::SearchFromStart);
/// assert_eq!((loc.line, loc.col, loc.end_col), (2, 16, Some(23)));
/// ```
pub fn locate_in_text(content: &str, needle: &str, anchor: &Anchor, miss: AnchorMiss) -> Location {
    if needle.is_empty() {
        return Location::UNKNOWN;
    }
    let start = match resolve_anchor(content, anchor, miss) {
        Some(start) => start,
        None => return Location::UNKNOWN,
    };
    let found = match content[start..].find(needle) {
        Some(pos) => start + pos,
        None => return Location::UNKNOWN,
    };
    if found == 0 {
        return Location::UNKNOWN;
    }

    let (line, col) = offset_to_location(content, found);
    Location {
        line,
        col,
        end_line: None,
        end_col: Some(col + needle.chars().count()),
    }
}

/// Byte offset where the search begins, or `None` when the search should not run at all.
fn resolve_anchor(content: &str, anchor: &Anchor, miss: AnchorMiss) -> Option<usize> {
    match anchor {
        Anchor::Start => Some(0),
        Anchor::Offset(offset) => Some(ceil_char_boundary(content, *offset)),
        Anchor::Text(text) => match content.find(text.as_str()) {
            Some(pos) => Some(pos),
            None => match miss {
                AnchorMiss::SearchFromStart => {
                    log::debug!("anchor {:?} not found, searching from start", text);
                    Some(0)
                }
                AnchorMiss::NotFound => {
                    log::debug!("anchor {:?} not found", text);
                    None
                }
            },
        },
    }
}

fn ceil_char_boundary(content: &str, offset: usize) -> usize {
    let mut offset = offset.min(content.len());
    while !content.is_char_boundary(offset) {
        offset += 1;
    }
    offset
}

/// Converts a byte offset into a 1-based `(line, column)` pair.
///
/// The line is one more than the number of `\n` before the offset. The
/// column counts characters from the one after the preceding `\n`, so the
/// first character of a line is column 1.
pub fn offset_to_location(content: &str, offset: usize) -> (usize, usize) {
    let before = &content[..ceil_char_boundary(content, offset)];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let col = before[line_start..].chars().count() + 1;
    (line, col)
}
