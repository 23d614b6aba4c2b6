use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Severity label printed at the start of every problem line.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warning,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warning => "warning",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved position inside a source file.
///
/// Lines and columns are 1-based; `0` means "unknown". The end position is
/// only present when a heuristic search recorded a span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub col: usize,
    pub end_line: Option<usize>,
    pub end_col: Option<usize>,
}

impl Location {
    pub const UNKNOWN: Location = Location {
        line: 0,
        col: 0,
        end_line: None,
        end_col: None,
    };

    pub fn new(line: usize, col: usize) -> Self {
        Location {
            line,
            col,
            end_line: None,
            end_col: None,
        }
    }

    pub fn is_known(&self) -> bool {
        self.line != 0
    }

    pub fn has_end(&self) -> bool {
        self.end_line.is_some() || self.end_col.is_some()
    }
}

/// Where a text search begins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Anchor {
    /// Search the whole file.
    #[default]
    Start,
    /// Start at a byte offset.
    Offset(usize),
    /// Start at the first occurrence of this text.
    Text(String),
}

/// What to do when an [`Anchor::Text`] does not occur in the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnchorMiss {
    /// Fall back to searching from the start of the file. This can match
    /// text that sits before where the anchor was expected.
    #[default]
    SearchFromStart,
    /// Give up and report an unknown location.
    NotFound,
}

pub const DEFAULT_EMPTY_MESSAGE: &str = "(see details in the bundler's own output)";

/// Knobs for [`crate::e_formatter::format_stats_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Base directory for the printed file paths. Without it the file field is left empty.
    pub project_root: Option<PathBuf>,
    pub anchor_miss: AnchorMiss,
    /// Printed in place of an empty message.
    pub empty_message: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            project_root: None,
            anchor_miss: AnchorMiss::default(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }
}

impl FormatOptions {
    pub fn with_project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = Some(root.into());
        self
    }

    pub fn with_anchor_miss(mut self, anchor_miss: AnchorMiss) -> Self {
        self.anchor_miss = anchor_miss;
        self
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }
}

/// Result of formatting a single diagnostic record.
pub type RecordOutcome = anyhow::Result<String>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_level_serializes_as_label() {
        assert_eq!(serde_json::to_value(Level::Error).unwrap(), json!("error"));
        assert_eq!(serde_json::to_value(Level::Warning).unwrap(), json!("warning"));
        let level: Level = serde_json::from_value(json!("warning")).unwrap();
        assert_eq!(level, Level::Warning);
        assert_eq!(level.to_string(), "warning");
    }
}
