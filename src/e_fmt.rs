use serde_json::Value;
use std::env;
use std::path::{Component, Path, PathBuf};

use crate::e_types::{Level, Location};

/// Trimmed text up to (not including) the first line break.
///
/// Only the message as a whole is trimmed; spaces before the break stay.
pub fn first_line(message: &str) -> &str {
    let message = message.trim();
    let line = message.split('\n').next().unwrap_or("");
    line.strip_suffix('\r').unwrap_or(line)
}

/// Coerces a record's `message` field to text. Missing and `null` become empty.
pub fn message_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

fn absolute_normalized(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir().unwrap_or_default().join(path)
    };
    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Path from `root` to `target`, working purely on the path text.
///
/// Both sides are made absolute against the current directory first. The
/// result is empty when they name the same directory.
///
/// # Example
/// ```
/// use std::path::{Path, PathBuf};
/// use webpack_e::e_fmt::relative_path;
///
/// assert_eq!(
///     relative_path(Path::new("/work/app"), Path::new("/work/app/src/main.js")),
///     PathBuf::from("src/main.js")
/// );
/// assert_eq!(
///     relative_path(Path::new("/work/app/src"), Path::new("/work/lib/x.js")),
///     PathBuf::from("../../lib/x.js")
/// );
/// ```
pub fn relative_path(root: &Path, target: &Path) -> PathBuf {
    let root = absolute_normalized(root);
    let target = absolute_normalized(target);
    let root_parts: Vec<Component> = root.components().collect();
    let target_parts: Vec<Component> = target.components().collect();

    let common = root_parts
        .iter()
        .zip(target_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..root_parts.len() {
        rel.push("..");
    }
    for part in &target_parts[common..] {
        rel.push(part.as_os_str());
    }
    rel
}

/// `~endLine,endCol` suffix; empty when no end position is known.
pub fn render_tail(loc: &Location) -> String {
    if !loc.has_end() {
        return String::new();
    }
    let end_line = loc
        .end_line
        .map(|line| format!("{},", line))
        .unwrap_or_default();
    format!("~{}{}", end_line, loc.end_col.unwrap_or(0))
}

/// Renders one `!>level: file:line,col[~endLine,endCol]: message` line.
///
/// # Example
/// ```
/// use webpack_e::e_fmt::render_problem_line;
/// use webpack_e::{Level, Location};
///
/// let line = render_problem_line(Level::Error, "src/a.js", &Location::new(3, 7), "boom", "?");
/// assert_eq!(line, "!>error: src/a.js:3,7: boom");
/// ```
pub fn render_problem_line(
    level: Level,
    file: &str,
    loc: &Location,
    message: &str,
    placeholder: &str,
) -> String {
    let message = if message.is_empty() {
        placeholder
    } else {
        message
    };
    format!(
        "!>{}: {}:{},{}{}: {}",
        level,
        file,
        loc.line,
        loc.col,
        render_tail(loc),
        message
    )
}
