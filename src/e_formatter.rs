// src/e_formatter.rs

//! Turns a bundler's stats object into problem-matcher lines.

use anyhow::Result;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::e_data_get::{data_get_opt, is_truthy, position_at};
use crate::e_fmt::{first_line, message_text, relative_path, render_problem_line};
use crate::e_heuristics::first_probe;
use crate::e_locate::locate;
use crate::e_types::{FormatOptions, Level, Location, RecordOutcome};

/// Formats `stats.compilation.errors` and `stats.compilation.warnings`.
///
/// The result is `"\n" + errors + "\n" + warnings`, each block being its
/// records' lines joined with `\n`. Missing stats produce an empty string.
///
/// # Example
/// ```
/// use serde_json::json;
/// use webpack_e::format_stats;
///
/// assert_eq!(format_stats(None, None), "");
/// let stats = json!({"compilation": {"errors": [], "warnings": []}});
/// assert_eq!(format_stats(Some(&stats), None), "\n\n");
/// ```
pub fn format_stats(stats: Option<&Value>, project_root: Option<&Path>) -> String {
    let mut options = FormatOptions::default();
    options.project_root = project_root.map(Path::to_path_buf);
    format_stats_with(stats, &options)
}

/// [`format_stats`] with every option exposed.
pub fn format_stats_with(stats: Option<&Value>, options: &FormatOptions) -> String {
    let compilation = match stats.and_then(|s| data_get_opt(s, "compilation")) {
        Some(c) if is_truthy(c) => c,
        _ => return String::new(),
    };

    let errors = record_list(compilation, "errors");
    let warnings = record_list(compilation, "warnings");

    let errors = join_outcomes(Level::Error, format_records(Level::Error, errors, options));
    let warnings = join_outcomes(
        Level::Warning,
        format_records(Level::Warning, warnings, options),
    );
    format!("\n{}\n{}", errors, warnings)
}

fn record_list<'a>(compilation: &'a Value, key: &str) -> &'a [Value] {
    match data_get_opt(compilation, key) {
        Some(Value::Array(items)) => items.as_slice(),
        Some(other) if is_truthy(other) => {
            log::warn!("compilation.{} is not a list, ignoring it", key);
            &[]
        }
        _ => &[],
    }
}

/// Formats every record independently. One failing record never affects the others.
pub fn format_records(level: Level, records: &[Value], options: &FormatOptions) -> Vec<RecordOutcome> {
    records
        .iter()
        .map(|record| format_record(level, record, options))
        .collect()
}

/// Joins outcomes with `\n`; failures are logged and leave an empty line behind.
pub fn join_outcomes(level: Level, outcomes: Vec<RecordOutcome>) -> String {
    outcomes
        .into_iter()
        .enumerate()
        .map(|(index, outcome)| {
            outcome.unwrap_or_else(|e| {
                log::warn!("Failed to format {} #{}: {:#}", level, index, e);
                String::new()
            })
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats a single diagnostic record into one problem line.
pub fn format_record(level: Level, record: &Value, options: &FormatOptions) -> Result<String> {
    log::trace!("{} record: {}", level, record);

    let resource = data_get_opt(record, "module.resource")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from);

    let file = match (&resource, &options.project_root) {
        (Some(resource), Some(root)) => relative_path(root, resource).display().to_string(),
        _ => String::new(),
    };

    let mut loc = Location::new(
        position_at(record, "error.error.loc.line"),
        position_at(record, "error.error.loc.column"),
    );

    let raw_message = message_text(data_get_opt(record, "message"));
    let mut message = first_line(&raw_message).to_string();

    if !loc.is_known() {
        if let Some((heuristic, probe)) = first_probe(record) {
            match &resource {
                Some(resource) => {
                    log::debug!(
                        "{} matched {} on {}, searching for {:?}",
                        level,
                        heuristic.name(),
                        resource.display(),
                        probe.needle
                    );
                    let found =
                        locate(resource, &probe.needle, &probe.anchor, options.anchor_miss)?;
                    if found.is_known() {
                        loc = found;
                    } else {
                        log::debug!("{:?} not found in {}", probe.needle, resource.display());
                    }
                }
                None => log::debug!(
                    "{} matched {} but has no module resource to search",
                    level,
                    heuristic.name()
                ),
            }
            if let Some(replacement) = probe.message {
                message = replacement;
            }
        }
    }

    Ok(render_problem_line(
        level,
        &file,
        &loc,
        &message,
        &options.empty_message,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::e_types::{AnchorMiss, DEFAULT_EMPTY_MESSAGE};
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_absent_stats() {
        assert_eq!(format_stats(None, None), "");
        assert_eq!(format_stats(Some(&Value::Null), None), "");
        assert_eq!(format_stats(Some(&json!({})), None), "");
        assert_eq!(format_stats(Some(&json!({"compilation": null})), None), "");
    }

    #[test]
    fn test_empty_lists() {
        let stats = json!({"compilation": {"errors": [], "warnings": []}});
        assert_eq!(format_stats(Some(&stats), Some(Path::new("/root"))), "\n\n");
    }

    #[test]
    fn test_missing_lists_count_as_empty() {
        let stats = json!({"compilation": {"errors": [{"message": "x"}]}});
        assert_eq!(
            format_stats(Some(&stats), None),
            "\n!>error: :0,0: x\n"
        );
    }

    #[test]
    fn test_precise_location_and_relative_file() {
        let record = json!({
            "module": {"resource": "/work/app/src/main.js"},
            "error": {"error": {"loc": {"line": 10, "column": 4}}},
            "message": "  Unexpected token\n\n  8 | foo(\n",
        });
        let options = FormatOptions::default().with_project_root("/work/app");
        let line = format_record(Level::Error, &record, &options).unwrap();
        assert_eq!(line, "!>error: src/main.js:10,4: Unexpected token");
    }

    #[test]
    fn test_no_project_root_leaves_file_empty() {
        let record = json!({
            "module": {"resource": "/work/app/src/main.js"},
            "message": "oops",
        });
        let line = format_record(Level::Warning, &record, &FormatOptions::default()).unwrap();
        assert_eq!(line, "!>warning: :0,0: oops");
    }

    #[test]
    fn test_empty_message_uses_placeholder() {
        let line = format_record(Level::Error, &json!({}), &FormatOptions::default()).unwrap();
        assert_eq!(line, format!("!>error: :0,0: {}", DEFAULT_EMPTY_MESSAGE));

        let options = FormatOptions::default().with_empty_message("see webpack");
        let line = format_record(Level::Error, &json!({"message": "  \n"}), &options).unwrap();
        assert_eq!(line, "!>error: :0,0: see webpack");
    }

    #[test]
    fn test_precise_location_skips_heuristics() {
        let dir = tempdir().unwrap();
        let record = json!({
            "name": "ModuleNotFoundError",
            "module": {"resource": dir.path().join("gone.js").to_str().unwrap()},
            "error": {"error": {"loc": {"line": 10, "column": 4}}},
            "message": "Module not found: Error: Can't resolve 'foo' in '/x'",
        });
        let line = format_record(Level::Error, &record, &FormatOptions::default()).unwrap();
        assert_eq!(
            line,
            "!>error: :10,4: Module not found: Error: Can't resolve 'foo' in '/x'"
        );
    }

    #[test]
    fn test_module_not_found_is_located() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("index.js");
        fs::write(&src, "import a from './a'\nimport b from 'foo/bar'\n").unwrap();
        let record = json!({
            "name": "ModuleNotFoundError",
            "module": {"resource": src.to_str().unwrap()},
            "message": "Module not found: Error: Can't resolve 'foo/bar' in '/x'\nmore",
        });
        let options = FormatOptions::default().with_project_root(dir.path());
        let line = format_record(Level::Error, &record, &options).unwrap();
        assert_eq!(
            line,
            "!>error: index.js:2,16~23: Module not found: Error: Can't resolve 'foo/bar' in '/x'"
        );
    }

    #[test]
    fn test_unreadable_source_is_an_error() {
        let dir = tempdir().unwrap();
        let record = json!({
            "name": "ModuleNotFoundError",
            "module": {"resource": dir.path().join("gone.js").to_str().unwrap()},
            "message": "Can't resolve 'foo' in '/x'",
        });
        assert!(format_record(Level::Error, &record, &FormatOptions::default()).is_err());
    }

    #[test]
    fn test_heuristics_need_a_resource() {
        let record = json!({
            "name": "ModuleNotFoundError",
            "message": "Can't resolve 'foo' in '/x'",
        });
        let line = format_record(Level::Error, &record, &FormatOptions::default()).unwrap();
        assert_eq!(line, "!>error: :0,0: Can't resolve 'foo' in '/x'");
    }

    #[test]
    fn test_template_message_kept_without_resource() {
        let record = json!({
            "message": "Error compiling template:\n\n<p>a</p>\n<p>b</p>\n\n- Component template should contain exactly one root element.",
        });
        let line = format_record(Level::Error, &record, &FormatOptions::default()).unwrap();
        assert_eq!(
            line,
            "!>error: :0,0: Error compiling template:  <p>a</p> <p>b</p>  - Component template should contain exactly one root element."
        );
    }

    #[test]
    fn test_invalid_utf8_source_is_still_located() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("legacy.js");
        fs::write(&src, b"// caf\xe9\nrequire('left-pad')\n").unwrap();
        let record = json!({
            "name": "ModuleNotFoundError",
            "module": {"resource": src.to_str().unwrap()},
            "message": "Can't resolve 'left-pad' in '/x'",
        });
        let line = format_record(Level::Error, &record, &FormatOptions::default()).unwrap();
        assert_eq!(line, "!>error: :2,10~18: Can't resolve 'left-pad' in '/x'");
    }

    #[test]
    fn test_trailing_spaces_of_first_line_are_kept() {
        let record = json!({"message": "  foo   \nbar"});
        let line = format_record(Level::Error, &record, &FormatOptions::default()).unwrap();
        assert_eq!(line, "!>error: :0,0: foo   ");
    }

    #[test]
    fn test_failed_record_leaves_blank_line() {
        let dir = tempdir().unwrap();
        let bad = json!({
            "name": "ModuleNotFoundError",
            "module": {"resource": dir.path().join("gone.js").to_str().unwrap()},
            "message": "Can't resolve 'foo' in '/x'",
        });
        let good = json!({"message": "fine"});
        let records = vec![good.clone(), bad, good];
        let outcomes = format_records(Level::Error, &records, &FormatOptions::default());
        assert!(outcomes[0].is_ok());
        assert!(outcomes[1].is_err());
        assert!(outcomes[2].is_ok());
        assert_eq!(
            join_outcomes(Level::Error, outcomes),
            "!>error: :0,0: fine\n\n!>error: :0,0: fine"
        );
    }

    #[test]
    fn test_strict_anchor_miss() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.js");
        fs::write(&src, "const x = helper;\n").unwrap();
        let record = json!({
            "module": {"resource": src.to_str().unwrap()},
            "message": "export 'helper' was not found in './utils'",
        });

        let lenient = FormatOptions::default();
        let line = format_record(Level::Warning, &record, &lenient).unwrap();
        assert_eq!(
            line,
            "!>warning: :1,11~17: export 'helper' was not found in './utils'"
        );

        let strict = FormatOptions::default().with_anchor_miss(AnchorMiss::NotFound);
        let line = format_record(Level::Warning, &record, &strict).unwrap();
        assert_eq!(
            line,
            "!>warning: :0,0: export 'helper' was not found in './utils'"
        );
    }

    #[test]
    fn test_formatting_is_repeatable() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("index.js");
        fs::write(&src, "\nrequire('nope')\n").unwrap();
        let stats = json!({"compilation": {
            "errors": [{
                "name": "ModuleNotFoundError",
                "module": {"resource": src.to_str().unwrap()},
                "message": "Can't resolve 'nope' in '/x'",
            }],
            "warnings": [{"message": "careful"}],
        }});
        let first = format_stats(Some(&stats), Some(dir.path()));
        let second = format_stats(Some(&stats), Some(dir.path()));
        assert_eq!(first, second);
        assert_eq!(
            first,
            "\n!>error: index.js:2,10~14: Can't resolve 'nope' in '/x'\n!>warning: :0,0: careful"
        );
    }
}
