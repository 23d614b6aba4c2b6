// src/e_heuristics.rs

//! Best-effort location recovery for diagnostics that arrive without a line number.
//!
//! Each [`Heuristic`] recognises one kind of bundler message, pulls the text
//! worth searching for out of it and says where in the source file the search
//! should begin. The formatter tries them in [`Heuristic::ALL`] order and the
//! first one that recognises the message wins.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::e_data_get::data_get_opt;
use crate::e_types::Anchor;

pub const MODULE_NOT_FOUND_ERROR: &str = "ModuleNotFoundError";
pub const MISSING_LOOP_KEY_WARNING: &str =
    "component lists rendered with v-for should have explicit keys";

static MODULE_NOT_FOUND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"Can't resolve ['"](\S+?)['"]"#).unwrap());
static LOOP_TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<([A-Za-z][\w-]*)[^>]*?\s(v-for=(?:"[^"]*"|'[^']*'))"#).unwrap()
});
static MISSING_EXPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"export ['"]([^'"]+)['"](?: \(imported as ['"][^'"]+['"]\))? was not found"#)
        .unwrap()
});
static TEMPLATE_COMPILE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)Error compiling template:\s*(.*?)\s*- Component template").unwrap()
});
static LINE_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n").unwrap());

/// The kinds of message we know how to trace back to a source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// `Can't resolve 'x'` on a `ModuleNotFoundError`.
    ModuleNotFound,
    /// Vue `v-for` without `:key`.
    MissingLoopKey,
    /// `export 'x' was not found`.
    MissingExport,
    /// Vue `Error compiling template: ... - Component template ...`.
    TemplateCompile,
}

/// What to search for, where to start, and an optional replacement message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    pub needle: String,
    pub anchor: Anchor,
    pub message: Option<String>,
}

impl Probe {
    fn new(needle: impl Into<String>, anchor: Anchor) -> Self {
        Probe {
            needle: needle.into(),
            anchor,
            message: None,
        }
    }
}

impl Heuristic {
    pub const ALL: [Heuristic; 4] = [
        Heuristic::ModuleNotFound,
        Heuristic::MissingLoopKey,
        Heuristic::MissingExport,
        Heuristic::TemplateCompile,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::ModuleNotFound => "module-not-found",
            Heuristic::MissingLoopKey => "missing-loop-key",
            Heuristic::MissingExport => "missing-export",
            Heuristic::TemplateCompile => "template-compile",
        }
    }

    /// Returns a probe when this heuristic recognises the record's raw (untrimmed) message.
    pub fn probe(&self, record: &Value) -> Option<Probe> {
        let message = data_get_opt(record, "message").and_then(Value::as_str)?;
        match self {
            Heuristic::ModuleNotFound => {
                let name = data_get_opt(record, "name").and_then(Value::as_str);
                if name != Some(MODULE_NOT_FOUND_ERROR) {
                    return None;
                }
                let caps = MODULE_NOT_FOUND_RE.captures(message)?;
                Some(Probe::new(&caps[1], Anchor::Start))
            }
            Heuristic::MissingLoopKey => {
                if !message.contains(MISSING_LOOP_KEY_WARNING) {
                    return None;
                }
                let caps = LOOP_TAG_RE.captures(message)?;
                Some(Probe::new(
                    &caps[2],
                    Anchor::Text(format!("<{}", &caps[1])),
                ))
            }
            Heuristic::MissingExport => {
                let caps = MISSING_EXPORT_RE.captures(message)?;
                Some(Probe::new(&caps[1], Anchor::Text("import".to_string())))
            }
            Heuristic::TemplateCompile => {
                let caps = TEMPLATE_COMPILE_RE.captures(message)?;
                Some(Probe {
                    needle: caps[1].trim().to_string(),
                    anchor: Anchor::Start,
                    message: Some(LINE_BREAK_RE.replace_all(message.trim(), " ").into_owned()),
                })
            }
        }
    }
}

/// Tries every heuristic in order and returns the first that recognises the record.
pub fn first_probe(record: &Value) -> Option<(Heuristic, Probe)> {
    Heuristic::ALL
        .iter()
        .find_map(|h| h.probe(record).map(|probe| (*h, probe)))
}
