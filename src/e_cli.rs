use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::e_types::{AnchorMiss, FormatOptions, DEFAULT_EMPTY_MESSAGE};

#[derive(Parser, Debug)]
#[command(author, version, about = "webpack-e is for Errors. Prints bundler diagnostics as editor problem-matcher lines.", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Print version and feature flags in JSON format.
    #[arg(
        long,
        short = 'v',
        help = "Print version and feature flags in JSON format."
    )]
    pub version: bool,

    #[arg(
        help = "Stats JSON file holding `compilation.errors` and `compilation.warnings`. Reads stdin when omitted or `-`."
    )]
    pub stats: Option<PathBuf>,

    #[arg(
        long = "project-root",
        short = 'r',
        help = "Print file paths relative to this directory. Without it the file field is left empty."
    )]
    pub project_root: Option<PathBuf>,

    #[arg(
        long = "strict-anchors",
        default_value_t = false,
        help = "Report an unknown location when a search anchor is missing instead of searching from the start of the file."
    )]
    pub strict_anchors: bool,

    #[arg(
        long,
        default_value = DEFAULT_EMPTY_MESSAGE,
        help = "Text printed in place of an empty diagnostic message."
    )]
    pub placeholder: String,

    #[arg(
        long = "errors-only",
        short = 'e',
        default_value_t = false,
        help = "Leave the warning block empty."
    )]
    pub errors_only: bool,
}

impl Cli {
    pub fn format_options(&self) -> FormatOptions {
        let anchor_miss = if self.strict_anchors {
            AnchorMiss::NotFound
        } else {
            AnchorMiss::SearchFromStart
        };
        FormatOptions {
            project_root: self.project_root.clone(),
            anchor_miss,
            empty_message: self.placeholder.clone(),
        }
    }

    /// Loads the stats JSON named on the command line, or stdin.
    pub fn load_stats(&self) -> Result<Value> {
        match self.stats.as_deref() {
            Some(path) if path != Path::new("-") => load_stats_file(path),
            _ => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read stats from stdin")?;
                serde_json::from_str(&buf).context("Stats on stdin are not valid JSON")
            }
        }
    }
}

pub fn load_stats_file(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read stats file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Stats file {} is not valid JSON", path.display()))
}

/// Drops `compilation.warnings` so only errors get formatted.
pub fn strip_warnings(stats: &mut Value) {
    if let Some(Value::Object(compilation)) = stats.get_mut("compilation") {
        compilation.insert("warnings".to_string(), Value::Array(Vec::new()));
    }
}

/// Print the version and the JSON array of feature flags.
pub fn print_version_and_features() {
    let version = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown");
    println!("webpack-e {}", version);
    println!(
        "[{}]",
        get_feature_flags()
            .iter()
            .map(|f| format!("\"{}\"", f))
            .collect::<Vec<String>>()
            .join(", ")
    );
}

/// Returns a vector of feature flag strings.
/// Enabled features are listed as-is while disabled ones are prefixed with "!".
pub fn get_feature_flags() -> Vec<&'static str> {
    let mut flags = Vec::new();
    if cfg!(feature = "cli") {
        flags.push("cli");
    } else {
        flags.push("!cli");
    }
    flags
}
