#![doc = include_str!("../README.md")]

// Re-export common std and log items for the binary
pub mod prelude {
    pub use std::path::{Path, PathBuf};
    pub use std::process::exit;
    pub use log::{debug, info, warn};
}

pub mod e_data_get;
pub use e_data_get::{data_get, data_get_opt};
pub mod e_types;
pub use e_types::*;
pub mod e_locate;
pub use e_locate::locate;
pub mod e_heuristics;
pub use e_heuristics::{Heuristic, Probe};
pub mod e_fmt;
pub mod e_formatter;
pub use e_formatter::{format_stats, format_stats_with};
#[cfg(feature = "cli")]
pub mod e_cli;
#[cfg(feature = "cli")]
pub use e_cli::Cli;
