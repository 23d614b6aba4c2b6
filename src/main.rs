//! # webpack-e
//!
//! `webpack-e` reads a bundler stats dump and prints its errors and warnings
//! as one-line `!>level: file:line,col: message` records that editor problem
//! matchers can turn into clickable locations.
//!
//! ## Quick Start
//! ```sh
//! webpack-e stats.json --project-root .
//! node build.js --json | webpack-e - -r .
//! ```

use anyhow::Result;
use clap::Parser;
use webpack_e::e_cli::{print_version_and_features, strip_warnings};
use webpack_e::{format_stats_with, prelude::*, Cli};

pub fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if cli.version {
        print_version_and_features();
        exit(0);
    }
    debug!("CLI options: {:?}", cli);

    let mut stats = cli.load_stats()?;
    if cli.errors_only {
        strip_warnings(&mut stats);
    }

    let report = format_stats_with(Some(&stats), &cli.format_options());
    println!("{}", report);
    Ok(())
}
