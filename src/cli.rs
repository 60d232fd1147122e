use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::upload::Mode;

/// Migrate exported issue rows from a CSV file into a Codebase project.
#[derive(Parser, Debug)]
#[command(name = "ticket-migrate", version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["dry_run", "apply"])))]
pub struct Args {
    /// Print each ticket payload instead of creating it.
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Create tickets in the destination project.
    #[arg(short = 'a', long)]
    pub apply: bool,

    /// CSV export with a header row.
    #[arg(value_parser = existing_file)]
    pub input: PathBuf,

    /// Destination project permalink.
    pub project: String,
}

impl Args {
    pub fn mode(&self) -> Mode {
        if self.apply {
            Mode::Apply
        } else {
            Mode::DryRun
        }
    }
}

fn existing_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("input file not found: {value}"))
    }
}
