//! Command-line interface for fleetops, built on clap.
//!
//! [`Cli`] carries the [`Command`] subcommands and the global `--data` and
//! `--verbose` flags.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// fleetops: field-service fleet operations dashboard.
#[derive(Debug, Parser)]
#[command(name = "fleetops", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// JSON or TOML file with technicians, jobs and metrics (default: built-in fleet).
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show metrics, fleet, job queue and top performers.
    Status,

    /// Assign one or more jobs, in the given order.
    Assign {
        /// Job ids.
        #[arg(required = true)]
        job_ids: Vec<String>,
    },

    /// Export the paginated fleet report.
    Export {
        /// Output path (default comes from fleetops.toml).
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Jobs to assign before exporting.
        #[arg(long = "assign", value_name = "JOB_ID")]
        assign: Vec<String>,
    },

    /// Ask the AI model for a fleet analysis.
    Insight {
        /// Number of overlapping requests (the newest wins).
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
        refreshes: u16,
    },
}
