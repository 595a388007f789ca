//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::checks::{OutputFormat, BUILTIN_SUITE};
use crate::config::SkipPolicy;

/// optool - Inspect and check operator repositories.
#[derive(Debug, Parser)]
#[command(name = "optool")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the repository root (overrides current directory)
    #[arg(short, long, global = true, env = "OPTOOL_REPO")]
    pub repo: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the repository, operators or bundles
    List(ListArgs),

    /// Run checks against operators and bundles
    Check(CheckArgs),
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Also show the bundles of each selected operator
    #[arg(short = 'R', long)]
    pub recursive: bool,

    /// Operators (`name`) or bundles (`name/version`); all operators if empty
    #[arg(value_name = "TARGET")]
    pub targets: Vec<String>,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    /// Check suite to run
    #[arg(short, long, default_value = BUILTIN_SUITE)]
    pub suite: String,

    /// List the checks of the suite and exit
    #[arg(short, long)]
    pub list: bool,

    /// Also check the bundles of each selected operator
    #[arg(short = 'R', long)]
    pub recursive: bool,

    /// Run only these checks (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Skip these checks (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Output format: human or json
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,

    /// Stop after the first failure
    #[arg(long)]
    pub fail_fast: bool,

    /// Report checks that found nothing
    #[arg(long)]
    pub show_passes: bool,

    /// How to report skips naming no bundle of the operator: ignore, warn or fail
    #[arg(long, value_name = "POLICY")]
    pub dangling_skips: Option<SkipPolicy>,

    /// Operators (`name`) or bundles (`name/version`); all operators if empty
    #[arg(value_name = "TARGET")]
    pub targets: Vec<String>,
}

impl Default for CheckArgs {
    fn default() -> Self {
        Self {
            suite: BUILTIN_SUITE.to_string(),
            list: false,
            recursive: false,
            only: Vec::new(),
            skip: Vec::new(),
            format: OutputFormat::Human,
            fail_fast: false,
            show_passes: false,
            dangling_skips: None,
            targets: Vec::new(),
        }
    }
}
