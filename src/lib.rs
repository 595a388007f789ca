//! operator-repo - Load operator repositories and check their upgrade graphs.
//!
//! An operator repository holds one directory per operator, each with one
//! directory per bundle version. This crate loads that tree into a read-only
//! model, validates the upgrade graph of every channel and runs pluggable
//! checks that report problems as a lazy stream of results.
//!
//! # Modules
//!
//! - [`checks`] - Check rules, suites, the check engine and result output
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Repository and operator configuration files
//! - [`error`] - Error types and result aliases
//! - [`graph`] - Per-channel upgrade graph construction and validation
//! - [`repo`] - The repository model and its loader
//! - [`ui`] - Terminal output
//! - [`version`] - Bundle versions and skip ranges
//!
//! # Example
//!
//! ```
//! use operator_repo::version::{BundleVersion, SkipRange};
//!
//! let range: SkipRange = ">=0.9.0 <0.9.4".parse().unwrap();
//! assert!(range.contains(&BundleVersion::parse("0.9.2")));
//! assert!(!range.contains(&BundleVersion::parse("0.6.1")));
//! ```
//!
//! For loading repositories from disk, see the integration tests.

pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod repo;
pub mod ui;
pub mod version;

#[cfg(test)]
mod testing;

pub use error::{RepoError, Result};
