//! Error types for repository loading and command handling.
//!
//! This module defines [`RepoError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Load and model errors abort repository construction before any check runs
//! - Problems found by checks are never errors: they flow out as
//!   [`CheckResult`](crate::checks::CheckResult) values
//! - Use `anyhow::Error` (via `RepoError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for repository operations.
#[derive(Debug, Error)]
pub enum RepoError {
    /// The root directory does not look like an operator repository.
    #[error("Not a valid operator repository: {}", path.display())]
    InvalidRepo { path: PathBuf },

    /// A document is missing a required field or is structurally incomplete.
    #[error("Invalid bundle data at {}: {message}", path.display())]
    Load { path: PathBuf, message: String },

    /// A document could not be parsed as YAML.
    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// Two bundles of the same operator declare the same version.
    #[error("Operator '{operator}' has two bundles with version {version} ({first} and {second})")]
    DuplicateVersion {
        operator: String,
        version: String,
        first: String,
        second: String,
    },

    /// A selector names an operator the repository does not contain.
    #[error("Unknown operator: {name}")]
    UnknownOperator { name: String },

    /// A selector names a bundle the operator does not contain.
    #[error("Unknown bundle: {operator}/{version}")]
    UnknownBundle { operator: String, version: String },

    /// The requested check suite does not exist.
    #[error("Unknown check suite: {name}")]
    UnknownSuite { name: String },

    /// A check name given on the command line is not part of the suite.
    #[error("Unknown check: {name}")]
    UnknownCheck { name: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Broad classification of a [`RepoError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed or incomplete on-disk documents.
    Load,
    /// A cross-entity invariant of the model was violated.
    Model,
    /// Bad command-line input.
    Usage,
}

impl RepoError {
    /// Shorthand for a [`RepoError::Load`] error.
    pub fn load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Load {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Classify the error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidRepo { .. }
            | Self::Load { .. }
            | Self::Parse { .. }
            | Self::Io(_)
            | Self::Other(_) => ErrorCategory::Load,
            Self::DuplicateVersion { .. } => ErrorCategory::Model,
            Self::UnknownOperator { .. }
            | Self::UnknownBundle { .. }
            | Self::UnknownSuite { .. }
            | Self::UnknownCheck { .. } => ErrorCategory::Usage,
        }
    }
}

/// Result type alias for repository operations.
pub type Result<T> = std::result::Result<T, RepoError>;
