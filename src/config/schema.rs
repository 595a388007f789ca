//! Configuration schema definitions.
//!
//! This module contains the struct definitions that map to the optional
//! configuration files of an operator repository:
//! - `ci/pipeline-config.yaml` at the repository root ([`RepoConfig`])
//! - `ci.yaml` in each operator directory ([`OperatorConfig`])

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Root configuration of a repository (`ci/pipeline-config.yaml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    /// Settings for the static checks
    pub checks: CheckSettings,

    /// Everything else in the file, kept as-is
    #[serde(flatten)]
    pub extra: serde_yaml::Mapping,
}

/// Settings that tune the builtin checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckSettings {
    /// How to report skip entries naming a bundle the operator does not have
    pub dangling_skips: SkipPolicy,
}

/// How a skip entry naming a CSV absent from the whole operator is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipPolicy {
    /// Not reported.
    #[default]
    Ignore,
    /// Reported as a warning.
    Warn,
    /// Reported as a failure.
    Fail,
}

impl FromStr for SkipPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "warn" => Ok(Self::Warn),
            "fail" => Ok(Self::Fail),
            _ => Err(format!("unknown skip policy: {}", s)),
        }
    }
}

impl fmt::Display for SkipPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ignore => write!(f, "ignore"),
            Self::Warn => write!(f, "warn"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

/// Per-operator configuration (`ci.yaml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorConfig {
    /// Update graph strategy, e.g. `replaces-mode` or `semver-mode`
    #[serde(rename = "updateGraph", skip_serializing_if = "Option::is_none")]
    pub update_graph: Option<String>,

    /// Everything else in the file, kept as-is
    #[serde(flatten)]
    pub extra: serde_yaml::Mapping,
}

/// How the upgrade graph of an operator is derived from its bundles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpdateGraphMode {
    /// Edges come from `replaces`, `skips` and `olm.skipRange`.
    #[default]
    Replaces,
    /// Each bundle replaces the previous one in version order.
    Semver,
}

impl OperatorConfig {
    /// Resolve the update graph strategy.
    ///
    /// Returns the raw value as the error when it names no known strategy.
    pub fn update_graph_mode(&self) -> Result<UpdateGraphMode, String> {
        match self.update_graph.as_deref() {
            None | Some("replaces-mode") => Ok(UpdateGraphMode::Replaces),
            Some("semver-mode") => Ok(UpdateGraphMode::Semver),
            Some(other) => Err(other.to_string()),
        }
    }
}
