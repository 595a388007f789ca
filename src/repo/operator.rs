//! An operator: a named collection of bundles.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::OperatorConfig;

use super::bundle::Bundle;

/// Handle to an operator inside a [`Repo`](super::Repo).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperatorId(pub(crate) usize);

/// An operator and its bundles.
#[derive(Debug, Clone)]
pub struct Operator {
    pub(crate) id: OperatorId,
    pub(crate) name: String,
    pub(crate) root: PathBuf,
    pub(crate) config: OperatorConfig,
    /// Sorted by version ascending.
    pub(crate) bundles: Vec<Bundle>,
    pub(crate) channels: BTreeSet<String>,
    pub(crate) default_channel: Option<String>,
}

impl Operator {
    pub fn id(&self) -> OperatorId {
        self.id
    }

    /// Name of the operator directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Contents of the operator's `ci.yaml`.
    pub fn config(&self) -> &OperatorConfig {
        &self.config
    }

    /// All bundles, sorted by version ascending.
    pub fn bundles(&self) -> &[Bundle] {
        &self.bundles
    }

    /// Find a bundle by directory name, falling back to its version string.
    pub fn bundle(&self, version: &str) -> Option<&Bundle> {
        self.bundles
            .iter()
            .find(|b| b.dir_name() == version)
            .or_else(|| self.bundles.iter().find(|b| b.version().to_string() == version))
    }

    /// Whether the operator has a bundle for the given version.
    pub fn has(&self, version: &str) -> bool {
        self.bundle(version).is_some()
    }

    /// Find a bundle by its CSV name.
    pub fn bundle_by_csv_name(&self, csv_name: &str) -> Option<&Bundle> {
        self.bundles.iter().find(|b| b.csv_name() == csv_name)
    }

    /// The bundle with the highest version.
    pub fn latest_bundle(&self) -> Option<&Bundle> {
        self.bundles.last()
    }

    /// All channels declared by the operator's bundles.
    pub fn channels(&self) -> &BTreeSet<String> {
        &self.channels
    }

    /// The default channel, as declared by the highest version bundle that
    /// declares one.
    pub fn default_channel(&self) -> Option<&str> {
        self.default_channel.as_deref()
    }

    /// Bundles belonging to `channel`, sorted by version ascending.
    pub fn channel_bundles(&self, channel: &str) -> Vec<&Bundle> {
        self.bundles.iter().filter(|b| b.in_channel(channel)).collect()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Operator({})", self.name)
    }
}
