//! A single versioned release of an operator.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::version::{BundleVersion, RangeError, SkipRange};

use super::OperatorId;

/// Handle to a bundle inside a [`Repo`](super::Repo).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BundleId {
    pub(crate) operator: OperatorId,
    pub(crate) index: usize,
}

impl BundleId {
    /// The operator owning the bundle.
    pub fn operator(&self) -> OperatorId {
        self.operator
    }
}

/// An operator bundle.
///
/// Bundles are created by [`RepoBuilder`](super::RepoBuilder) and are
/// read-only afterwards. The parent operator is reachable through
/// [`Repo::operator_of`](super::Repo::operator_of).
#[derive(Debug, Clone)]
pub struct Bundle {
    pub(crate) id: BundleId,
    pub(crate) operator_name: String,
    pub(crate) dir_name: String,
    pub(crate) root: PathBuf,
    pub(crate) version: BundleVersion,
    pub(crate) csv_name: String,
    pub(crate) csv_operator_name: String,
    pub(crate) package_name: String,
    pub(crate) replaces: Option<String>,
    pub(crate) skips: Vec<String>,
    pub(crate) skip_range: Option<String>,
    pub(crate) channels: BTreeSet<String>,
    pub(crate) default_channel: Option<String>,
    pub(crate) container_image: Option<String>,
    pub(crate) deployment_images: Option<BTreeSet<String>>,
    pub(crate) description: Option<String>,
}

impl Bundle {
    pub fn id(&self) -> BundleId {
        self.id
    }

    /// Name of the operator directory the bundle lives in.
    pub fn operator_name(&self) -> &str {
        &self.operator_name
    }

    /// Name of the bundle directory.
    pub fn dir_name(&self) -> &str {
        &self.dir_name
    }

    /// Path to the bundle directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn version(&self) -> &BundleVersion {
        &self.version
    }

    /// The CSV's self-declared name, e.g. `etcdoperator.v0.9.4`.
    pub fn csv_name(&self) -> &str {
        &self.csv_name
    }

    /// The operator name encoded in the CSV name (`etcdoperator`).
    pub fn csv_operator_name(&self) -> &str {
        &self.csv_operator_name
    }

    /// The package name declared in `annotations.yaml`.
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// CSV name of the bundle this one replaces.
    pub fn replaces(&self) -> Option<&str> {
        self.replaces.as_deref()
    }

    /// CSV names this bundle may skip.
    pub fn skips(&self) -> &[String] {
        &self.skips
    }

    /// The raw `olm.skipRange` annotation.
    pub fn skip_range_raw(&self) -> Option<&str> {
        self.skip_range.as_deref()
    }

    /// The parsed `olm.skipRange` annotation, if any.
    pub fn skip_range(&self) -> Option<Result<SkipRange, RangeError>> {
        self.skip_range.as_deref().map(str::parse)
    }

    pub fn channels(&self) -> &BTreeSet<String> {
        &self.channels
    }

    pub fn in_channel(&self, channel: &str) -> bool {
        self.channels.contains(channel)
    }

    /// Default channel declared by this bundle.
    pub fn default_channel(&self) -> Option<&str> {
        self.default_channel.as_deref()
    }

    /// The `containerImage` annotation of the CSV.
    pub fn container_image(&self) -> Option<&str> {
        self.container_image.as_deref()
    }

    /// Images used by the CSV's deployments; `None` if it declares none.
    pub fn deployment_images(&self) -> Option<&BTreeSet<String>> {
        self.deployment_images.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Order by version, then by directory name.
    pub fn cmp_version(&self, other: &Bundle) -> Ordering {
        self.version
            .cmp(&other.version)
            .then_with(|| self.dir_name.cmp(&other.dir_name))
    }
}

impl fmt::Display for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bundle({}/{})", self.operator_name, self.dir_name)
    }
}
