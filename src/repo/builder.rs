//! In-memory construction of a [`Repo`].
//!
//! The builder receives already-parsed documents, validates them and
//! assembles the Repo/Operator/Bundle graph. It performs no I/O; the
//! filesystem loader in [`super::loader`] feeds it, and tests can feed it
//! YAML strings directly.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::config::{parse_yaml, OperatorConfig, RepoConfig};
use crate::error::{RepoError, Result};
use crate::version::BundleVersion;

use super::bundle::{Bundle, BundleId};
use super::manifest::{
    AnnotationsDocument, CsvDocument, CONTAINER_IMAGE_ANNOTATION, DESCRIPTION_ANNOTATION,
    PACKAGE_ANNOTATION, SKIP_RANGE_ANNOTATION,
};
use super::operator::{Operator, OperatorId};
use super::Repo;

/// `<operator>.<version>`, with an optional `v` before the version.
static CSV_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<name>[^.]+)\.v?(?P<version>.+)$").unwrap());

/// Split a CSV name into operator name and version.
///
/// Returns `None` if the name has no `.` separator.
pub fn split_csv_name(csv_name: &str) -> Option<(&str, &str)> {
    let caps = CSV_NAME_REGEX.captures(csv_name)?;
    Some((caps.name("name")?.as_str(), caps.name("version")?.as_str()))
}

/// Parsed documents of one bundle directory.
#[derive(Debug, Clone)]
pub struct BundleSource {
    pub dir_name: String,
    pub root: PathBuf,
    pub csv: CsvDocument,
    pub annotations: AnnotationsDocument,
}

impl BundleSource {
    pub fn new(
        dir_name: impl Into<String>,
        root: impl Into<PathBuf>,
        csv: CsvDocument,
        annotations: AnnotationsDocument,
    ) -> Self {
        Self {
            dir_name: dir_name.into(),
            root: root.into(),
            csv,
            annotations,
        }
    }

    /// Build a source from YAML text, as if read from `root`.
    pub fn from_yaml(
        dir_name: impl Into<String>,
        root: impl Into<PathBuf>,
        csv: &str,
        annotations: &str,
    ) -> Result<Self> {
        let root = root.into();
        let csv = parse_yaml(&root.join("manifests"), csv)?;
        let annotations = parse_yaml(&root.join("metadata").join("annotations.yaml"), annotations)?;
        Ok(Self::new(dir_name, root, csv, annotations))
    }
}

/// Parsed documents of one operator directory.
#[derive(Debug, Clone)]
pub struct OperatorSource {
    pub name: String,
    pub root: PathBuf,
    pub config: OperatorConfig,
    pub bundles: Vec<BundleSource>,
}

impl OperatorSource {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            config: OperatorConfig::default(),
            bundles: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: OperatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_bundle(mut self, bundle: BundleSource) -> Self {
        self.bundles.push(bundle);
        self
    }
}

/// Assembles a [`Repo`] from parsed sources.
#[derive(Debug, Clone)]
pub struct RepoBuilder {
    root: PathBuf,
    config: RepoConfig,
    operators: BTreeMap<String, OperatorSource>,
}

impl RepoBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config: RepoConfig::default(),
            operators: BTreeMap::new(),
        }
    }

    pub fn with_config(mut self, config: RepoConfig) -> Self {
        self.config = config;
        self
    }

    /// Add an operator. A later operator with the same name replaces an
    /// earlier one.
    pub fn with_operator(mut self, operator: OperatorSource) -> Self {
        self.operators.insert(operator.name.clone(), operator);
        self
    }

    /// Validate every source and build the repository.
    ///
    /// # Errors
    ///
    /// - `Load` if a document lacks a required field, or if the default
    ///   channel is not one of the operator's channels
    /// - `DuplicateVersion` if two bundles of an operator share a version
    pub fn build(self) -> Result<Repo> {
        let mut operators = Vec::with_capacity(self.operators.len());
        for (index, source) in self.operators.into_values().enumerate() {
            operators.push(build_operator(OperatorId(index), source)?);
        }
        Ok(Repo {
            root: self.root,
            config: self.config,
            operators,
        })
    }
}

fn build_operator(id: OperatorId, source: OperatorSource) -> Result<Operator> {
    debug!("Building operator {}", source.name);

    let mut bundles = source
        .bundles
        .into_iter()
        .map(|b| build_bundle(&source.name, b))
        .collect::<Result<Vec<_>>>()?;
    bundles.sort_by(|a, b| a.cmp_version(b));

    for pair in bundles.windows(2) {
        if pair[0].version == pair[1].version {
            return Err(RepoError::DuplicateVersion {
                operator: source.name.clone(),
                version: pair[0].version.to_string(),
                first: pair[0].dir_name.clone(),
                second: pair[1].dir_name.clone(),
            });
        }
    }

    for (index, bundle) in bundles.iter_mut().enumerate() {
        bundle.id = BundleId {
            operator: id,
            index,
        };
    }

    let channels: BTreeSet<String> = bundles
        .iter()
        .flat_map(|b| b.channels.iter().cloned())
        .collect();
    for bundle in &bundles {
        if let Some(default) = &bundle.default_channel {
            if !channels.contains(default) {
                return Err(RepoError::load(
                    &bundle.root,
                    format!(
                        "default channel '{}' is not among the declared channels ({})",
                        default,
                        channels.iter().cloned().collect::<Vec<_>>().join(", ")
                    ),
                ));
            }
        }
    }
    let default_channel = bundles
        .iter()
        .rev()
        .find_map(|b| b.default_channel.clone());

    Ok(Operator {
        id,
        name: source.name,
        root: source.root,
        config: source.config,
        bundles,
        channels,
        default_channel,
    })
}

fn build_bundle(operator_name: &str, source: BundleSource) -> Result<Bundle> {
    let root = source.root.as_path();
    let csv = &source.csv;
    let annotations = &source.annotations;

    let csv_name = csv
        .name()
        .ok_or_else(|| RepoError::load(root, "CSV does not define .metadata.name"))?;
    let (csv_operator_name, name_version) = split_csv_name(&csv_name).ok_or_else(|| {
        RepoError::load(root, format!("CSV has invalid .metadata.name '{}'", csv_name))
    })?;
    let csv_operator_name = csv_operator_name.to_string();
    let raw_version = csv.version().unwrap_or_else(|| name_version.to_string());

    let package_name = annotations.package_name().ok_or_else(|| {
        missing_annotation(root, &format!("the package name ({})", PACKAGE_ANNOTATION))
    })?;
    let channels = annotations.channels();
    if channels.is_empty() {
        return Err(missing_annotation(root, "any channel"));
    }

    Ok(Bundle {
        // Assigned once the operator's bundles are sorted.
        id: BundleId {
            operator: OperatorId(0),
            index: 0,
        },
        operator_name: operator_name.to_string(),
        dir_name: source.dir_name.clone(),
        root: source.root.clone(),
        version: BundleVersion::parse(&raw_version),
        csv_operator_name,
        replaces: csv.replaces(),
        skips: csv.skips(),
        skip_range: csv.annotation(SKIP_RANGE_ANNOTATION),
        container_image: csv.annotation(CONTAINER_IMAGE_ANNOTATION),
        description: csv.annotation(DESCRIPTION_ANNOTATION),
        deployment_images: csv.deployment_images(),
        csv_name,
        package_name,
        channels,
        default_channel: annotations.default_channel(),
    })
}

fn missing_annotation(root: &Path, what: &str) -> RepoError {
    RepoError::load(
        root.join("metadata").join("annotations.yaml"),
        format!("annotations do not define {}", what),
    )
}
