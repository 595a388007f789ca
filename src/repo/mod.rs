//! The repository model: Repo → Operators → Bundles.
//!
//! The model is built once, either from disk with [`load_repo`] or from
//! parsed documents with [`RepoBuilder`], and is read-only afterwards.
//! Bundles refer to their operator through an [`OperatorId`] handle into the
//! repository's operator table rather than through a pointer.
//!
//! # Example
//!
//! ```
//! use operator_repo::repo::{BundleSource, OperatorSource, RepoBuilder};
//!
//! let csv = "metadata: {name: hello.v0.0.1}\nspec: {version: 0.0.1}\n";
//! let annotations = "annotations:\n  operators.operatorframework.io.bundle.package.v1: hello\n  operators.operatorframework.io.bundle.channels.v1: beta\n";
//! let bundle = BundleSource::from_yaml("0.0.1", "/repo/operators/hello/0.0.1", csv, annotations).unwrap();
//!
//! let repo = RepoBuilder::new("/repo")
//!     .with_operator(OperatorSource::new("hello", "/repo/operators/hello").with_bundle(bundle))
//!     .build()
//!     .unwrap();
//!
//! let operator = repo.operator("hello").unwrap();
//! assert_eq!(operator.bundles().len(), 1);
//! assert_eq!(repo.operator_of(&operator.bundles()[0]).name(), "hello");
//! ```

pub mod builder;
pub mod bundle;
pub mod loader;
pub mod manifest;
pub mod operator;
pub mod resource;
pub mod selector;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::RepoConfig;

pub use builder::{split_csv_name, BundleSource, OperatorSource, RepoBuilder};
pub use bundle::{Bundle, BundleId};
pub use loader::{is_bundle_dir, load_repo};
pub use operator::{Operator, OperatorId};
pub use resource::{Resource, ResourceKind, Subject};
pub use selector::Selector;

/// A repository containing a collection of operators.
#[derive(Debug, Clone)]
pub struct Repo {
    pub(crate) root: PathBuf,
    pub(crate) config: RepoConfig,
    /// Sorted by name; `OperatorId` indexes this table.
    pub(crate) operators: Vec<Operator>,
}

impl Repo {
    /// Path to the root of the repository.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Contents of `ci/pipeline-config.yaml`.
    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    /// All operators, sorted by name.
    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// Find an operator by name.
    pub fn operator(&self, name: &str) -> Option<&Operator> {
        self.operators
            .binary_search_by(|o| o.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.operators[i])
    }

    /// Whether the repository contains an operator with the given name.
    pub fn has(&self, name: &str) -> bool {
        self.operator(name).is_some()
    }

    /// Resolve an operator handle.
    pub fn get(&self, id: OperatorId) -> &Operator {
        &self.operators[id.0]
    }

    /// Resolve a bundle handle.
    pub fn bundle(&self, id: BundleId) -> &Bundle {
        &self.get(id.operator).bundles[id.index]
    }

    /// The operator a bundle belongs to.
    pub fn operator_of(&self, bundle: &Bundle) -> &Operator {
        self.get(bundle.id.operator)
    }

    /// Every bundle of every operator, operators by name, bundles by version.
    pub fn all_bundles(&self) -> impl Iterator<Item = &Bundle> {
        self.operators.iter().flat_map(|o| o.bundles.iter())
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Repo({})", self.root.display())
    }
}
