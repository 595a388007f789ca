//! YAML document loading.
//!
//! Every document of a repository may be spelled with either a `.yaml` or a
//! `.yml` extension; [`find_yaml`] resolves whichever exists.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::schema::{OperatorConfig, RepoConfig};
use crate::error::{RepoError, Result};

/// Look for a YAML file, trying the alternate extension if needed.
///
/// Returns `None` if neither spelling exists.
pub fn find_yaml(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    for ext in ["yaml", "yml"] {
        if path.extension().and_then(|e| e.to_str()) == Some(ext) {
            continue;
        }
        let candidate = path.with_extension(ext);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

/// Read and parse a YAML file into `T`.
///
/// An empty file parses as `T::default()`.
///
/// # Errors
///
/// Returns `Io` if the file can't be read and `Parse` if the YAML is invalid.
pub fn load_yaml<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    debug!("Loading {}", path.display());
    let content = fs::read_to_string(path)?;
    parse_yaml(path, &content)
}

/// Parse YAML content attributed to `path` for error messages.
pub fn parse_yaml<T>(path: &Path, content: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    serde_yaml::from_str(content).map_err(|e| RepoError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load `ci/pipeline-config.yaml` for the repository at `root`.
///
/// A missing file yields the default configuration.
pub fn load_repo_config(root: &Path) -> Result<RepoConfig> {
    match find_yaml(&root.join("ci").join("pipeline-config.yaml")) {
        Some(path) => load_yaml(&path),
        None => {
            debug!("No ci/pipeline-config.yaml found in {}", root.display());
            Ok(RepoConfig::default())
        }
    }
}

/// Load `ci.yaml` for the operator at `operator_root`.
///
/// A missing file yields the default configuration.
pub fn load_operator_config(operator_root: &Path) -> Result<OperatorConfig> {
    match find_yaml(&operator_root.join("ci.yaml")) {
        Some(path) => load_yaml(&path),
        None => {
            debug!("No ci.yaml found in {}", operator_root.display());
            Ok(OperatorConfig::default())
        }
    }
}
