//! Filesystem loader.
//!
//! Expected layout:
//!
//! ```text
//! <root>/
//!   ci/pipeline-config.yaml          (optional)
//!   operators/
//!     <operator>/
//!       ci.yaml                      (optional)
//!       <bundle>/
//!         manifests/*.clusterserviceversion.yaml
//!         metadata/annotations.yaml
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{find_yaml, load_operator_config, load_repo_config, load_yaml};
use crate::error::{RepoError, Result};

use super::builder::{BundleSource, OperatorSource, RepoBuilder};
use super::manifest::{AnnotationsDocument, CsvDocument};
use super::Repo;

const OPERATORS_DIR: &str = "operators";
const MANIFESTS_DIR: &str = "manifests";
const METADATA_DIR: &str = "metadata";

/// Load the repository rooted at `path`.
///
/// # Errors
///
/// - `InvalidRepo` if `path` has no `operators/` directory
/// - `Load`/`Parse` if a bundle's documents are missing or malformed
/// - `DuplicateVersion` if an operator has two bundles with one version
pub fn load_repo(path: &Path) -> Result<Repo> {
    debug!("Loading repo at {}", path.display());
    let root = fs::canonicalize(path).map_err(|_| RepoError::InvalidRepo {
        path: path.to_path_buf(),
    })?;
    let operators_dir = root.join(OPERATORS_DIR);
    if !operators_dir.is_dir() {
        return Err(RepoError::InvalidRepo { path: root });
    }

    let mut builder = RepoBuilder::new(&root).with_config(load_repo_config(&root)?);
    for operator_path in sorted_dirs(&operators_dir)? {
        if !sorted_dirs(&operator_path)?.iter().any(|p| is_bundle_dir(p)) {
            debug!("Skipping {}: no bundles", operator_path.display());
            continue;
        }
        builder = builder.with_operator(load_operator(&operator_path)?);
    }

    let repo = builder.build()?;
    info!(
        "Loaded {} operator(s) from {}",
        repo.operators().len(),
        repo.root().display()
    );
    Ok(repo)
}

/// Whether `path` looks like a bundle: a directory with both `manifests/`
/// and `metadata/` subdirectories.
pub fn is_bundle_dir(path: &Path) -> bool {
    path.is_dir() && path.join(MANIFESTS_DIR).is_dir() && path.join(METADATA_DIR).is_dir()
}

fn load_operator(path: &Path) -> Result<OperatorSource> {
    debug!("Loading operator at {}", path.display());
    let name = dir_name(path);
    let mut source = OperatorSource::new(name, path).with_config(load_operator_config(path)?);
    for bundle_path in sorted_dirs(path)? {
        if is_bundle_dir(&bundle_path) {
            source = source.with_bundle(load_bundle(&bundle_path)?);
        }
    }
    Ok(source)
}

fn load_bundle(path: &Path) -> Result<BundleSource> {
    debug!("Loading bundle at {}", path.display());
    let csv_path = find_csv(&path.join(MANIFESTS_DIR))?.ok_or_else(|| {
        RepoError::load(path, "no *.clusterserviceversion.yaml file in manifests/")
    })?;
    let csv: CsvDocument = load_yaml(&csv_path)?;

    let annotations: AnnotationsDocument =
        match find_yaml(&path.join(METADATA_DIR).join("annotations.yaml")) {
            Some(p) => load_yaml(&p)?,
            None => AnnotationsDocument::default(),
        };

    Ok(BundleSource::new(dir_name(path), path, csv, annotations))
}

/// First CSV file in `manifests`, preferring `.yaml` over `.yml`.
fn find_csv(manifests: &Path) -> Result<Option<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(manifests)?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    for suffix in [".clusterserviceversion.yaml", ".clusterserviceversion.yml"] {
        if let Some(found) = files.iter().find(|p| dir_name(p).ends_with(suffix)) {
            return Ok(Some(found.clone()));
        }
    }
    Ok(None)
}

fn sorted_dirs(path: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(path)?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::testing::BundleFixture;
    use tempfile::TempDir;

    fn write_bundle(root: &Path, fixture: &BundleFixture, operator: &str, dir: &str) {
        let bundle = root.join("operators").join(operator).join(dir);
        fs::create_dir_all(bundle.join("manifests")).unwrap();
        fs::create_dir_all(bundle.join("metadata")).unwrap();
        fs::write(
            bundle
                .join("manifests")
                .join(format!("{}.clusterserviceversion.yaml", operator)),
            fixture.csv_yaml(),
        )
        .unwrap();
        fs::write(
            bundle.join("metadata").join("annotations.yaml"),
            fixture.annotations_yaml(),
        )
        .unwrap();
    }

    #[test]
    fn rejects_missing_root() {
        let err = load_repo(Path::new("/non_existent")).unwrap_err();
        assert!(matches!(err, RepoError::InvalidRepo { .. }));
    }

    #[test]
    fn rejects_root_without_operators_dir() {
        let temp = TempDir::new().unwrap();
        let err = load_repo(temp.path()).unwrap_err();
        assert!(err.to_string().contains("Not a valid operator repository"));
    }

    #[test]
    fn loads_empty_repo() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("operators")).unwrap();
        let repo = load_repo(temp.path()).unwrap();
        assert!(repo.operators().is_empty());
        assert_eq!(repo.root(), fs::canonicalize(temp.path()).unwrap());
    }

    #[test]
    fn loads_operators_and_skips_non_bundle_dirs() {
        let temp = TempDir::new().unwrap();
        write_bundle(temp.path(), &BundleFixture::new("hello", "0.0.1"), "hello", "0.0.1");
        write_bundle(temp.path(), &BundleFixture::new("hello", "0.0.2"), "hello", "0.0.2");
        write_bundle(temp.path(), &BundleFixture::new("world", "0.0.1"), "world", "0.0.1");
        fs::create_dir_all(temp.path().join("operators/empty/docs")).unwrap();
        fs::write(temp.path().join("operators/hello/ci.yaml"), "updateGraph: semver-mode").unwrap();

        let repo = load_repo(temp.path()).unwrap();
        let names: Vec<_> = repo.operators().iter().map(|o| o.name()).collect();
        assert_eq!(names, vec!["hello", "world"]);

        let hello = repo.operator("hello").unwrap();
        assert_eq!(hello.bundles().len(), 2);
        assert_eq!(hello.config().update_graph.as_deref(), Some("semver-mode"));
        assert!(hello.bundles()[0].root().ends_with("operators/hello/0.0.1"));
    }

    #[test]
    fn missing_csv_is_a_load_error() {
        let temp = TempDir::new().unwrap();
        let bundle = temp.path().join("operators/hello/0.0.1");
        fs::create_dir_all(bundle.join("manifests")).unwrap();
        fs::create_dir_all(bundle.join("metadata")).unwrap();

        let err = load_repo(temp.path()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Load);
        assert!(err.to_string().contains("clusterserviceversion"));
    }

    #[test]
    fn missing_annotations_is_a_load_error() {
        let temp = TempDir::new().unwrap();
        let fixture = BundleFixture::new("hello", "0.0.1");
        write_bundle(temp.path(), &fixture, "hello", "0.0.1");
        fs::remove_file(temp.path().join("operators/hello/0.0.1/metadata/annotations.yaml"))
            .unwrap();

        let err = load_repo(temp.path()).unwrap_err();
        assert!(err.to_string().contains("package name"));
    }

    #[test]
    fn malformed_csv_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        write_bundle(temp.path(), &BundleFixture::new("hello", "0.0.1"), "hello", "0.0.1");
        fs::write(
            temp.path()
                .join("operators/hello/0.0.1/manifests/hello.clusterserviceversion.yaml"),
            "metadata: [",
        )
        .unwrap();

        let err = load_repo(temp.path()).unwrap_err();
        assert!(matches!(err, RepoError::Parse { .. }));
    }

    #[test]
    fn accepts_yml_extension() {
        let temp = TempDir::new().unwrap();
        let fixture = BundleFixture::new("hello", "0.0.1");
        write_bundle(temp.path(), &fixture, "hello", "0.0.1");
        let manifests = temp.path().join("operators/hello/0.0.1/manifests");
        fs::rename(
            manifests.join("hello.clusterserviceversion.yaml"),
            manifests.join("hello.clusterserviceversion.yml"),
        )
        .unwrap();

        let repo = load_repo(temp.path()).unwrap();
        assert!(repo.operator("hello").unwrap().has("0.0.1"));
    }
}
