//! Fixtures shared by unit tests.

use std::fs;
use std::path::Path;

use serde_json::{json, Map, Value};

use crate::checks::{CheckRule, Finding};
use crate::config::OperatorConfig;
use crate::repo::{BundleSource, OperatorSource, Repo, RepoBuilder, Selector};

/// Describes one bundle and renders its CSV and annotations documents.
#[derive(Debug, Clone)]
pub struct BundleFixture {
    operator: String,
    version: String,
    dir_name: String,
    package: Option<String>,
    csv_name: String,
    channels: String,
    default_channel: Option<String>,
    replaces: Option<String>,
    skips: Vec<String>,
    skip_range: Option<String>,
    container_image: Option<String>,
    deployment_images: Option<Vec<String>>,
}

impl BundleFixture {
    /// A bundle in channel `beta` (also the default), named `<op>.v<version>`.
    pub fn new(operator: &str, version: &str) -> Self {
        Self {
            operator: operator.to_string(),
            version: version.to_string(),
            dir_name: version.to_string(),
            package: Some(operator.to_string()),
            csv_name: format!("{}.v{}", operator, version),
            channels: "beta".to_string(),
            default_channel: Some("beta".to_string()),
            replaces: None,
            skips: Vec::new(),
            skip_range: None,
            container_image: None,
            deployment_images: None,
        }
    }

    pub fn dir_name(mut self, dir_name: &str) -> Self {
        self.dir_name = dir_name.to_string();
        self
    }

    pub fn package(mut self, package: Option<&str>) -> Self {
        self.package = package.map(String::from);
        self
    }

    pub fn csv_name(mut self, csv_name: &str) -> Self {
        self.csv_name = csv_name.to_string();
        self
    }

    pub fn channels(mut self, channels: &str) -> Self {
        self.channels = channels.to_string();
        self
    }

    pub fn default_channel(mut self, channel: &str) -> Self {
        self.default_channel = Some(channel.to_string());
        self
    }

    pub fn no_default_channel(mut self) -> Self {
        self.default_channel = None;
        self
    }

    pub fn replaces(mut self, csv_name: &str) -> Self {
        self.replaces = Some(csv_name.to_string());
        self
    }

    pub fn skips(mut self, csv_names: &[&str]) -> Self {
        self.skips = csv_names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn skip_range(mut self, range: &str) -> Self {
        self.skip_range = Some(range.to_string());
        self
    }

    pub fn container_image(mut self, image: &str) -> Self {
        self.container_image = Some(image.to_string());
        self
    }

    pub fn deployment_images(mut self, images: &[&str]) -> Self {
        self.deployment_images = Some(images.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn csv_yaml(&self) -> String {
        let mut annotations = Map::new();
        if let Some(range) = &self.skip_range {
            annotations.insert("olm.skipRange".into(), json!(range));
        }
        if let Some(image) = &self.container_image {
            annotations.insert("containerImage".into(), json!(image));
        }

        let mut spec = Map::new();
        spec.insert("version".into(), json!(self.version));
        if let Some(replaces) = &self.replaces {
            spec.insert("replaces".into(), json!(replaces));
        }
        if !self.skips.is_empty() {
            spec.insert("skips".into(), json!(self.skips));
        }
        if let Some(images) = &self.deployment_images {
            let containers: Vec<Value> = images.iter().map(|i| json!({ "image": i })).collect();
            spec.insert(
                "install".into(),
                json!({
                    "strategy": "deployment",
                    "spec": {
                        "deployments": [
                            { "spec": { "template": { "spec": { "containers": containers } } } }
                        ]
                    }
                }),
            );
        }

        let csv = json!({
            "metadata": { "name": self.csv_name, "annotations": annotations },
            "spec": spec,
        });
        serde_yaml::to_string(&csv).unwrap()
    }

    pub fn annotations_yaml(&self) -> String {
        let mut annotations = Map::new();
        if let Some(package) = &self.package {
            annotations.insert(
                "operators.operatorframework.io.bundle.package.v1".into(),
                json!(package),
            );
        }
        annotations.insert(
            "operators.operatorframework.io.bundle.channels.v1".into(),
            json!(self.channels),
        );
        if let Some(default) = &self.default_channel {
            annotations.insert(
                "operators.operatorframework.io.bundle.channel.default.v1".into(),
                json!(default),
            );
        }
        serde_yaml::to_string(&json!({ "annotations": annotations })).unwrap()
    }

    pub fn source(&self) -> BundleSource {
        BundleSource::from_yaml(
            self.dir_name.clone(),
            format!("/repo/operators/{}/{}", self.operator, self.dir_name),
            &self.csv_yaml(),
            &self.annotations_yaml(),
        )
        .unwrap()
    }
}

/// Write `bundles` under `root` in the on-disk repository layout.
pub fn write_repo(root: &Path, bundles: &[BundleFixture]) {
    fs::create_dir_all(root.join("operators")).unwrap();
    for fixture in bundles {
        let bundle = root
            .join("operators")
            .join(&fixture.operator)
            .join(&fixture.dir_name);
        fs::create_dir_all(bundle.join("manifests")).unwrap();
        fs::create_dir_all(bundle.join("metadata")).unwrap();
        fs::write(
            bundle
                .join("manifests")
                .join(format!("{}.clusterserviceversion.yaml", fixture.operator)),
            fixture.csv_yaml(),
        )
        .unwrap();
        fs::write(
            bundle.join("metadata").join("annotations.yaml"),
            fixture.annotations_yaml(),
        )
        .unwrap();
    }
}

/// Build a repository holding one operator made of `bundles`.
pub fn repo_with(operator: &str, bundles: &[BundleFixture]) -> Repo {
    repo_with_config(operator, OperatorConfig::default(), bundles)
}

/// Like [`repo_with`], with an operator `ci.yaml`.
pub fn repo_with_config(operator: &str, config: OperatorConfig, bundles: &[BundleFixture]) -> Repo {
    let source = bundles.iter().fold(
        OperatorSource::new(operator, format!("/repo/operators/{}", operator)).with_config(config),
        |source, b| source.with_bundle(b.source()),
    );
    RepoBuilder::new("/repo").with_operator(source).build().unwrap()
}

/// A linear chain of bundles, each replacing the previous one.
pub fn chain(operator: &str, versions: &[&str]) -> Vec<BundleFixture> {
    let mut previous: Option<String> = None;
    versions
        .iter()
        .map(|v| {
            let mut fixture = BundleFixture::new(operator, v);
            if let Some(prev) = previous.replace(format!("{}.v{}", operator, v)) {
                fixture = fixture.replaces(&prev);
            }
            fixture
        })
        .collect()
}

/// Run `rule` against the resource named by `target` and collect its
/// findings, panicking on a fault.
pub fn evaluate(rule: &dyn CheckRule, repo: &Repo, target: &str) -> Vec<Finding> {
    let selector: Selector = target.parse().unwrap();
    let resources = selector.resolve(repo).unwrap();
    rule.evaluate(resources[0], repo)
        .map(|finding| finding.unwrap())
        .collect()
}
