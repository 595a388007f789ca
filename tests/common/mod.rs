//! On-disk repository fixtures shared by the integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// One bundle to write into a fixture repository.
pub struct Bundle<'a> {
    pub operator: &'a str,
    pub version: &'a str,
    pub channels: &'a str,
    pub replaces: Option<&'a str>,
    pub image: Option<&'a str>,
}

impl<'a> Bundle<'a> {
    pub fn new(operator: &'a str, version: &'a str) -> Self {
        Self {
            operator,
            version,
            channels: "beta",
            replaces: None,
            image: None,
        }
    }

    pub fn channels(mut self, channels: &'a str) -> Self {
        self.channels = channels;
        self
    }

    pub fn replaces(mut self, replaces: &'a str) -> Self {
        self.replaces = Some(replaces);
        self
    }

    pub fn image(mut self, image: &'a str) -> Self {
        self.image = Some(image);
        self
    }

    fn csv(&self) -> String {
        let mut csv = format!(
            "apiVersion: operators.coreos.com/v1alpha1\nkind: ClusterServiceVersion\nmetadata:\n  name: {op}.v{v}\n",
            op = self.operator,
            v = self.version
        );
        if let Some(image) = self.image {
            csv.push_str(&format!("  annotations:\n    containerImage: {}\n", image));
        }
        csv.push_str(&format!("spec:\n  version: {}\n", self.version));
        if let Some(replaces) = self.replaces {
            csv.push_str(&format!("  replaces: {}\n", replaces));
        }
        if let Some(image) = self.image {
            csv.push_str(&format!(
                "  install:\n    strategy: deployment\n    spec:\n      deployments:\n        - name: {op}\n          spec:\n            template:\n              spec:\n                containers:\n                  - name: operator\n                    image: {image}\n",
                op = self.operator,
                image = image
            ));
        }
        csv
    }

    fn annotations(&self) -> String {
        let default = self.channels.split(',').next().unwrap_or("beta");
        format!(
            "annotations:\n  operators.operatorframework.io.bundle.package.v1: {}\n  operators.operatorframework.io.bundle.channels.v1: {}\n  operators.operatorframework.io.bundle.channel.default.v1: {}\n",
            self.operator, self.channels, default
        )
    }

    pub fn write(&self, root: &Path) {
        let dir = root.join("operators").join(self.operator).join(self.version);
        fs::create_dir_all(dir.join("manifests")).unwrap();
        fs::create_dir_all(dir.join("metadata")).unwrap();
        fs::write(
            dir.join("manifests")
                .join(format!("{}.clusterserviceversion.yaml", self.operator)),
            self.csv(),
        )
        .unwrap();
        fs::write(dir.join("metadata").join("annotations.yaml"), self.annotations()).unwrap();
    }
}

/// A repository holding `bundles`.
pub fn setup_repo(bundles: &[Bundle]) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("operators")).unwrap();
    for bundle in bundles {
        bundle.write(temp.path());
    }
    temp
}

/// The etcd operator: four bundles in one linear chain.
pub fn etcd_repo() -> TempDir {
    let image = "quay.io/coreos/etcd-operator@sha256:abc";
    let channel = "singlenamespace-alpha";
    setup_repo(&[
        Bundle::new("etcd", "0.6.1").channels(channel).image(image),
        Bundle::new("etcd", "0.9.0")
            .channels(channel)
            .replaces("etcd.v0.6.1")
            .image(image),
        Bundle::new("etcd", "0.9.2")
            .channels(channel)
            .replaces("etcd.v0.9.0")
            .image(image),
        Bundle::new("etcd", "0.9.4")
            .channels(channel)
            .replaces("etcd.v0.9.2")
            .image(image),
    ])
}
