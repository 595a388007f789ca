//! Shapes of the documents a bundle is made of.
//!
//! Only the fields the model needs are declared; everything else in the
//! manifests is ignored. Fields that are usually strings are read as
//! [`serde_yaml::Value`] so that unquoted numbers (`version: 1.0`) and
//! booleans are still accepted.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;
use serde_yaml::Value;

/// Annotation naming the package (operator) of a bundle.
pub const PACKAGE_ANNOTATION: &str = "operators.operatorframework.io.bundle.package.v1";
/// Annotation listing the channels of a bundle, comma separated.
pub const CHANNELS_ANNOTATION: &str = "operators.operatorframework.io.bundle.channels.v1";
/// Annotation naming the default channel.
pub const DEFAULT_CHANNEL_ANNOTATION: &str =
    "operators.operatorframework.io.bundle.channel.default.v1";
/// CSV annotation holding the skip range.
pub const SKIP_RANGE_ANNOTATION: &str = "olm.skipRange";
/// CSV annotation holding the operator's container image.
pub const CONTAINER_IMAGE_ANNOTATION: &str = "containerImage";
/// CSV annotation holding a human-readable description.
pub const DESCRIPTION_ANNOTATION: &str = "description";

/// `metadata/annotations.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnnotationsDocument {
    pub annotations: BTreeMap<String, Value>,
}

impl AnnotationsDocument {
    /// A trimmed, non-empty annotation value.
    pub fn get(&self, key: &str) -> Option<String> {
        self.annotations.get(key).and_then(scalar_string)
    }

    /// Package name declared by the bundle.
    pub fn package_name(&self) -> Option<String> {
        self.get(PACKAGE_ANNOTATION)
    }

    /// Channels declared by the bundle.
    pub fn channels(&self) -> BTreeSet<String> {
        self.get(CHANNELS_ANNOTATION)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Default channel declared by the bundle.
    pub fn default_channel(&self) -> Option<String> {
        self.get(DEFAULT_CHANNEL_ANNOTATION)
    }
}

/// The ClusterServiceVersion manifest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CsvDocument {
    pub metadata: CsvMetadata,
    pub spec: CsvSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CsvMetadata {
    pub name: Option<Value>,
    pub annotations: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CsvSpec {
    pub version: Option<Value>,
    pub replaces: Option<Value>,
    pub skips: Vec<Value>,
    pub install: InstallStrategy,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InstallStrategy {
    pub spec: InstallSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InstallSpec {
    pub deployments: Option<Vec<Deployment>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Deployment {
    pub name: Option<String>,
    pub spec: DeploymentSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DeploymentSpec {
    pub template: PodTemplate,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PodTemplate {
    pub spec: PodSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PodSpec {
    pub containers: Vec<Container>,
    #[serde(rename = "initContainers")]
    pub init_containers: Vec<Container>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Container {
    pub name: Option<String>,
    pub image: Option<String>,
}

impl CsvDocument {
    /// `.metadata.name`.
    pub fn name(&self) -> Option<String> {
        self.metadata.name.as_ref().and_then(scalar_string)
    }

    /// `.spec.version`.
    pub fn version(&self) -> Option<String> {
        self.spec.version.as_ref().and_then(scalar_string)
    }

    /// `.spec.replaces`.
    pub fn replaces(&self) -> Option<String> {
        self.spec.replaces.as_ref().and_then(scalar_string)
    }

    /// `.spec.skips`, skipping entries that are not scalars.
    pub fn skips(&self) -> Vec<String> {
        self.spec.skips.iter().filter_map(scalar_string).collect()
    }

    /// A trimmed, non-empty `.metadata.annotations` value.
    pub fn annotation(&self, key: &str) -> Option<String> {
        self.metadata.annotations.get(key).and_then(scalar_string)
    }

    /// Images referenced by the containers of every deployment.
    ///
    /// `None` when the CSV declares no deployments at all.
    pub fn deployment_images(&self) -> Option<BTreeSet<String>> {
        let deployments = self.spec.install.spec.deployments.as_ref()?;
        Some(
            deployments
                .iter()
                .flat_map(|d| {
                    let pod = &d.spec.template.spec;
                    pod.containers.iter().chain(pod.init_containers.iter())
                })
                .filter_map(|c| c.image.clone())
                .collect(),
        )
    }
}

/// Render a scalar YAML value as a trimmed string. Empty strings, `null`,
/// sequences and mappings yield `None`.
pub fn scalar_string(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Tagged(tagged) => return scalar_string(&tagged.value),
        _ => return None,
    };
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
