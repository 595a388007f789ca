//! Container image check.

use crate::checks::rule::{findings, unsupported, CheckRule, Finding, Findings};
use crate::repo::{Repo, Resource, ResourceKind};

/// Checks that `containerImage` is defined and used by a deployment.
pub struct ImageRule;

impl CheckRule for ImageRule {
    fn name(&self) -> &str {
        "image"
    }

    fn description(&self) -> &str {
        "Check if containerImage is properly defined and used in a deployment"
    }

    fn applies_to(&self) -> ResourceKind {
        ResourceKind::Bundle
    }

    fn evaluate<'a>(&'a self, target: Resource<'a>, _repo: &'a Repo) -> Findings<'a> {
        let Resource::Bundle(bundle) = target else {
            return unsupported(self, target);
        };

        let finding = match (bundle.container_image(), bundle.deployment_images()) {
            (None, _) => Some(Finding::fail(
                "CSV doesn't define .metadata.annotations.containerImage",
            )),
            (Some(_), None) => Some(Finding::fail(
                "CSV doesn't define .spec.install.spec.deployments",
            )),
            (Some(image), Some(used)) if !used.contains(image) => Some(Finding::fail(format!(
                "container image {} not used by any deployment",
                image
            ))),
            _ => None,
        };
        findings(finding.into_iter().collect())
    }
}
