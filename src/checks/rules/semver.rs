//! Semantic version check.

use crate::checks::rule::{findings, unsupported, CheckRule, Finding, Findings};
use crate::repo::{Repo, Resource, ResourceKind};
use crate::version::BundleVersion;

/// Checks that the bundle version is semver compliant.
pub struct SemverRule;

impl CheckRule for SemverRule {
    fn name(&self) -> &str {
        "semver"
    }

    fn description(&self) -> &str {
        "Check that the bundle version is semver compliant"
    }

    fn applies_to(&self) -> ResourceKind {
        ResourceKind::Bundle
    }

    fn evaluate<'a>(&'a self, target: Resource<'a>, _repo: &'a Repo) -> Findings<'a> {
        let Resource::Bundle(bundle) = target else {
            return unsupported(self, target);
        };

        let mut found = Vec::new();
        let version = bundle.version();
        if !version.is_valid() {
            found.push(Finding::fail(format!(
                "Version from CSV ({}) is not valid semver",
                version
            )));
        }

        // The directory name only matters when it says something else.
        let dir_name = bundle.dir_name();
        if dir_name != version.to_string() && !BundleVersion::parse(dir_name).is_valid() {
            found.push(Finding::warn(format!(
                "Version from filesystem ({}) is not valid semver",
                dir_name
            )));
        }

        findings(found)
    }
}
