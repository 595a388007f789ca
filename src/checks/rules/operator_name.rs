//! Operator name consistency check.
//!
//! The operator name appears in three places: the package annotation, the
//! prefix of the CSV name, and the operator directory. A bundle is compared
//! both with itself and with its sibling bundles. When the siblings disagree
//! among themselves there is no reference name, so mismatches are only
//! warnings.

use std::collections::BTreeSet;

use crate::checks::rule::{findings, unsupported, CheckRule, Finding, Findings};
use crate::repo::{Bundle, Repo, Resource, ResourceKind};

/// Checks that the operator names of a bundle are consistent.
pub struct OperatorNameRule;

impl CheckRule for OperatorNameRule {
    fn name(&self) -> &str {
        "operator_name"
    }

    fn description(&self) -> &str {
        "Check if the operator names used in CSV, metadata and filesystem are consistent"
    }

    fn applies_to(&self) -> ResourceKind {
        ResourceKind::Bundle
    }

    fn evaluate<'a>(&'a self, target: Resource<'a>, repo: &'a Repo) -> Findings<'a> {
        let Resource::Bundle(bundle) = target else {
            return unsupported(self, target);
        };
        findings(check_bundle(bundle, repo))
    }
}

fn check_bundle(bundle: &Bundle, repo: &Repo) -> Vec<Finding> {
    let mut found = Vec::new();
    let siblings = repo.operator_of(bundle).bundles();
    let others: Vec<&Bundle> = siblings.iter().filter(|b| b.id() != bundle.id()).collect();

    let all_package = names(siblings, Bundle::package_name);
    let all_csv = names(siblings, Bundle::csv_operator_name);
    let other_package = names(others.iter().copied(), Bundle::package_name);
    let other_csv = names(others.iter().copied(), Bundle::csv_operator_name);

    let consistent_package = other_package.len() < 2;
    let consistent_csv = other_csv.len() < 2;

    if !others.is_empty() {
        found.extend(consistency(
            bundle.package_name(),
            &all_package,
            &other_package,
            "from annotations.yaml",
        ));
        found.extend(consistency(
            bundle.csv_operator_name(),
            &all_csv,
            &other_csv,
            "from the CSV",
        ));
    }

    if bundle.package_name() != bundle.csv_operator_name() {
        let message = format!(
            "Operator name from annotations.yaml ({}) does not match the name defined in the CSV ({})",
            bundle.package_name(),
            bundle.csv_operator_name()
        );
        found.push(if consistent_package && consistent_csv {
            Finding::fail(message)
        } else {
            Finding::warn(message)
        });
    }

    if bundle.package_name() != bundle.operator_name() {
        let message = format!(
            "Operator name from annotations.yaml ({}) does not match the operator's directory name ({})",
            bundle.package_name(),
            bundle.operator_name()
        );
        found.push(if consistent_package {
            Finding::fail(message)
        } else {
            Finding::warn(message)
        });
    }

    found
}

fn names<'b>(
    bundles: impl IntoIterator<Item = &'b Bundle>,
    field: fn(&Bundle) -> &str,
) -> BTreeSet<String> {
    bundles.into_iter().map(|b| field(b).to_string()).collect()
}

fn consistency(
    name: &str,
    all_names: &BTreeSet<String>,
    other_names: &BTreeSet<String>,
    source: &str,
) -> Option<Finding> {
    if other_names.len() == 1 {
        let common = other_names.iter().next()?;
        (common != name).then(|| {
            Finding::fail(format!(
                "Operator name {} ({}) does not match the name defined in other bundles ({})",
                source, name, common
            ))
        })
    } else {
        Some(Finding::warn(format!(
            "Operator name {} is not consistent across bundles: {:?}",
            source, all_names
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::ResultKind;
    use crate::testing::{evaluate, repo_with, BundleFixture};

    fn messages(findings: &[Finding]) -> Vec<(ResultKind, &str)> {
        findings
            .iter()
            .map(|f| (f.kind, f.message.as_str()))
            .collect()
    }

    #[test]
    fn consistent_names_pass() {
        let repo = repo_with(
            "hello",
            &[
                BundleFixture::new("hello", "0.0.1"),
                BundleFixture::new("hello", "0.0.2"),
            ],
        );
        assert!(evaluate(&OperatorNameRule, &repo, "hello/0.0.1").is_empty());
        assert!(evaluate(&OperatorNameRule, &repo, "hello/0.0.2").is_empty());
    }

    #[test]
    fn package_name_differs_from_directory() {
        let repo = repo_with(
            "hello",
            &[BundleFixture::new("hello", "0.0.1")
                .package(Some("foo"))
                .csv_name("foo.v0.0.1")],
        );
        let findings = evaluate(&OperatorNameRule, &repo, "hello/0.0.1");
        assert_eq!(
            messages(&findings),
            vec![(
                ResultKind::Fail,
                "Operator name from annotations.yaml (foo) does not match the operator's directory name (hello)"
            )]
        );
    }

    #[test]
    fn package_name_differs_from_csv() {
        let repo = repo_with(
            "hello",
            &[BundleFixture::new("hello", "0.0.1").package(Some("foo"))],
        );
        let findings = evaluate(&OperatorNameRule, &repo, "hello/0.0.1");
        assert_eq!(
            messages(&findings),
            vec![
                (
                    ResultKind::Fail,
                    "Operator name from annotations.yaml (foo) does not match the name defined in the CSV (hello)"
                ),
                (
                    ResultKind::Fail,
                    "Operator name from annotations.yaml (foo) does not match the operator's directory name (hello)"
                ),
            ]
        );
    }

    #[test]
    fn bundle_disagrees_with_siblings() {
        let repo = repo_with(
            "hello",
            &[
                BundleFixture::new("hello", "0.0.1"),
                BundleFixture::new("hello", "0.0.2")
                    .package(Some("foo"))
                    .csv_name("foo.v0.0.2"),
            ],
        );
        let findings = evaluate(&OperatorNameRule, &repo, "hello/0.0.2");
        assert_eq!(
            messages(&findings),
            vec![
                (
                    ResultKind::Fail,
                    "Operator name from annotations.yaml (foo) does not match the name defined in other bundles (hello)"
                ),
                (
                    ResultKind::Fail,
                    "Operator name from the CSV (foo) does not match the name defined in other bundles (hello)"
                ),
                (
                    ResultKind::Fail,
                    "Operator name from annotations.yaml (foo) does not match the operator's directory name (hello)"
                ),
            ]
        );
    }

    #[test]
    fn inconsistent_siblings_only_warn() {
        let repo = repo_with(
            "hello",
            &[
                BundleFixture::new("hello", "0.0.1"),
                BundleFixture::new("hello", "0.0.2").package(Some("foo")),
                BundleFixture::new("hello", "0.0.3").package(Some("bar")),
            ],
        );
        let findings = evaluate(&OperatorNameRule, &repo, "hello/0.0.3");
        assert_eq!(
            messages(&findings),
            vec![
                (
                    ResultKind::Warn,
                    "Operator name from annotations.yaml is not consistent across bundles: {\"bar\", \"foo\", \"hello\"}"
                ),
                (
                    ResultKind::Warn,
                    "Operator name from annotations.yaml (bar) does not match the name defined in the CSV (hello)"
                ),
                (
                    ResultKind::Warn,
                    "Operator name from annotations.yaml (bar) does not match the operator's directory name (hello)"
                ),
            ]
        );
    }
}
