//! Upgrade graph check.
//!
//! Runs the channel graph validator over every channel of an operator.

use crate::checks::rule::{unsupported, CheckRule, Finding, Findings};
use crate::graph::{validate_operator, GraphOptions};
use crate::repo::{Repo, Resource, ResourceKind};

/// Validates the upgrade graph of every channel.
pub struct UpgradeRule {
    options: GraphOptions,
}

impl UpgradeRule {
    pub fn new(options: GraphOptions) -> Self {
        Self { options }
    }
}

impl CheckRule for UpgradeRule {
    fn name(&self) -> &str {
        "upgrade"
    }

    fn description(&self) -> &str {
        "Validate upgrade graphs for all channels"
    }

    fn applies_to(&self) -> ResourceKind {
        ResourceKind::Operator
    }

    fn evaluate<'a>(&'a self, target: Resource<'a>, _repo: &'a Repo) -> Findings<'a> {
        let Resource::Operator(operator) = target else {
            return unsupported(self, target);
        };
        Box::new(
            validate_operator(operator, self.options)
                .map(|error| Ok(Finding::new(error.severity(), error.to_string()))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::rule::CheckFault;
    use crate::checks::ResultKind;
    use crate::config::SkipPolicy;
    use crate::testing::{chain, evaluate, repo_with, BundleFixture};

    #[test]
    fn linear_chain_passes() {
        let repo = repo_with("hello", &chain("hello", &["0.0.1", "0.0.2", "0.0.3"]));
        let rule = UpgradeRule::new(GraphOptions::default());
        assert!(evaluate(&rule, &repo, "hello").is_empty());
    }

    #[test]
    fn reports_one_finding_per_violation() {
        let repo = repo_with(
            "hello",
            &[
                BundleFixture::new("hello", "0.0.1").channels("beta,stable"),
                BundleFixture::new("hello", "0.0.2").channels("beta,stable"),
            ],
        );
        let rule = UpgradeRule::new(GraphOptions::default());
        let findings = evaluate(&rule, &repo, "hello");

        assert_eq!(findings.len(), 4);
        assert!(findings.iter().all(|f| f.kind == ResultKind::Fail));
        assert_eq!(
            findings[0].message,
            "Channel beta has multiple heads: 0.0.1, 0.0.2"
        );
        assert_eq!(
            findings[1].message,
            "Channel beta has dangling bundle 0.0.1: not reachable from head 0.0.2"
        );
        assert!(findings[2].message.starts_with("Channel stable"));
        assert!(findings[3].message.starts_with("Channel stable"));
    }

    #[test]
    fn dangling_skip_follows_options() {
        let repo = repo_with(
            "hello",
            &[BundleFixture::new("hello", "0.0.1").skips(&["hello.v0.0.0"])],
        );
        let rule = UpgradeRule::new(GraphOptions {
            dangling_skips: SkipPolicy::Warn,
        });
        let findings = evaluate(&rule, &repo, "hello");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, ResultKind::Warn);
    }

    #[test]
    fn bundles_are_not_accepted() {
        let repo = repo_with("hello", &[BundleFixture::new("hello", "0.0.1")]);
        let rule = UpgradeRule::new(GraphOptions::default());
        let bundle = &repo.operator("hello").unwrap().bundles()[0];
        let results: Vec<_> = rule.evaluate(Resource::Bundle(bundle), &repo).collect();
        assert!(matches!(
            results.as_slice(),
            [Err(CheckFault::UnsupportedResource { .. })]
        ));
    }
}
