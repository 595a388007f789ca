//! Check execution.
//!
//! [`CheckEngine::run`] returns a [`CheckRun`], a pull-based iterator over
//! [`CheckResult`]s. Nothing is evaluated until the first result is
//! requested, and a check is only evaluated when the results before it have
//! been consumed. Dropping the run stops all evaluation.

use tracing::{debug, warn};

use super::registry::Suite;
use super::result::{CheckResult, ResultKind};
use super::rule::{CheckRule, Findings};
use crate::repo::{Repo, Resource};

/// Options for a check run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Expand each operator into itself followed by its bundles.
    pub recursive: bool,
    /// Report a pass for every check that found nothing.
    pub report_passes: bool,
}

/// Runs the checks of a suite against resources.
pub struct CheckEngine<'s> {
    suite: &'s Suite,
    options: EngineOptions,
}

impl<'s> CheckEngine<'s> {
    pub fn new(suite: &'s Suite, options: EngineOptions) -> Self {
        Self { suite, options }
    }

    pub fn suite(&self) -> &Suite {
        self.suite
    }

    /// Start a run over `targets`. Resources are visited in the given order.
    pub fn run<'a>(&self, repo: &'a Repo, targets: Vec<Resource<'a>>) -> CheckRun<'a>
    where
        's: 'a,
    {
        let recursive = self.options.recursive;
        let resources = targets.into_iter().flat_map(move |target| {
            let expanded: Box<dyn Iterator<Item = Resource<'a>> + 'a> = if recursive {
                Box::new(target.expand())
            } else {
                Box::new(std::iter::once(target))
            };
            expanded
        });

        CheckRun {
            suite: self.suite,
            repo,
            report_passes: self.options.report_passes,
            resources: Box::new(resources),
            current: None,
            rules: Vec::new().into_iter(),
            active: None,
        }
    }
}

/// A check being evaluated against one resource.
struct Active<'a> {
    rule: &'a dyn CheckRule,
    target: Resource<'a>,
    findings: Option<Findings<'a>>,
    produced: bool,
}

/// The lazy stream of results of a check run.
pub struct CheckRun<'a> {
    suite: &'a Suite,
    repo: &'a Repo,
    report_passes: bool,
    resources: Box<dyn Iterator<Item = Resource<'a>> + 'a>,
    current: Option<Resource<'a>>,
    rules: std::vec::IntoIter<&'a dyn CheckRule>,
    active: Option<Active<'a>>,
}

impl<'a> CheckRun<'a> {
    fn result(
        &self,
        rule: &dyn CheckRule,
        target: Resource<'_>,
        kind: ResultKind,
        message: impl Into<String>,
    ) -> CheckResult {
        CheckResult::new(
            kind,
            target.subject(),
            message,
            rule.name(),
            self.suite.name(),
        )
    }
}

impl<'a> Iterator for CheckRun<'a> {
    type Item = CheckResult;

    fn next(&mut self) -> Option<CheckResult> {
        loop {
            if let Some(active) = self.active.as_mut() {
                let (rule, target, repo) = (active.rule, active.target, self.repo);
                let findings = active.findings.get_or_insert_with(|| {
                    debug!("Running {} check on {}", rule.name(), target);
                    rule.evaluate(target, repo)
                });

                match findings.next() {
                    Some(Ok(finding)) => {
                        active.produced = true;
                        return Some(self.result(rule, target, finding.kind, finding.message));
                    }
                    Some(Err(fault)) => {
                        warn!("Error running {} check on {}: {}", rule.name(), target, fault);
                        self.active = None;
                        return Some(self.result(
                            rule,
                            target,
                            ResultKind::Fail,
                            format!("Check failed unexpectedly: {}", fault),
                        ));
                    }
                    None => {
                        let produced = active.produced;
                        self.active = None;
                        if self.report_passes && !produced {
                            return Some(self.result(rule, target, ResultKind::Pass, "Success"));
                        }
                        continue;
                    }
                }
            }

            if let Some(target) = self.current {
                if let Some(rule) = self.rules.next() {
                    self.active = Some(Active {
                        rule,
                        target,
                        findings: None,
                        produced: false,
                    });
                    continue;
                }
            }

            let target = self.resources.next()?;
            self.current = Some(target);
            self.rules = self
                .suite
                .checks(target.kind())
                .collect::<Vec<_>>()
                .into_iter();
        }
    }
}
