//! Check suites.
//!
//! A [`Suite`] holds the checks of one namespace, in two groups: those that
//! accept operators and those that accept bundles. Each group is kept sorted
//! by check name so enumeration order does not depend on registration order.

use std::collections::BTreeMap;

use super::rule::CheckRule;
use super::rules::{ImageRule, OperatorNameRule, SemverRule, UpgradeRule};
use crate::error::{RepoError, Result};
use crate::graph::GraphOptions;
use crate::repo::ResourceKind;

/// Name of the suite of builtin checks.
pub const BUILTIN_SUITE: &str = "operator_repo.checks";

/// A named collection of checks.
pub struct Suite {
    name: String,
    operator_checks: BTreeMap<String, Box<dyn CheckRule>>,
    bundle_checks: BTreeMap<String, Box<dyn CheckRule>>,
}

impl Suite {
    /// Create an empty suite.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operator_checks: BTreeMap::new(),
            bundle_checks: BTreeMap::new(),
        }
    }

    /// The builtin checks.
    pub fn builtin(options: GraphOptions) -> Self {
        let mut suite = Self::new(BUILTIN_SUITE);
        suite.register(Box::new(UpgradeRule::new(options)));
        suite.register(Box::new(SemverRule));
        suite.register(Box::new(OperatorNameRule));
        suite.register(Box::new(ImageRule));
        suite
    }

    /// Look up a suite by name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownSuite` for any name but the builtin suite.
    pub fn by_name(name: &str, options: GraphOptions) -> Result<Self> {
        if name == BUILTIN_SUITE {
            Ok(Self::builtin(options))
        } else {
            Err(RepoError::UnknownSuite {
                name: name.to_string(),
            })
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a check. A check with the same name in the same group is
    /// replaced.
    pub fn register(&mut self, rule: Box<dyn CheckRule>) {
        let name = rule.name().to_string();
        self.group_mut(rule.applies_to()).insert(name, rule);
    }

    /// Checks accepting `kind`, sorted by name.
    pub fn checks(&self, kind: ResourceKind) -> impl Iterator<Item = &dyn CheckRule> {
        self.group(kind).values().map(|r| r.as_ref())
    }

    /// Find a check by name in either group.
    pub fn get(&self, name: &str) -> Option<&dyn CheckRule> {
        self.operator_checks
            .get(name)
            .or_else(|| self.bundle_checks.get(name))
            .map(|r| r.as_ref())
    }

    /// Keep only the checks named in `only` (all if empty), minus those
    /// named in `skip`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCheck` if a name is not part of the suite.
    pub fn select(mut self, only: &[String], skip: &[String]) -> Result<Self> {
        for name in only.iter().chain(skip) {
            if self.get(name).is_none() {
                return Err(RepoError::UnknownCheck { name: name.clone() });
            }
        }
        let keep = |name: &String| {
            (only.is_empty() || only.contains(name)) && !skip.contains(name)
        };
        self.operator_checks.retain(|name, _| keep(name));
        self.bundle_checks.retain(|name, _| keep(name));
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.operator_checks.len() + self.bundle_checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn group(&self, kind: ResourceKind) -> &BTreeMap<String, Box<dyn CheckRule>> {
        match kind {
            ResourceKind::Operator => &self.operator_checks,
            ResourceKind::Bundle => &self.bundle_checks,
        }
    }

    fn group_mut(&mut self, kind: ResourceKind) -> &mut BTreeMap<String, Box<dyn CheckRule>> {
        match kind {
            ResourceKind::Operator => &mut self.operator_checks,
            ResourceKind::Bundle => &mut self.bundle_checks,
        }
    }
}
