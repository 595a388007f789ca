//! Check rule definitions.
//!
//! This module provides the core trait and types for defining checks:
//!
//! - [`CheckRule`] - The trait that all checks must implement
//! - [`Finding`] - One problem reported by a check, before attribution
//! - [`CheckFault`] - An unexpected failure while evaluating a check

use thiserror::Error;

use super::result::ResultKind;
use crate::repo::{Repo, Resource, ResourceKind};

/// One problem found by a check. The engine attributes it to the check, the
/// resource and the suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub kind: ResultKind,
    pub message: String,
}

impl Finding {
    pub fn new(kind: ResultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(ResultKind::Fail, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(ResultKind::Warn, message)
    }
}

/// An unexpected failure while evaluating a check.
#[derive(Debug, Error)]
pub enum CheckFault {
    /// The check was handed a resource it does not accept.
    #[error("check {check} does not accept {found} resources")]
    UnsupportedResource { check: String, found: ResourceKind },

    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// The lazy output of one check against one resource.
///
/// Each pull yields a finding, a fault, or signals that the check is done.
pub type Findings<'a> = Box<dyn Iterator<Item = Result<Finding, CheckFault>> + 'a>;

/// A check that can be run against operators or bundles.
///
/// Checks are registered in a [`Suite`](super::Suite) under their name and
/// applied to every selected resource of the kind they accept.
pub trait CheckRule: Send + Sync {
    /// Unique name of the check within its suite.
    fn name(&self) -> &str;

    /// Description of what this check verifies.
    fn description(&self) -> &str;

    /// The kind of resource the check accepts.
    fn applies_to(&self) -> ResourceKind;

    /// Evaluate the check against `target`.
    ///
    /// The engine calls this only when the first finding is requested.
    fn evaluate<'a>(&'a self, target: Resource<'a>, repo: &'a Repo) -> Findings<'a>;
}

/// Findings for a resource of the wrong kind.
pub fn unsupported<'a>(rule: &dyn CheckRule, target: Resource<'a>) -> Findings<'a> {
    let fault = CheckFault::UnsupportedResource {
        check: rule.name().to_string(),
        found: target.kind(),
    };
    Box::new(std::iter::once(Err(fault)))
}

/// Wrap a list of findings.
pub fn findings<'a>(found: Vec<Finding>) -> Findings<'a> {
    Box::new(found.into_iter().map(Ok))
}
