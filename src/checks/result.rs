//! Check results.
//!
//! This module provides the [`CheckResult`] type produced by every check,
//! and [`ResultKind`], its outcome ordered by severity.

use std::fmt;

use serde::Serialize;

use crate::repo::Subject;

/// Outcome of a check, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    /// The check found nothing to report.
    Pass,
    /// A non-fatal problem.
    Warn,
    /// A problem that makes the run fail.
    Fail,
}

impl ResultKind {
    /// Numeric severity, for consumers that rank results.
    pub fn severity(self) -> u8 {
        match self {
            Self::Pass => 0,
            Self::Warn => 40,
            Self::Fail => 90,
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "success"),
            Self::Warn => write!(f, "warning"),
            Self::Fail => write!(f, "error"),
        }
    }
}

/// One result of running a check against a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CheckResult {
    pub kind: ResultKind,
    /// The resource the result concerns.
    pub subject: Subject,
    /// Human-readable message.
    pub message: String,
    /// Name of the check that produced the result.
    pub check: String,
    /// Name of the suite the check belongs to.
    pub suite: String,
}

impl CheckResult {
    pub fn new(
        kind: ResultKind,
        subject: Subject,
        message: impl Into<String>,
        check: impl Into<String>,
        suite: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            subject,
            message: message.into(),
            check: check.into(),
            suite: suite.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.kind == ResultKind::Fail
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]: {}: {}",
            self.kind, self.check, self.subject, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject() -> Subject {
        Subject::Bundle {
            operator: "etcd".into(),
            version: "0.9.4".into(),
        }
    }

    #[test]
    fn kind_ordering() {
        assert!(ResultKind::Pass < ResultKind::Warn);
        assert!(ResultKind::Warn < ResultKind::Fail);
        assert!(ResultKind::Warn.severity() < ResultKind::Fail.severity());
    }

    #[test]
    fn kind_display() {
        assert_eq!(ResultKind::Pass.to_string(), "success");
        assert_eq!(ResultKind::Warn.to_string(), "warning");
        assert_eq!(ResultKind::Fail.to_string(), "error");
    }

    #[test]
    fn result_display() {
        let result = CheckResult::new(
            ResultKind::Fail,
            subject(),
            "Version v1.0 is not valid semver",
            "semver",
            "builtin",
        );
        assert!(result.is_failure());
        assert_eq!(
            result.to_string(),
            "error[semver]: etcd/0.9.4: Version v1.0 is not valid semver"
        );
    }

    #[test]
    fn result_serializes_subject_with_kind_tag() {
        let result = CheckResult::new(ResultKind::Warn, subject(), "msg", "image", "builtin");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["kind"], "warn");
        assert_eq!(json["subject"]["kind"], "bundle");
        assert_eq!(json["subject"]["operator"], "etcd");
    }
}
