//! Check result formatters.
//!
//! Results arrive one at a time while the check run is being pulled. The
//! human formatter writes each line immediately; the JSON formatter collects
//! results and writes a single document in [`ResultFormatter::finish`].

pub mod human;
pub mod json;

use std::io::Write;
use std::str::FromStr;

use serde::Serialize;

use super::result::{CheckResult, ResultKind};

/// Output format for check results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

/// Counts of results by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
    pub passes: usize,
}

impl Summary {
    pub fn record(&mut self, result: &CheckResult) {
        self.total += 1;
        match result.kind {
            ResultKind::Fail => self.errors += 1,
            ResultKind::Warn => self.warnings += 1,
            ResultKind::Pass => self.passes += 1,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.errors > 0
    }
}

/// Trait for formatting check results.
pub trait ResultFormatter {
    /// Called once per result, in the order the run produces them.
    fn result(&mut self, result: &CheckResult, writer: &mut dyn Write) -> std::io::Result<()>;

    /// Called once after the last result.
    fn finish(&mut self, summary: &Summary, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create the formatter for `format`.
pub fn formatter(format: OutputFormat, use_color: bool) -> Box<dyn ResultFormatter> {
    match format {
        OutputFormat::Human => Box::new(HumanFormatter::new(use_color)),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
    }
}

pub use human::HumanFormatter;
pub use json::JsonFormatter;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::Subject;

    #[test]
    fn parses_formats() {
        assert_eq!("human".parse::<OutputFormat>(), Ok(OutputFormat::Human));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("sarif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn summary_counts_by_kind() {
        let subject = Subject::Operator { name: "etcd".into() };
        let mut summary = Summary::default();
        for kind in [ResultKind::Fail, ResultKind::Warn, ResultKind::Warn, ResultKind::Pass] {
            summary.record(&CheckResult::new(kind, subject.clone(), "m", "c", "s"));
        }
        assert_eq!(
            summary,
            Summary {
                total: 4,
                errors: 1,
                warnings: 2,
                passes: 1
            }
        );
        assert!(summary.has_failures());
    }
}
