//! Human-readable output formatter.
//!
//! Writes one line per result as it arrives, with optional color.

use std::io::Write;

use console::Style;

use super::{ResultFormatter, Summary};
use crate::checks::{CheckResult, ResultKind};

/// Formats check results for human consumption.
pub struct HumanFormatter {
    /// Whether to use colors (ANSI escape codes).
    pub use_color: bool,
}

impl HumanFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn style(&self, kind: ResultKind) -> Style {
        let style = match kind {
            ResultKind::Pass => Style::new().green(),
            ResultKind::Warn => Style::new().yellow(),
            ResultKind::Fail => Style::new().red().bold(),
        };
        style.force_styling(self.use_color)
    }
}

impl ResultFormatter for HumanFormatter {
    fn result(&mut self, result: &CheckResult, writer: &mut dyn Write) -> std::io::Result<()> {
        // error[check]: subject: message
        writeln!(
            writer,
            "{}[{}]: {}: {}",
            self.style(result.kind).apply_to(result.kind),
            result.check,
            result.subject,
            result.message
        )
    }

    fn finish(&mut self, summary: &Summary, writer: &mut dyn Write) -> std::io::Result<()> {
        if summary.errors > 0 || summary.warnings > 0 {
            writeln!(writer)?;
            writeln!(
                writer,
                "Found {} error(s) and {} warning(s)",
                summary.errors, summary.warnings
            )?;
        }
        Ok(())
    }
}
