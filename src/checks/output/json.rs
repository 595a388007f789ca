//! JSON output formatter.
//!
//! Collects results and writes one document with a summary once the run is
//! over.

use std::io::Write;

use serde::Serialize;

use super::{ResultFormatter, Summary};
use crate::checks::CheckResult;

/// Formats check results as JSON.
#[derive(Default)]
pub struct JsonFormatter {
    results: Vec<CheckResult>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    results: &'a [CheckResult],
    summary: &'a Summary,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultFormatter for JsonFormatter {
    fn result(&mut self, result: &CheckResult, _writer: &mut dyn Write) -> std::io::Result<()> {
        self.results.push(result.clone());
        Ok(())
    }

    fn finish(&mut self, summary: &Summary, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            results: &self.results,
            summary,
        };
        serde_json::to_writer_pretty(&mut *writer, &output).map_err(std::io::Error::other)?;
        writeln!(writer)
    }
}
