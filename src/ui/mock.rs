//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.

use std::io::Write;

use super::{OutputMode, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    /// Everything written as results or detail lines.
    output: Vec<u8>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Everything written through [`UserInterface::writer`] and
    /// [`UserInterface::key_value`].
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if the result output contains `text`.
    pub fn has_output(&self, text: &str) -> bool {
        self.output().contains(text)
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn key_value(&mut self, key: &str, value: &str) {
        writeln!(self.output, "{}: {}", key, value).ok();
    }

    fn writer(&mut self) -> &mut dyn Write {
        &mut self.output
    }

    fn use_colors(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_interactions() {
        let mut ui = MockUI::new();
        ui.message("Loading");
        ui.success("Done");
        ui.warning("Careful");
        ui.error("Broken");
        ui.show_header("etcd");

        assert!(ui.has_message("Load"));
        assert_eq!(ui.successes(), ["Done"]);
        assert!(ui.has_warning("Careful"));
        assert!(ui.has_error("Broken"));
        assert_eq!(ui.headers(), ["etcd"]);
    }

    #[test]
    fn captures_written_output() {
        let mut ui = MockUI::with_mode(OutputMode::Quiet);
        writeln!(ui.writer(), "error[semver]: etcd/v1.0: bad").unwrap();
        ui.key_value("Head", "0.9.4");

        assert_eq!(ui.output_mode(), OutputMode::Quiet);
        assert!(ui.has_output("error[semver]"));
        assert_eq!(ui.output(), "error[semver]: etcd/v1.0: bad\nHead: 0.9.4\n");
    }
}
