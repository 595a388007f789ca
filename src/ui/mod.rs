//! User interface abstraction.
//!
//! This module provides:
//! - [`UserInterface`] trait separating presentation from command logic
//! - [`TerminalUI`] writing to stdout and stderr with `console` styles
//! - [`MockUI`] capturing everything for assertions in tests
//!
//! # Example
//!
//! ```
//! use operator_repo::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.show_header("etcd");
//! ui.key_value("Channels", "alpha, beta");
//! assert!(ui.has_output("Channels: alpha, beta"));
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, Theme};

use std::io::Write;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every output mode.
    fn error(&mut self, msg: &str);

    /// Show a header line.
    fn show_header(&mut self, title: &str);

    /// Show one `key: value` line of a detail view.
    fn key_value(&mut self, key: &str, value: &str);

    /// Writer for command results. Shown in every output mode.
    fn writer(&mut self) -> &mut dyn Write;

    /// Whether styled output is enabled.
    fn use_colors(&self) -> bool;
}
