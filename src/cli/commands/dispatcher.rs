//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::ui::UserInterface;

/// Exit code when no check failed.
pub const EXIT_OK: i32 = 0;
/// Exit code when at least one check failed.
pub const EXIT_FAILURES: i32 = 1;
/// Exit code for load and usage errors raised before any check ran.
pub const EXIT_ERROR: i32 = 2;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Load and usage errors are returned; problems found by checks are
    /// reported through `ui` and reflected in the exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: EXIT_OK,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    repo_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given repository root.
    pub fn new(repo_root: PathBuf) -> Self {
        Self { repo_root }
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::List(args) => {
                let cmd = super::list::ListCommand::new(&self.repo_root, args.clone());
                cmd.execute(ui)
            }
            Commands::Check(args) => {
                let cmd = super::check::CheckCommand::new(&self.repo_root, args.clone());
                cmd.execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{write_repo, BundleFixture};
    use crate::ui::MockUI;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, EXIT_OK);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(EXIT_FAILURES);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatches_to_list() {
        let temp = TempDir::new().unwrap();
        write_repo(temp.path(), &[BundleFixture::new("hello", "0.0.1")]);
        let dispatcher = CommandDispatcher::new(temp.path().to_path_buf());
        assert_eq!(dispatcher.repo_root(), temp.path());

        let cli = Cli::parse_from(["optool", "list"]);
        let mut ui = MockUI::new();
        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();
        assert!(result.success);
        assert!(ui.headers().iter().any(|h| h.contains("hello")));
    }

    #[test]
    fn dispatches_to_check_list_without_a_repo() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/non_existent"));
        let cli = Cli::parse_from(["optool", "check", "--list"]);
        let mut ui = MockUI::new();
        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();
        assert!(result.success);
        assert!(ui.has_output("upgrade"));
    }
}
