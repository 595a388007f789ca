//! Check command implementation.
//!
//! The `optool check` command runs a check suite against operators and
//! bundles. Results are written as they are pulled from the engine, so
//! `--fail-fast` stops evaluating checks as soon as one fails.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::checks::output::formatter;
use crate::checks::{CheckEngine, EngineOptions, Suite, Summary};
use crate::cli::args::CheckArgs;
use crate::error::Result;
use crate::graph::GraphOptions;
use crate::repo::load_repo;
use crate::repo::selector::resolve_all;
use crate::repo::ResourceKind;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, EXIT_FAILURES};

/// The check command implementation.
pub struct CheckCommand {
    repo_root: PathBuf,
    args: CheckArgs,
}

impl CheckCommand {
    pub fn new(repo_root: &Path, args: CheckArgs) -> Self {
        Self {
            repo_root: repo_root.to_path_buf(),
            args,
        }
    }

    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    /// Print the checks of the suite, grouped by the resource kind they
    /// accept.
    fn list_checks(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let suite = Suite::by_name(&self.args.suite, GraphOptions::default())?;
        ui.show_header(suite.name());
        for (kind, title) in [
            (ResourceKind::Operator, "Operator checks"),
            (ResourceKind::Bundle, "Bundle checks"),
        ] {
            ui.message(title);
            for rule in suite.checks(kind) {
                ui.key_value(rule.name(), rule.description());
            }
        }
        Ok(CommandResult::success())
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.list {
            return self.list_checks(ui);
        }

        let repo = load_repo(&self.repo_root)?;

        let mut settings = repo.config().checks;
        if let Some(policy) = self.args.dangling_skips {
            settings.dangling_skips = policy;
        }
        debug!("Dangling skips are reported as: {}", settings.dangling_skips);

        let suite = Suite::by_name(&self.args.suite, settings.into())?
            .select(&self.args.only, &self.args.skip)?;
        let targets = resolve_all(&repo, &self.args.targets)?;

        let options = EngineOptions {
            recursive: self.args.recursive,
            report_passes: self.args.show_passes,
        };
        let engine = CheckEngine::new(&suite, options);
        let mut formatter = formatter(self.args.format, ui.use_colors());
        let mut summary = Summary::default();

        for result in engine.run(&repo, targets) {
            summary.record(&result);
            formatter.result(&result, ui.writer())?;
            if self.args.fail_fast && result.is_failure() {
                debug!("Stopping after first failure");
                break;
            }
        }
        formatter.finish(&summary, ui.writer())?;

        if summary.has_failures() {
            Ok(CommandResult::failure(EXIT_FAILURES))
        } else {
            Ok(CommandResult::success())
        }
    }
}
