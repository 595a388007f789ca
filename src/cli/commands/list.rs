//! List command implementation.
//!
//! The `optool list` command shows the repository, operators or bundles.

use std::path::{Path, PathBuf};

use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::graph::ChannelGraph;
use crate::repo::selector::resolve_all;
use crate::repo::{load_repo, Bundle, Operator, Repo, Resource};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

const NONE: &str = "-";

/// The list command implementation.
pub struct ListCommand {
    repo_root: PathBuf,
    args: ListArgs,
}

impl ListCommand {
    pub fn new(repo_root: &Path, args: ListArgs) -> Self {
        Self {
            repo_root: repo_root.to_path_buf(),
            args,
        }
    }

    pub fn args(&self) -> &ListArgs {
        &self.args
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let repo = load_repo(&self.repo_root)?;

        if self.args.targets.is_empty() && !self.args.recursive {
            show_repo(&repo, ui);
            return Ok(CommandResult::success());
        }

        let targets = resolve_all(&repo, &self.args.targets)?;
        for target in targets {
            let resources: Vec<Resource> = if self.args.recursive {
                target.expand().collect()
            } else {
                vec![target]
            };
            for resource in resources {
                match resource {
                    Resource::Operator(operator) => show_operator(operator, ui),
                    Resource::Bundle(bundle) => show_bundle(bundle, ui),
                }
            }
        }
        Ok(CommandResult::success())
    }
}

fn show_repo(repo: &Repo, ui: &mut dyn UserInterface) {
    ui.show_header(&repo.root().display().to_string());
    for operator in repo.operators() {
        ui.key_value(
            operator.name(),
            &format!("{} bundle(s)", operator.bundles().len()),
        );
    }
}

fn show_operator(operator: &Operator, ui: &mut dyn UserInterface) {
    ui.show_header(operator.name());

    let versions: Vec<&str> = operator.bundles().iter().map(Bundle::dir_name).collect();
    ui.key_value("Bundles", &versions.join(", "));
    let channels: Vec<&str> = operator.channels().iter().map(String::as_str).collect();
    ui.key_value("Channels", &channels.join(", "));
    ui.key_value("Default channel", operator.default_channel().unwrap_or(NONE));

    // An unknown updateGraph value is reported by the upgrade check.
    let mode = operator.config().update_graph_mode().unwrap_or_default();
    for channel in operator.channels() {
        let graph = ChannelGraph::build(operator, channel, mode);
        let head = match graph.head_candidates().as_slice() {
            [] => "none".to_string(),
            [head] => head.dir_name().to_string(),
            heads => {
                let names: Vec<&str> = heads.iter().map(|b| b.dir_name()).collect();
                format!("ambiguous ({})", names.join(", "))
            }
        };
        ui.key_value(&format!("Head of {}", channel), &head);
    }
}

fn show_bundle(bundle: &Bundle, ui: &mut dyn UserInterface) {
    ui.show_header(&format!("{}/{}", bundle.operator_name(), bundle.dir_name()));

    let channels: Vec<&str> = bundle.channels().iter().map(String::as_str).collect();
    let fields = [
        ("Description", bundle.description().unwrap_or(NONE).to_string()),
        ("CSV name", bundle.csv_name().to_string()),
        ("Version", bundle.version().to_string()),
        ("Channels", channels.join(", ")),
        ("Default channel", bundle.default_channel().unwrap_or(NONE).to_string()),
        ("Container image", bundle.container_image().unwrap_or(NONE).to_string()),
        ("Replaces", bundle.replaces().unwrap_or(NONE).to_string()),
        ("Skips", join_or_none(bundle.skips())),
        ("Skip range", bundle.skip_range_raw().unwrap_or(NONE).to_string()),
    ];
    for (key, value) in &fields {
        ui.key_value(key, value);
    }
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        NONE.to_string()
    } else {
        values.join(", ")
    }
}
