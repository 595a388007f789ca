//! Upgrade graph validation.
//!
//! Each channel of an operator is validated independently through a
//! [`ChannelGraph`]. References in `replaces` and `skips` are validated once
//! per operator, since they do not depend on the channel.
//!
//! # Example
//!
//! ```
//! use operator_repo::graph::{validate_operator, GraphOptions};
//! use operator_repo::repo::{BundleSource, OperatorSource, RepoBuilder};
//!
//! let annotations = "annotations:\n  operators.operatorframework.io.bundle.package.v1: hello\n  operators.operatorframework.io.bundle.channels.v1: beta\n";
//! let first = BundleSource::from_yaml(
//!     "0.0.1", "/repo/operators/hello/0.0.1",
//!     "metadata: {name: hello.v0.0.1}\nspec: {version: 0.0.1}\n", annotations,
//! ).unwrap();
//! let second = BundleSource::from_yaml(
//!     "0.0.2", "/repo/operators/hello/0.0.2",
//!     "metadata: {name: hello.v0.0.2}\nspec: {version: 0.0.2, replaces: hello.v0.0.1}\n", annotations,
//! ).unwrap();
//! let repo = RepoBuilder::new("/repo")
//!     .with_operator(OperatorSource::new("hello", "/repo/operators/hello").with_bundle(first).with_bundle(second))
//!     .build()
//!     .unwrap();
//!
//! let operator = repo.operator("hello").unwrap();
//! assert_eq!(validate_operator(operator, GraphOptions::default()).count(), 0);
//! ```

pub mod channel;
pub mod error;

use tracing::debug;

use crate::config::{CheckSettings, SkipPolicy, UpdateGraphMode};
use crate::repo::{split_csv_name, Bundle, Operator};

pub use channel::ChannelGraph;
pub use error::GraphError;

/// Options for graph validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphOptions {
    /// How skip entries naming no bundle of the operator are reported.
    pub dangling_skips: SkipPolicy,
}

impl From<CheckSettings> for GraphOptions {
    fn from(settings: CheckSettings) -> Self {
        Self {
            dangling_skips: settings.dangling_skips,
        }
    }
}

/// Validate the upgrade graph of every channel of `operator`.
///
/// Violations are produced lazily: reference problems first, in bundle
/// order, then each channel in name order.
pub fn validate_operator(
    operator: &Operator,
    options: GraphOptions,
) -> Box<dyn Iterator<Item = GraphError> + '_> {
    let mode = match operator.config().update_graph_mode() {
        Ok(mode) => mode,
        Err(raw) => {
            return Box::new(operator.channels().iter().map(move |channel| {
                GraphError::UnsupportedUpdateGraph {
                    channel: channel.clone(),
                    mode: raw.clone(),
                }
            }));
        }
    };

    let references = operator
        .bundles()
        .iter()
        .filter(move |_| mode == UpdateGraphMode::Replaces)
        .flat_map(move |bundle| validate_references(operator, bundle, options));
    let channels = operator
        .channels()
        .iter()
        .flat_map(move |channel| validate_channel(operator, channel, mode));

    Box::new(references.chain(channels))
}

/// Validate one channel.
pub fn validate_channel(
    operator: &Operator,
    channel: &str,
    mode: UpdateGraphMode,
) -> Vec<GraphError> {
    debug!("Validating channel {} of {}", channel, operator);
    ChannelGraph::build(operator, channel, mode).validate(operator)
}

/// Validate the `replaces`, `skips` and `olm.skipRange` fields of a bundle.
pub fn validate_references(
    operator: &Operator,
    bundle: &Bundle,
    options: GraphOptions,
) -> Vec<GraphError> {
    let mut errors = Vec::new();

    let replaces = bundle.replaces().map(|r| ("replaces", r));
    let skips = bundle.skips().iter().map(|s| ("skips", s.as_str()));
    for (field, reference) in replaces.into_iter().chain(skips) {
        match split_csv_name(reference) {
            None => errors.push(GraphError::InvalidReference {
                bundle: bundle.dir_name().to_string(),
                field,
                reference: reference.to_string(),
            }),
            Some((name, _)) if name != bundle.csv_operator_name() => {
                errors.push(GraphError::ForeignReference {
                    bundle: bundle.dir_name().to_string(),
                    field,
                    reference: reference.to_string(),
                })
            }
            Some(_) => {
                let dangling =
                    field == "skips" && operator.bundle_by_csv_name(reference).is_none();
                if dangling && options.dangling_skips != SkipPolicy::Ignore {
                    errors.push(GraphError::DanglingSkip {
                        bundle: bundle.dir_name().to_string(),
                        reference: reference.to_string(),
                        policy: options.dangling_skips,
                    });
                }
            }
        }
    }

    if let Some(Err(err)) = bundle.skip_range() {
        errors.push(GraphError::InvalidSkipRange {
            bundle: bundle.dir_name().to_string(),
            reason: err.to_string(),
        });
    }

    errors
}
