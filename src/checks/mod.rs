//! Pluggable checks over operators and bundles.
//!
//! # Overview
//!
//! - **Rules** - Individual checks ([`CheckRule`] trait), each accepting one
//!   [`ResourceKind`](crate::repo::ResourceKind)
//! - **Suites** - Named tables of rules ([`Suite`]), enumerated by name
//! - **Engine** - Runs a suite against resources ([`CheckEngine`]) and yields
//!   a lazy stream of [`CheckResult`]s
//!
//! # Example
//!
//! ```
//! use operator_repo::checks::{CheckEngine, EngineOptions, ResultKind, Suite};
//! use operator_repo::repo::{BundleSource, OperatorSource, RepoBuilder, Selector};
//!
//! let csv = "metadata: {name: hello.vv1.0}\nspec: {version: v1.0}\n";
//! let annotations = "annotations:\n  operators.operatorframework.io.bundle.package.v1: hello\n  operators.operatorframework.io.bundle.channels.v1: beta\n";
//! let bundle = BundleSource::from_yaml("v1.0", "/repo/operators/hello/v1.0", csv, annotations).unwrap();
//! let repo = RepoBuilder::new("/repo")
//!     .with_operator(OperatorSource::new("hello", "/repo/operators/hello").with_bundle(bundle))
//!     .build()
//!     .unwrap();
//!
//! let suite = Suite::builtin(Default::default()).select(&["semver".into()], &[]).unwrap();
//! let engine = CheckEngine::new(&suite, EngineOptions { recursive: true, ..Default::default() });
//! let targets = Selector::All.resolve(&repo).unwrap();
//!
//! let results: Vec<_> = engine.run(&repo, targets).collect();
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].kind, ResultKind::Fail);
//! ```

pub mod engine;
pub mod output;
pub mod registry;
pub mod result;
pub mod rule;
pub mod rules;

pub use engine::{CheckEngine, CheckRun, EngineOptions};
pub use output::{HumanFormatter, JsonFormatter, OutputFormat, ResultFormatter, Summary};
pub use registry::{Suite, BUILTIN_SUITE};
pub use result::{CheckResult, ResultKind};
pub use rule::{CheckFault, CheckRule, Finding, Findings};
pub use rules::{ImageRule, OperatorNameRule, SemverRule, UpgradeRule};
