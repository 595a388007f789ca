//! Repository and operator configuration.
//!
//! - Schema definitions in [`schema`]
//! - YAML file discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use operator_repo::config::{OperatorConfig, UpdateGraphMode};
//!
//! let config: OperatorConfig = serde_yaml::from_str("updateGraph: semver-mode").unwrap();
//! assert_eq!(config.update_graph_mode(), Ok(UpdateGraphMode::Semver));
//! ```

pub mod loader;
pub mod schema;

pub use loader::{find_yaml, load_operator_config, load_repo_config, load_yaml, parse_yaml};
pub use schema::{CheckSettings, OperatorConfig, RepoConfig, SkipPolicy, UpdateGraphMode};
