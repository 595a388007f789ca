//! Builtin checks.

pub mod image;
pub mod operator_name;
pub mod semver;
pub mod upgrade;

pub use image::ImageRule;
pub use operator_name::OperatorNameRule;
pub use semver::SemverRule;
pub use upgrade::UpgradeRule;
