//! Upgrade graph violations.

use thiserror::Error;

use crate::checks::ResultKind;
use crate::config::SkipPolicy;

/// A problem found in the upgrade graph of an operator.
///
/// Bundles are named by their directory name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Channel {channel} has no head")]
    NoHead { channel: String },

    #[error("Channel {channel} has multiple heads: {}", heads.join(", "))]
    MultipleHeads { channel: String, heads: Vec<String> },

    /// `members` lists the cycle in predecessor order, without repeating the
    /// first bundle.
    #[error("Channel {channel} has a replaces cycle: {} -> {}", members.join(" -> "), members.first().map(String::as_str).unwrap_or_default())]
    Cycle {
        channel: String,
        members: Vec<String>,
    },

    #[error("Channel {channel} has dangling bundle {bundle}: not reachable from head {head}")]
    Unreachable {
        channel: String,
        bundle: String,
        head: String,
    },

    #[error("Bundle {bundle} has invalid '{field}' entry: '{reference}'")]
    InvalidReference {
        bundle: String,
        field: &'static str,
        reference: String,
    },

    #[error("Bundle {bundle} {field} a bundle from a different operator: '{reference}'")]
    ForeignReference {
        bundle: String,
        field: &'static str,
        reference: String,
    },

    #[error("Bundle {bundle} skips '{reference}', which is not a bundle of this operator")]
    DanglingSkip {
        bundle: String,
        reference: String,
        policy: SkipPolicy,
    },

    #[error("Bundle {bundle} has invalid olm.skipRange: {reason}")]
    InvalidSkipRange { bundle: String, reason: String },

    #[error("Channel {channel}: unknown updateGraph value: {mode}")]
    UnsupportedUpdateGraph { channel: String, mode: String },

    #[error("Head of default channel {channel} ({head}) is not the latest bundle ({latest})")]
    DefaultHeadNotLatest {
        channel: String,
        head: String,
        latest: String,
    },
}

impl GraphError {
    /// Short identifier of the violation.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoHead { .. } => "no-head",
            Self::MultipleHeads { .. } => "multiple-heads",
            Self::Cycle { .. } => "cycle",
            Self::Unreachable { .. } => "unreachable",
            Self::InvalidReference { .. } => "invalid-reference",
            Self::ForeignReference { .. } => "foreign-reference",
            Self::DanglingSkip { .. } => "dangling-skip",
            Self::InvalidSkipRange { .. } => "invalid-skip-range",
            Self::UnsupportedUpdateGraph { .. } => "unsupported-update-graph",
            Self::DefaultHeadNotLatest { .. } => "default-head-not-latest",
        }
    }

    pub fn severity(&self) -> ResultKind {
        match self {
            Self::DefaultHeadNotLatest { .. } => ResultKind::Warn,
            Self::DanglingSkip {
                policy: SkipPolicy::Warn,
                ..
            } => ResultKind::Warn,
            _ => ResultKind::Fail,
        }
    }
}
