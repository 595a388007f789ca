//! Resources checks can be run against.

use std::fmt;

use serde::Serialize;

use super::bundle::Bundle;
use super::operator::Operator;

/// The kind of resource a check accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Operator,
    Bundle,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operator => write!(f, "operator"),
            Self::Bundle => write!(f, "bundle"),
        }
    }
}

/// A borrowed operator or bundle.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'r> {
    Operator(&'r Operator),
    Bundle(&'r Bundle),
}

impl<'r> Resource<'r> {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Operator(_) => ResourceKind::Operator,
            Self::Bundle(_) => ResourceKind::Bundle,
        }
    }

    /// An owned identification of the resource.
    pub fn subject(&self) -> Subject {
        match self {
            Self::Operator(o) => Subject::Operator {
                name: o.name().to_string(),
            },
            Self::Bundle(b) => Subject::Bundle {
                operator: b.operator_name().to_string(),
                version: b.dir_name().to_string(),
            },
        }
    }

    /// The resource itself followed, for an operator, by its bundles in
    /// version order.
    pub fn expand(self) -> impl Iterator<Item = Resource<'r>> + 'r {
        let bundles: &'r [Bundle] = match self {
            Self::Operator(o) => o.bundles(),
            Self::Bundle(_) => &[],
        };
        std::iter::once(self).chain(bundles.iter().map(Resource::Bundle))
    }
}

impl fmt::Display for Resource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operator(o) => write!(f, "{}", o),
            Self::Bundle(b) => write!(f, "{}", b),
        }
    }
}

/// Owned identity of the resource a result concerns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Subject {
    Operator { name: String },
    Bundle { operator: String, version: String },
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operator { name } => write!(f, "{}", name),
            Self::Bundle { operator, version } => write!(f, "{}/{}", operator, version),
        }
    }
}
