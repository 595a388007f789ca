//! Bundle versions and skip ranges.
//!
//! Parsing is delegated to the `semver` crate. A version string that does not
//! parse is kept as [`BundleVersion::Invalid`] so that the bundle can still be
//! listed and checked.
//!
//! Skip ranges reuse the comparators `semver` parses but compare by plain
//! version order, so pre-releases fall inside a range like any other version.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use semver::{BuildMetadata, Comparator, Op, Version, VersionReq};
use thiserror::Error;

/// A bundle version as declared in its manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BundleVersion {
    /// A conforming semantic version.
    Valid(Version),
    /// The raw string of a version that is not valid semver.
    Invalid(String),
}

impl BundleVersion {
    /// Parse a version string. Never fails.
    pub fn parse(raw: &str) -> Self {
        match Version::parse(raw.trim()) {
            Ok(version) => Self::Valid(version),
            Err(_) => Self::Invalid(raw.to_string()),
        }
    }

    /// Whether the version is valid semver.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The parsed version, if valid.
    pub fn as_semver(&self) -> Option<&Version> {
        match self {
            Self::Valid(version) => Some(version),
            Self::Invalid(_) => None,
        }
    }
}

impl fmt::Display for BundleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(version) => write!(f, "{}", version),
            Self::Invalid(raw) => write!(f, "{}", raw),
        }
    }
}

// Valid versions sort before invalid ones; invalid versions sort lexically.
impl Ord for BundleVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Valid(a), Self::Valid(b)) => a.cmp(b),
            (Self::Valid(_), Self::Invalid(_)) => Ordering::Less,
            (Self::Invalid(_), Self::Valid(_)) => Ordering::Greater,
            (Self::Invalid(a), Self::Invalid(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for BundleVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Error returned when a skip range cannot be parsed.
#[derive(Debug, Clone, Error)]
#[error("invalid version range '{raw}': {reason}")]
pub struct RangeError {
    pub raw: String,
    pub reason: String,
}

/// A range of versions a bundle may supersede, as in `olm.skipRange`.
///
/// The syntax is a set of alternatives separated by `||`, each a
/// whitespace-separated list of comparators that must all hold, e.g.
/// `>=0.9.0 <0.9.4`. A bare version means an exact match.
#[derive(Debug, Clone)]
pub struct SkipRange {
    raw: String,
    alternatives: Vec<VersionReq>,
}

impl SkipRange {
    /// The range as written in the manifest.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether a version falls inside the range. Invalid versions never do.
    pub fn contains(&self, version: &BundleVersion) -> bool {
        match version.as_semver() {
            Some(version) => {
                let version = without_build(version);
                self.alternatives
                    .iter()
                    .any(|req| req.comparators.iter().all(|c| admits(c, &version)))
            }
            None => false,
        }
    }
}

fn without_build(version: &Version) -> Version {
    Version {
        build: BuildMetadata::EMPTY,
        ..version.clone()
    }
}

/// Whether `version` satisfies one comparator, ordering pre-releases before
/// their release.
fn admits(comparator: &Comparator, version: &Version) -> bool {
    let major = comparator.major;
    let minor = comparator.minor.unwrap_or(0);
    let patch = comparator.patch.unwrap_or(0);
    let mut lower = Version::new(major, minor, patch);
    lower.pre = comparator.pre.clone();

    // First version past a partial one: `1.2` ends before `1.3.0`.
    let partial_end = match (comparator.minor, comparator.patch) {
        (None, _) => Some(Version::new(major + 1, 0, 0)),
        (Some(minor), None) => Some(Version::new(major, minor + 1, 0)),
        _ => None,
    };
    let below = |end: Version| *version < end;

    match comparator.op {
        Op::Exact | Op::Wildcard => match partial_end {
            Some(end) => *version >= lower && below(end),
            None => *version == lower,
        },
        Op::Greater => match partial_end {
            Some(end) => *version >= end,
            None => *version > lower,
        },
        Op::GreaterEq => *version >= lower,
        Op::Less => *version < lower,
        Op::LessEq => match partial_end {
            Some(end) => below(end),
            None => *version <= lower,
        },
        Op::Tilde => {
            let end = match comparator.minor {
                Some(minor) => Version::new(major, minor + 1, 0),
                None => Version::new(major + 1, 0, 0),
            };
            *version >= lower && below(end)
        }
        Op::Caret => {
            let end = match (comparator.minor, comparator.patch) {
                _ if major > 0 => Version::new(major + 1, 0, 0),
                (None, _) => Version::new(1, 0, 0),
                (Some(minor), _) if minor > 0 => Version::new(0, minor + 1, 0),
                (Some(minor), None) => Version::new(0, minor + 1, 0),
                (Some(_), Some(patch)) => Version::new(0, 0, patch + 1),
            };
            *version >= lower && below(end)
        }
        _ => false,
    }
}

impl FromStr for SkipRange {
    type Err = RangeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let err = |reason: String| RangeError {
            raw: raw.to_string(),
            reason,
        };

        let mut alternatives = Vec::new();
        for alternative in raw.split("||") {
            let comparators = comparators(alternative);
            if comparators.is_empty() {
                return Err(err("empty range".to_string()));
            }
            let req = VersionReq::parse(&comparators.join(", ")).map_err(|e| err(e.to_string()))?;
            alternatives.push(req);
        }

        Ok(Self {
            raw: raw.to_string(),
            alternatives,
        })
    }
}

impl fmt::Display for SkipRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Split one alternative into comparators, gluing a lone operator to the
/// version that follows it (`>= 1.0.0` becomes `>=1.0.0`).
fn comparators(alternative: &str) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    let mut pending_op: Option<&str> = None;

    for token in alternative.split_whitespace() {
        if token.chars().all(|c| "<>=~^!".contains(c)) {
            pending_op = Some(token);
            continue;
        }
        let token = match pending_op.take() {
            Some(op) => format!("{}{}", op, token),
            None => token.to_string(),
        };
        // A bare version is an exact match, not a caret requirement.
        let token = if token.starts_with(|c: char| c.is_ascii_digit())
            && !token.contains(['x', 'X', '*'])
        {
            format!("={}", token)
        } else {
            token
        };
        result.push(token);
    }

    if let Some(op) = pending_op {
        result.push(op.to_string());
    }
    result
}
