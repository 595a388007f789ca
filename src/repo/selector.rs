//! Resource selectors: `<operator>` or `<operator>/<bundle-version>`.

use std::fmt;
use std::str::FromStr;

use crate::error::{RepoError, Result};

use super::resource::Resource;
use super::Repo;

/// A parsed resource name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// The whole repository.
    All,
    Operator(String),
    Bundle { operator: String, version: String },
}

impl FromStr for Selector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim().trim_end_matches('/');
        Ok(match s.split_once('/') {
            _ if s.is_empty() => Self::All,
            Some((operator, version)) => Self::Bundle {
                operator: operator.to_string(),
                version: version.to_string(),
            },
            None => Self::Operator(s.to_string()),
        })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => Ok(()),
            Self::Operator(name) => write!(f, "{}", name),
            Self::Bundle { operator, version } => write!(f, "{}/{}", operator, version),
        }
    }
}

impl Selector {
    /// Resolve the selector to resources. `All` selects every operator.
    ///
    /// # Errors
    ///
    /// Returns `UnknownOperator` or `UnknownBundle` if nothing matches.
    pub fn resolve<'r>(&self, repo: &'r Repo) -> Result<Vec<Resource<'r>>> {
        match self {
            Self::All => Ok(repo.operators().iter().map(Resource::Operator).collect()),
            Self::Operator(name) => repo
                .operator(name)
                .map(|o| vec![Resource::Operator(o)])
                .ok_or_else(|| RepoError::UnknownOperator { name: name.clone() }),
            Self::Bundle { operator, version } => {
                let op = repo
                    .operator(operator)
                    .ok_or_else(|| RepoError::UnknownOperator {
                        name: operator.clone(),
                    })?;
                op.bundle(version)
                    .map(|b| vec![Resource::Bundle(b)])
                    .ok_or_else(|| RepoError::UnknownBundle {
                        operator: operator.clone(),
                        version: version.clone(),
                    })
            }
        }
    }
}

/// Resolve a list of selector strings; an empty list selects everything.
pub fn resolve_all<'r, S: AsRef<str>>(repo: &'r Repo, names: &[S]) -> Result<Vec<Resource<'r>>> {
    if names.is_empty() {
        return Selector::All.resolve(repo);
    }
    let mut resources = Vec::new();
    for name in names {
        let selector: Selector = match name.as_ref().parse() {
            Ok(selector) => selector,
            Err(never) => match never {},
        };
        resources.extend(selector.resolve(repo)?);
    }
    Ok(resources)
}
