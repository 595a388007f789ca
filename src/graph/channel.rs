//! The upgrade graph of one channel.

use tracing::debug;

use crate::config::UpdateGraphMode;
use crate::repo::{Bundle, Operator};
use crate::version::SkipRange;

use super::error::GraphError;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

/// Upgrade edges between the bundles of one channel.
///
/// Members are indexed in version order. A member supersedes another when it
/// names it as predecessor, lists it in its skips, or covers its version
/// with its skip range.
#[derive(Debug, Clone)]
pub struct ChannelGraph<'r> {
    name: String,
    members: Vec<&'r Bundle>,
    predecessors: Vec<Option<usize>>,
    skips: Vec<Vec<usize>>,
    ranges: Vec<Option<SkipRange>>,
    unresolved: Vec<(usize, String)>,
}

impl<'r> ChannelGraph<'r> {
    /// Build the graph of `channel`. References are resolved by CSV name
    /// among the channel's members only.
    pub fn build(operator: &'r Operator, channel: &str, mode: UpdateGraphMode) -> Self {
        let members = operator.channel_bundles(channel);
        let count = members.len();
        let index_of = |csv_name: &str| members.iter().position(|b| b.csv_name() == csv_name);

        let mut predecessors = vec![None; count];
        let mut skips = vec![Vec::new(); count];
        let mut ranges = vec![None; count];
        let mut unresolved = Vec::new();

        match mode {
            UpdateGraphMode::Semver => {
                for (index, predecessor) in predecessors.iter_mut().enumerate().skip(1) {
                    *predecessor = Some(index - 1);
                }
            }
            UpdateGraphMode::Replaces => {
                for (index, bundle) in members.iter().enumerate() {
                    if let Some(replaces) = bundle.replaces() {
                        match index_of(replaces) {
                            Some(p) => predecessors[index] = Some(p),
                            None => {
                                debug!(
                                    "{} replaces {}, which is not in channel {}",
                                    bundle, replaces, channel
                                );
                                unresolved.push((index, replaces.to_string()));
                            }
                        }
                    }
                    skips[index] = bundle
                        .skips()
                        .iter()
                        .filter_map(|s| index_of(s.as_str()))
                        .collect();
                    ranges[index] = bundle.skip_range().and_then(Result::ok);
                }
            }
        }

        Self {
            name: channel.to_string(),
            members,
            predecessors,
            skips,
            ranges,
            unresolved,
        }
    }

    /// Name of the channel.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bundles of the channel, sorted by version ascending.
    pub fn members(&self) -> &[&'r Bundle] {
        &self.members
    }

    /// The member `bundle` replaces, if it is in the channel.
    pub fn predecessor(&self, bundle: &Bundle) -> Option<&'r Bundle> {
        let index = self.index_of(bundle)?;
        self.predecessors[index].map(|p| self.members[p])
    }

    /// Predecessor references that name no member of the channel.
    pub fn unresolved_predecessors(&self) -> impl Iterator<Item = (&'r Bundle, &str)> + '_ {
        self.unresolved
            .iter()
            .map(|(index, name)| (self.members[*index], name.as_str()))
    }

    /// Members no other member supersedes.
    pub fn head_candidates(&self) -> Vec<&'r Bundle> {
        self.candidate_indices()
            .into_iter()
            .map(|i| self.members[i])
            .collect()
    }

    /// The head of the channel, if exactly one member is not superseded.
    pub fn head(&self) -> Option<&'r Bundle> {
        match self.candidate_indices().as_slice() {
            [only] => Some(self.members[*only]),
            _ => None,
        }
    }

    /// Cycles of predecessor edges, each in predecessor order.
    pub fn cycles(&self) -> Vec<Vec<&'r Bundle>> {
        self.cycle_indices()
            .into_iter()
            .map(|cycle| cycle.into_iter().map(|i| self.members[i]).collect())
            .collect()
    }

    /// Members that cannot be upgraded from to `head`.
    pub fn unreachable_from(&self, head: &Bundle) -> Vec<&'r Bundle> {
        let Some(start) = self.index_of(head) else {
            return self.members.clone();
        };
        let reached = self.reachable(start);
        self.members
            .iter()
            .zip(reached)
            .filter(|(_, reached)| !reached)
            .map(|(bundle, _)| *bundle)
            .collect()
    }

    /// Every violation of the channel, in the order they are determined:
    /// head, cycles, reachability.
    pub fn validate(&self, operator: &Operator) -> Vec<GraphError> {
        let mut errors = Vec::new();
        if self.members.is_empty() {
            return errors;
        }

        let candidates = self.candidate_indices();
        // With competing heads the newest one is followed, so the others
        // surface as unreachable.
        let head = match candidates.as_slice() {
            [] => {
                errors.push(GraphError::NoHead {
                    channel: self.name.clone(),
                });
                None
            }
            [only] => Some(*only),
            many => {
                errors.push(GraphError::MultipleHeads {
                    channel: self.name.clone(),
                    heads: many.iter().map(|&i| self.dir_name(i)).collect(),
                });
                many.last().copied()
            }
        };

        if let (Some(head), 1) = (head, candidates.len()) {
            if operator.default_channel() == Some(self.name.as_str()) {
                if let Some(latest) = operator.latest_bundle() {
                    if latest.id() != self.members[head].id() {
                        errors.push(GraphError::DefaultHeadNotLatest {
                            channel: self.name.clone(),
                            head: self.dir_name(head),
                            latest: latest.dir_name().to_string(),
                        });
                    }
                }
            }
        }

        let cycles = self.cycle_indices();
        for cycle in &cycles {
            errors.push(GraphError::Cycle {
                channel: self.name.clone(),
                members: cycle.iter().map(|&i| self.dir_name(i)).collect(),
            });
        }

        match head {
            Some(head) if cycles.is_empty() => {
                for (index, reached) in self.reachable(head).into_iter().enumerate() {
                    if !reached {
                        errors.push(GraphError::Unreachable {
                            channel: self.name.clone(),
                            bundle: self.dir_name(index),
                            head: self.dir_name(head),
                        });
                    }
                }
            }
            _ => {}
        }

        errors
    }

    fn index_of(&self, bundle: &Bundle) -> Option<usize> {
        self.members.iter().position(|b| b.id() == bundle.id())
    }

    fn dir_name(&self, index: usize) -> String {
        self.members[index].dir_name().to_string()
    }

    /// Whether member `by` supersedes member `target`.
    fn supersedes(&self, by: usize, target: usize) -> bool {
        self.predecessors[by] == Some(target)
            || self.skips[by].contains(&target)
            || self.ranges[by]
                .as_ref()
                .is_some_and(|range| range.contains(self.members[target].version()))
    }

    fn candidate_indices(&self) -> Vec<usize> {
        let count = self.members.len();
        (0..count)
            .filter(|&target| !(0..count).any(|by| by != target && self.supersedes(by, target)))
            .collect()
    }

    fn cycle_indices(&self) -> Vec<Vec<usize>> {
        let mut marks = vec![Mark::Unvisited; self.members.len()];
        let mut cycles = Vec::new();

        for start in 0..self.members.len() {
            let mut path = Vec::new();
            let mut current = Some(start);
            while let Some(index) = current {
                match marks[index] {
                    Mark::Unvisited => {
                        marks[index] = Mark::OnPath;
                        path.push(index);
                        current = self.predecessors[index];
                    }
                    Mark::OnPath => {
                        if let Some(pos) = path.iter().position(|&p| p == index) {
                            cycles.push(path[pos..].to_vec());
                        }
                        break;
                    }
                    Mark::Done => break,
                }
            }
            for index in path {
                marks[index] = Mark::Done;
            }
        }

        cycles
    }

    fn reachable(&self, head: usize) -> Vec<bool> {
        let mut reached = vec![false; self.members.len()];
        reached[head] = true;
        let mut queue = vec![head];
        while let Some(by) = queue.pop() {
            for target in 0..self.members.len() {
                if !reached[target] && self.supersedes(by, target) {
                    reached[target] = true;
                    queue.push(target);
                }
            }
        }
        reached
    }
}
