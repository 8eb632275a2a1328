//! Dependency graph construction.
//!
//! The graph is built by draining a pending pool front to back. Each target
//! removed from the pool picks its dependencies from what is still pending,
//! so edges always point "forward" in consumption order.

use std::collections::{BTreeSet, HashMap, VecDeque};

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use rand::Rng;
use serde::Serialize;

use super::name::TargetName;

/// Upper bound (inclusive) on dependency draws per target.
pub const MAX_CHILDREN: usize = 4;

/// Insertion-ordered mapping from a target to its direct dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    entries: Vec<(TargetName, BTreeSet<TargetName>)>,
    index: HashMap<TargetName, usize>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        DependencyGraph::default()
    }

    /// Set the dependencies of `target`.
    ///
    /// A target that is already present keeps its position and has its
    /// dependency set replaced.
    pub fn insert(&mut self, target: TargetName, deps: BTreeSet<TargetName>) {
        match self.index.get(&target) {
            Some(&i) => self.entries[i].1 = deps,
            None => {
                self.index.insert(target.clone(), self.entries.len());
                self.entries.push((target, deps));
            }
        }
    }

    /// Direct dependencies of `target`, if it is a key.
    pub fn deps(&self, target: &TargetName) -> Option<&BTreeSet<TargetName>> {
        self.index.get(target).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, target: &TargetName) -> bool {
        self.index.contains_key(target)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&TargetName, &BTreeSet<TargetName>)> {
        self.entries.iter().map(|(t, d)| (t, d))
    }

    pub fn targets(&self) -> impl Iterator<Item = &TargetName> {
        self.entries.iter().map(|(t, _)| t)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of dependency edges.
    pub fn edge_count(&self) -> usize {
        self.entries.iter().map(|(_, d)| d.len()).sum()
    }

    /// Structural statistics for the graph.
    pub fn stats(&self) -> GraphStats {
        let mut graph: DiGraph<&TargetName, ()> = DiGraph::new();
        let nodes: HashMap<&TargetName, NodeIndex> = self
            .entries
            .iter()
            .map(|(t, _)| (t, graph.add_node(t)))
            .collect();

        for (target, deps) in &self.entries {
            let from = nodes[target];
            for dep in deps {
                // Generated graphs never dangle; hand-built ones may.
                if let Some(&to) = nodes.get(dep) {
                    graph.add_edge(from, to, ());
                }
            }
        }

        let roots = graph
            .node_indices()
            .filter(|&n| graph.neighbors_directed(n, Direction::Incoming).next().is_none())
            .count();
        let leaves = graph
            .node_indices()
            .filter(|&n| graph.neighbors_directed(n, Direction::Outgoing).next().is_none())
            .count();
        let max_fan_out = self.entries.iter().map(|(_, d)| d.len()).max().unwrap_or(0);

        GraphStats {
            targets: graph.node_count(),
            edges: graph.edge_count(),
            max_fan_out,
            roots,
            leaves,
            acyclic: !is_cyclic_directed(&graph),
        }
    }
}

/// Shape of a generated graph, reported alongside a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub targets: usize,
    pub edges: usize,
    pub max_fan_out: usize,
    /// Targets no other target depends on.
    pub roots: usize,
    /// Targets with no dependencies.
    pub leaves: usize,
    pub acyclic: bool,
}

/// Build a dependency graph over `targets`.
///
/// Targets are consumed in order. Each one draws a child count from
/// `0..=MAX_CHILDREN` and samples that many times, with replacement, from
/// the targets still pending; repeated picks collapse in the set.
pub fn build_graph<R: Rng + ?Sized>(targets: &[TargetName], rng: &mut R) -> DependencyGraph {
    let mut pending: VecDeque<TargetName> = targets.iter().cloned().collect();
    let mut graph = DependencyGraph::new();

    while let Some(parent) = pending.pop_front() {
        let children = rng.gen_range(0..=MAX_CHILDREN);
        let mut deps = BTreeSet::new();
        for _ in 0..children {
            if pending.is_empty() {
                break;
            }
            let pick = rng.gen_range(0..pending.len());
            deps.insert(pending[pick].clone());
        }
        tracing::trace!("{} -> {} deps", parent, deps.len());
        graph.insert(parent, deps);
    }

    graph
}
