//! Task dependency graph for pipelines
//!
//! Nodes are pipeline task names; a directed edge records "this task
//! depends on that one" together with the signal it came from. The graph
//! is descriptive, built fresh per document for visualization and task
//! lookup: no cycle rejection, no topological sort. A pipeline with a
//! cyclic `runAfter` chain still produces its complete graph, since
//! validating it is the cluster's job.
//!
//! Uses petgraph for graph storage and neighbor queries.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use super::pipeline::PipelineTask;

/// Which signal produced an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeProvenance {
    /// Listed in the dependent task's `runAfter`
    Explicit,
    /// The dependent task consumes a resource the other task produces
    Resource,
}

impl EdgeProvenance {
    /// Returns a display label for the edge source
    pub fn label(&self) -> &'static str {
        match self {
            EdgeProvenance::Explicit => "runAfter",
            EdgeProvenance::Resource => "resource",
        }
    }
}

/// A directed dependency: `from` depends on `to`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub provenance: EdgeProvenance,
}

/// A `runAfter` reference to a task that does not exist in the pipeline
///
/// Kept for diagnostic display only; never part of the closed node/edge
/// set that layout and neighbor queries operate on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GhostRef {
    /// Task naming the missing predecessor
    pub task: String,

    /// The name that did not resolve
    pub missing: String,
}

/// Dependency graph of one pipeline's task list
#[derive(Debug, Default)]
pub struct TaskGraph {
    /// Underlying directed graph; edge direction is dependent -> predecessor
    graph: DiGraph<String, EdgeProvenance>,

    /// Map from task name to node index
    node_map: HashMap<String, NodeIndex>,

    /// Unresolvable `runAfter` references, in discovery order
    ghosts: Vec<GhostRef>,
}

impl TaskGraph {
    /// Builds the graph for a pipeline's task list
    ///
    /// Explicit and resource-flow edges are computed independently over
    /// the full task list, then merged; a pair covered by both keeps the
    /// explicit provenance. Edge enumeration order is a pure function of
    /// task order and, within a task, `runAfter` then input order.
    pub fn from_tasks(tasks: &[PipelineTask]) -> Self {
        let mut result = Self::default();

        // First pass: every task is a node, even with no edges at all
        for task in tasks {
            result.add_node(&task.name);
        }

        let merged = merge(explicit_edges(tasks), resource_edges(tasks));

        for edge in merged {
            match (result.node_map.get(&edge.from), result.node_map.get(&edge.to)) {
                (Some(&from_idx), Some(&to_idx)) => {
                    result.graph.add_edge(from_idx, to_idx, edge.provenance);
                }
                _ => {
                    // Only `runAfter` can point outside the task list;
                    // resource edges resolve producers among the tasks.
                    result.ghosts.push(GhostRef {
                        task: edge.from,
                        missing: edge.to,
                    });
                }
            }
        }

        result
    }

    fn add_node(&mut self, name: &str) {
        if !self.node_map.contains_key(name) {
            let idx = self.graph.add_node(name.to_string());
            self.node_map.insert(name.to_string(), idx);
        }
    }

    /// Task names in declaration order
    pub fn node_names(&self) -> Vec<String> {
        self.graph.node_weights().cloned().collect()
    }

    /// All edges, in deterministic construction order
    pub fn edges(&self) -> Vec<Edge> {
        self.graph
            .edge_references()
            .map(|e| Edge {
                from: self.graph[e.source()].clone(),
                to: self.graph[e.target()].clone(),
                provenance: *e.weight(),
            })
            .collect()
    }

    /// Unresolvable `runAfter` references, for diagnostics
    pub fn ghosts(&self) -> &[GhostRef] {
        &self.ghosts
    }

    /// Direct predecessors of a task (what it depends on)
    pub fn dependencies(&self, name: &str) -> Vec<String> {
        let idx = match self.node_map.get(name) {
            Some(idx) => *idx,
            None => return vec![],
        };

        self.graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .map(|n| self.graph[n].clone())
            .collect()
    }

    /// Direct dependents of a task (what depends on it)
    pub fn dependents(&self, name: &str) -> Vec<String> {
        let idx = match self.node_map.get(name) {
            Some(idx) => *idx,
            None => return vec![],
        };

        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .map(|n| self.graph[n].clone())
            .collect()
    }

    /// Returns true if the graph contains the task
    pub fn contains(&self, name: &str) -> bool {
        self.node_map.contains_key(name)
    }

    /// Number of tasks in the graph
    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    /// Returns true when the graph has no tasks
    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }
}

/// An unlabelled (dependent, predecessor) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct EdgePair {
    from: String,
    to: String,
}

/// One pair per `runAfter` entry, in task then entry order
///
/// Pairs naming tasks outside the list are included; the graph builder
/// turns those into ghosts.
fn explicit_edges(tasks: &[PipelineTask]) -> Vec<EdgePair> {
    let mut pairs = Vec::new();
    for task in tasks {
        for predecessor in &task.run_after {
            pairs.push(EdgePair {
                from: task.name.clone(),
                to: predecessor.clone(),
            });
        }
    }
    pairs
}

/// One pair per (input binding, producing task), in task then input order
///
/// Document order of producer vs consumer is irrelevant: producers are
/// indexed over the whole list first. A resource no task produces yields
/// no pair, since it may be supplied externally as a pipeline resource.
fn resource_edges(tasks: &[PipelineTask]) -> Vec<EdgePair> {
    let mut producers: HashMap<&str, Vec<&str>> = HashMap::new();
    for task in tasks {
        for out in &task.resources.outputs {
            producers
                .entry(out.resource.as_str())
                .or_default()
                .push(task.name.as_str());
        }
    }

    let mut pairs = Vec::new();
    for task in tasks {
        for input in &task.resources.inputs {
            let Some(producing) = producers.get(input.resource.as_str()) else {
                continue;
            };
            for producer in producing {
                // A task feeding itself is not an ordering signal
                if *producer == task.name {
                    continue;
                }
                pairs.push(EdgePair {
                    from: task.name.clone(),
                    to: (*producer).to_string(),
                });
            }
        }
    }
    pairs
}

/// Merges the two edge sources, deduplicating by pair
///
/// Explicit provenance wins when both sources cover the same pair. Both
/// inputs are fully computed before this runs; the suppression is a
/// labeling decision, not a shortcut.
fn merge(explicit: Vec<EdgePair>, resource: Vec<EdgePair>) -> Vec<Edge> {
    let mut seen: HashSet<EdgePair> = HashSet::new();
    let mut edges = Vec::new();

    for (pairs, provenance) in [
        (explicit, EdgeProvenance::Explicit),
        (resource, EdgeProvenance::Resource),
    ] {
        for pair in pairs {
            if seen.insert(pair.clone()) {
                edges.push(Edge {
                    from: pair.from,
                    to: pair.to,
                    provenance,
                });
            }
        }
    }

    edges
}
