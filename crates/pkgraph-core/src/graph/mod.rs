//! The package dependency graph and its query layers.
//!
//! # Data model
//!
//! - [`Node`] — one package from the listing: unique `name` plus its
//!   normalized description.
//! - [`Edge`] — a directed relation stored in an adjacency list keyed by
//!   source name. The `target` may name a package the listing never
//!   describes (a *dangling* reference); those stay in the graph and are
//!   flagged at query time via `target_in_graph`.
//! - [`PackageGraph`] — the node table plus adjacency lists. Built once,
//!   synchronously, then read-only: queries borrow it freely with no
//!   locking.
//!
//! Forward edges (`Normal`, `Alternative`) are mirrored with reverse edges
//! (`Reversed`, `ReversedAlternative`) at build time so reverse-dependency
//! lookups are a plain adjacency read, not a scan.

pub mod build;
pub mod page;
pub mod query;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The four edge kinds, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    /// Plain forward dependency.
    Normal,
    /// Mirror of a plain dependency, stored under the target.
    Reversed,
    /// Forward dependency satisfiable by any member of a group; the edge
    /// points at the group's primary choice.
    Alternative,
    /// Mirror of an alternative-group membership, stored under each member.
    ReversedAlternative,
}

impl EdgeKind {
    /// Returns `true` for the forward kinds (`Normal`, `Alternative`).
    #[must_use]
    pub const fn is_forward(self) -> bool {
        matches!(self, Self::Normal | Self::Alternative)
    }
}

/// One package node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique package name (`Package` field, `Source` fallback).
    pub name: String,
    /// Normalized description: short summary, newline, long text.
    pub description: String,
}

/// A directed edge in some node's adjacency list. The source is implicit:
/// it is the adjacency-list key the edge is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Target package name; may be dangling.
    pub target: String,
    /// Edge kind.
    pub kind: EdgeKind,
    /// Sibling choices in the same alternative group, excluding `target`.
    /// Empty for `Normal`/`Reversed` edges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
}

impl Edge {
    /// Plain edge with no alternatives.
    #[must_use]
    pub fn new(target: impl Into<String>, kind: EdgeKind) -> Self {
        Self {
            target: target.into(),
            kind,
            alternatives: Vec::new(),
        }
    }
}

/// The immutable package graph: node table plus adjacency lists.
///
/// Adjacency lookups never fail: [`PackageGraph::edges_for`] returns an
/// empty slice for any name without an edge list, by contract rather than
/// by inserting default entries on read.
#[derive(Debug, Clone, Default)]
pub struct PackageGraph {
    /// name → node. Keys are unique; insert-or-overwrite during build.
    pub(crate) nodes: HashMap<String, Node>,
    /// name → ordered edge list. Names absent here simply have no edges.
    pub(crate) edges: HashMap<String, Vec<Edge>>,
}

impl PackageGraph {
    /// Look up a node by name.
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// Returns `true` if `name` is a described package (a real node, not
    /// merely an edge target).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// The edge list for `name`, or an empty slice if it has none.
    #[must_use]
    pub fn edges_for(&self, name: &str) -> &[Edge] {
        self.edges.get(name).map_or(&[], Vec::as_slice)
    }

    /// Number of described packages.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node names in ascending lexicographic order.
    ///
    /// This is the stable pagination universe. It is recomputed per call;
    /// the graph does not change during serving, so consistency with the
    /// live node set is free.
    #[must_use]
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Iterate all adjacency lists (used by the stats view).
    pub fn edge_lists(&self) -> impl Iterator<Item = (&str, &[Edge])> {
        self.edges
            .iter()
            .map(|(name, list)| (name.as_str(), list.as_slice()))
    }
}
