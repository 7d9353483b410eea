//! `pkgr stats` — operator-facing summary of the built graph.

use std::collections::HashSet;
use std::io::Write as _;

use clap::Args;
use pkgraph_core::{EdgeKind, PackageGraph};
use serde::Serialize;

use crate::output::{self, OutputMode};

#[derive(Args, Debug)]
pub struct StatsArgs {}

/// Edge and node counts plus the dangling-reference tally.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub packages: usize,
    pub edges: usize,
    pub normal: usize,
    pub reversed: usize,
    pub alternative: usize,
    pub reversed_alternative: usize,
    /// Distinct names referenced as an edge target or alternative but never
    /// described by a record.
    pub dangling_targets: usize,
}

fn collect_stats(graph: &PackageGraph) -> GraphStats {
    let mut stats = GraphStats {
        packages: graph.node_count(),
        edges: 0,
        normal: 0,
        reversed: 0,
        alternative: 0,
        reversed_alternative: 0,
        dangling_targets: 0,
    };

    let mut dangling: HashSet<&str> = HashSet::new();
    for (_, list) in graph.edge_lists() {
        for edge in list {
            stats.edges += 1;
            match edge.kind {
                EdgeKind::Normal => stats.normal += 1,
                EdgeKind::Reversed => stats.reversed += 1,
                EdgeKind::Alternative => stats.alternative += 1,
                EdgeKind::ReversedAlternative => stats.reversed_alternative += 1,
            }
            for name in std::iter::once(&edge.target).chain(edge.alternatives.iter()) {
                if !graph.contains(name) {
                    dangling.insert(name.as_str());
                }
            }
        }
    }
    stats.dangling_targets = dangling.len();
    stats
}

pub fn run_stats(
    _args: &StatsArgs,
    graph: &PackageGraph,
    output: OutputMode,
) -> anyhow::Result<()> {
    let stats = collect_stats(graph);

    output::render_mode(
        output,
        &stats,
        |stats, w| {
            writeln!(
                w,
                "packages\t{}\nedges\t{}\ndangling\t{}",
                stats.packages, stats.edges, stats.dangling_targets
            )
        },
        |stats, w| {
            output::pretty_section(w, "graph")?;
            output::pretty_kv(w, "packages", stats.packages.to_string())?;
            output::pretty_kv(w, "edges", stats.edges.to_string())?;
            output::pretty_kv(w, "normal", stats.normal.to_string())?;
            output::pretty_kv(w, "reversed", stats.reversed.to_string())?;
            output::pretty_kv(w, "alternative", stats.alternative.to_string())?;
            output::pretty_kv(
                w,
                "rev-alt",
                stats.reversed_alternative.to_string(),
            )?;
            output::pretty_kv(w, "dangling", stats.dangling_targets.to_string())?;
            Ok(())
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkgraph_core::{ValidationMode, build_graph};

    #[test]
    fn counts_kinds_and_dangling_targets() {
        let graph = build_graph(
            "Package: a\nDescription: d\nDepends: b, c | d\n\nPackage: b\nDescription: d",
            ValidationMode::Lenient,
        )
        .expect("build");

        let stats = collect_stats(&graph);
        assert_eq!(stats.packages, 2);
        assert_eq!(stats.normal, 1);
        assert_eq!(stats.reversed, 1);
        assert_eq!(stats.alternative, 1);
        assert_eq!(stats.reversed_alternative, 2);
        // c and d are referenced but never described.
        assert_eq!(stats.dangling_targets, 2);
    }
}
