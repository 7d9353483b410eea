//! Graph construction: one synchronous pass over the parsed records.
//!
//! For every record the builder registers a node and fans its `Depends`
//! entries out into adjacency-list edges, mirroring each forward edge with
//! a reverse edge under the target so reverse-dependency queries are reads,
//! not scans. Alternative groups (`a | b | c`) produce one `Alternative`
//! edge to the primary plus a `ReversedAlternative` edge back to the source
//! under every group member, primary included.
//!
//! After all records are processed a deduplication pass collapses edges
//! that share a target within one list, keeping the first occurrence in
//! insertion order and ignoring the edge kind. A node that ends up with
//! both a `Normal` and a `Reversed` edge to the same target (short cycles,
//! self-references) keeps only whichever landed first.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::config::ValidationMode;
use crate::control::{self, normalize_description};
use crate::error::Error;
use crate::graph::{Edge, EdgeKind, Node, PackageGraph};

/// Build the package graph from a raw control-file listing.
///
/// In [`ValidationMode::Strict`] any record missing an identity
/// (`Package`/`Source`) or a non-empty `Description` aborts the whole build
/// with [`Error::MissingRequiredField`]; no partial graph is returned. In
/// [`ValidationMode::Lenient`] such records are logged and the build
/// proceeds with whatever fields are available.
///
/// # Errors
///
/// `Error::MissingRequiredField` in strict mode only. Lenient builds never
/// fail.
pub fn build_graph(text: &str, mode: ValidationMode) -> Result<PackageGraph, Error> {
    let mut graph = PackageGraph::default();

    for block in control::split_records(text) {
        let fields = control::parse_record(block);
        add_record(&mut graph, &fields, mode)?;
    }
    dedup_edges(&mut graph.edges);

    debug!(
        nodes = graph.node_count(),
        adjacency_lists = graph.edges.len(),
        "package graph built"
    );
    Ok(graph)
}

/// Short single-line excerpt of a record for error and log context.
fn record_excerpt(fields: &HashMap<String, String>) -> String {
    let mut keys: Vec<&str> = fields.keys().map(String::as_str).collect();
    keys.sort_unstable();
    format!("record with fields [{}]", keys.join(", "))
}

/// Register one record's node and fan out its `Depends` edges.
fn add_record(
    graph: &mut PackageGraph,
    fields: &HashMap<String, String>,
    mode: ValidationMode,
) -> Result<(), Error> {
    let identity = fields
        .get("Package")
        .filter(|name| !name.is_empty())
        .or_else(|| fields.get("Source").filter(|name| !name.is_empty()));

    let Some(name) = identity else {
        if mode.is_strict() {
            return Err(Error::MissingRequiredField {
                field: "Package",
                record: record_excerpt(fields),
            });
        }
        // No identity means nothing to key the node on; the record cannot
        // be registered at all.
        warn!(record = %record_excerpt(fields), "record has no Package or Source field, skipping");
        return Ok(());
    };
    let name = name.clone();

    let description = match fields.get("Description").filter(|d| !d.is_empty()) {
        Some(raw) => normalize_description(raw),
        None => {
            if mode.is_strict() {
                return Err(Error::MissingRequiredField {
                    field: "Description",
                    record: record_excerpt(fields),
                });
            }
            warn!(package = %name, "record has no Description field, using empty description");
            String::new()
        }
    };

    graph.nodes.insert(
        name.clone(),
        Node {
            name: name.clone(),
            description,
        },
    );

    if let Some(depends) = fields.get("Depends").filter(|d| !d.is_empty()) {
        for entry in depends.split(',') {
            if entry.contains('|') {
                add_alternative_group(&mut graph.edges, &name, entry);
            } else {
                let target = strip_version_constraint(entry);
                graph
                    .edges
                    .entry(name.clone())
                    .or_default()
                    .push(Edge::new(target, EdgeKind::Normal));
                graph
                    .edges
                    .entry(target.to_string())
                    .or_default()
                    .push(Edge::new(name.clone(), EdgeKind::Reversed));
            }
        }
    }

    Ok(())
}

/// Fan one `a | b | c` group out into its forward and mirrored edges.
///
/// The forward `Alternative` edge points at the primary (first member) and
/// carries the remaining members as `alternatives`. Every member — primary
/// included — receives a `ReversedAlternative` edge back to the source,
/// carrying the group minus that member.
fn add_alternative_group(edges: &mut HashMap<String, Vec<Edge>>, source: &str, entry: &str) {
    let members: Vec<&str> = entry.split('|').map(strip_version_constraint).collect();
    let Some((&primary, siblings)) = members.split_first() else {
        return;
    };

    edges.entry(source.to_string()).or_default().push(Edge {
        target: primary.to_string(),
        kind: EdgeKind::Alternative,
        alternatives: siblings.iter().map(ToString::to_string).collect(),
    });

    for &member in &members {
        edges.entry(member.to_string()).or_default().push(Edge {
            target: source.to_string(),
            kind: EdgeKind::ReversedAlternative,
            alternatives: members
                .iter()
                .filter(|&&other| other != member)
                .map(ToString::to_string)
                .collect(),
        });
    }
}

/// `"foo (>= 1.2)"` → `"foo"`: drop the parenthesized version constraint
/// and surrounding whitespace.
fn strip_version_constraint(token: &str) -> &str {
    token.split('(').next().unwrap_or_default().trim()
}

/// Collapse duplicate edges per adjacency list: first occurrence by target
/// wins, later ones are dropped regardless of kind.
fn dedup_edges(edges: &mut HashMap<String, Vec<Edge>>) {
    for list in edges.values_mut() {
        let mut seen: HashSet<String> = HashSet::with_capacity(list.len());
        list.retain(|edge| seen.insert(edge.target.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges<'g>(graph: &'g PackageGraph, name: &str) -> &'g [Edge] {
        graph.edges_for(name)
    }

    #[test]
    fn plain_dependency_is_mirrored() {
        let graph = build_graph(
            "Package: a\nDescription: a pkg\nDepends: b",
            ValidationMode::Lenient,
        )
        .expect("lenient build");

        assert_eq!(
            edges(&graph, "a"),
            &[Edge::new("b", EdgeKind::Normal)],
        );
        assert_eq!(
            edges(&graph, "b"),
            &[Edge::new("a", EdgeKind::Reversed)],
        );
    }

    #[test]
    fn version_constraint_is_stripped() {
        assert_eq!(strip_version_constraint(" foo (>= 1.0) "), "foo");
        assert_eq!(strip_version_constraint("bar"), "bar");
    }

    #[test]
    fn source_field_is_identity_fallback() {
        let graph = build_graph(
            "Source: src-only\nDescription: built from source",
            ValidationMode::Strict,
        )
        .expect("strict build with Source fallback");
        assert!(graph.contains("src-only"));
    }

    #[test]
    fn strict_mode_rejects_missing_description() {
        let err = build_graph("Package: a", ValidationMode::Strict).expect_err("must fail");
        assert!(matches!(
            err,
            Error::MissingRequiredField {
                field: "Description",
                ..
            }
        ));
    }

    #[test]
    fn strict_failure_aborts_whole_build() {
        // First record is fine; second is broken. Strict mode must not
        // expose a graph containing only the first.
        let text = "Package: good\nDescription: ok\n\nPackage: bad";
        assert!(build_graph(text, ValidationMode::Strict).is_err());
    }

    #[test]
    fn lenient_mode_registers_record_without_description() {
        let graph = build_graph("Package: bare", ValidationMode::Lenient).expect("lenient build");
        let node = graph.node("bare").expect("registered");
        assert_eq!(node.description, "");
    }

    #[test]
    fn lenient_mode_skips_record_without_identity() {
        let graph =
            build_graph("Description: orphan text", ValidationMode::Lenient).expect("lenient");
        assert!(graph.is_empty());
    }

    #[test]
    fn alternative_group_fans_out() {
        let graph = build_graph(
            "Package: x\nDescription: d\nDepends: a | b | c",
            ValidationMode::Lenient,
        )
        .expect("build");

        let forward = edges(&graph, "x");
        assert_eq!(forward.len(), 1);
        assert_eq!(forward[0].target, "a");
        assert_eq!(forward[0].kind, EdgeKind::Alternative);
        assert_eq!(forward[0].alternatives, vec!["b", "c"]);

        for (member, others) in [("a", ["b", "c"]), ("b", ["a", "c"]), ("c", ["a", "b"])] {
            let list = edges(&graph, member);
            assert_eq!(list.len(), 1, "member {member}");
            assert_eq!(list[0].target, "x");
            assert_eq!(list[0].kind, EdgeKind::ReversedAlternative);
            assert_eq!(list[0].alternatives, others);
        }
    }

    #[test]
    fn mixed_depends_entry_splits_on_commas() {
        let graph = build_graph(
            "Package: x\nDescription: d\nDepends: plain (>= 2.0), alt1 | alt2",
            ValidationMode::Lenient,
        )
        .expect("build");

        let forward = edges(&graph, "x");
        assert_eq!(forward.len(), 2);
        assert_eq!(forward[0].target, "plain");
        assert_eq!(forward[0].kind, EdgeKind::Normal);
        assert_eq!(forward[1].target, "alt1");
        assert_eq!(forward[1].kind, EdgeKind::Alternative);
    }

    #[test]
    fn dedup_keeps_first_occurrence_regardless_of_kind() {
        // a depends on b and b depends on a: b's list gets a Reversed edge
        // to a first, then a Normal edge to a. First one wins.
        let text = "Package: a\nDescription: d\nDepends: b\n\nPackage: b\nDescription: d\nDepends: a";
        let graph = build_graph(text, ValidationMode::Lenient).expect("build");

        let b_edges = edges(&graph, "b");
        assert_eq!(b_edges.len(), 1);
        assert_eq!(b_edges[0].target, "a");
        assert_eq!(b_edges[0].kind, EdgeKind::Reversed);
    }

    #[test]
    fn duplicate_plain_dependencies_collapse() {
        let graph = build_graph(
            "Package: x\nDescription: d\nDepends: dup, dup (>= 1.0)",
            ValidationMode::Lenient,
        )
        .expect("build");
        assert_eq!(edges(&graph, "x").len(), 1);
    }

    #[test]
    fn later_record_overwrites_node_by_name() {
        let text = "Package: p\nDescription: first\n\nPackage: p\nDescription: second";
        let graph = build_graph(text, ValidationMode::Lenient).expect("build");
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node("p").expect("node").description, "second\n");
    }

    #[test]
    fn empty_depends_value_adds_no_edges() {
        let graph = build_graph(
            "Package: solo\nDescription: no deps",
            ValidationMode::Lenient,
        )
        .expect("build");
        assert!(edges(&graph, "solo").is_empty());
    }
}
