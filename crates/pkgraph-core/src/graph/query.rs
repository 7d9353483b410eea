//! Single-package lookup: forward/reverse partition plus graph-membership
//! enrichment.

use serde::Serialize;

use crate::error::Error;
use crate::graph::{Edge, EdgeKind, PackageGraph};

/// One alternative-group sibling, annotated with graph membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeRef {
    pub target: String,
    pub target_in_graph: bool,
}

/// An edge annotated with graph membership for its target and each of its
/// alternatives. Lets a consumer tell a dependency described in the dataset
/// apart from one that is merely referenced (dangling).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedEdge {
    pub target: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub target_in_graph: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<AlternativeRef>,
}

/// Full detail view for one package.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDetail {
    pub name: String,
    pub description: String,
    pub dependencies: Vec<EnrichedEdge>,
    pub reverse_dependencies: Vec<EnrichedEdge>,
}

fn enrich(graph: &PackageGraph, edge: &Edge) -> EnrichedEdge {
    EnrichedEdge {
        target: edge.target.clone(),
        kind: edge.kind,
        target_in_graph: graph.contains(&edge.target),
        alternatives: edge
            .alternatives
            .iter()
            .map(|name| AlternativeRef {
                target: name.clone(),
                target_in_graph: graph.contains(name),
            })
            .collect(),
    }
}

/// Look up one package and assemble its enriched dependency views.
///
/// The node's edge list is partitioned by kind: `Normal`/`Alternative`
/// become `dependencies`, `Reversed`/`ReversedAlternative` become
/// `reverse_dependencies`. Insertion order is preserved within each view.
///
/// # Errors
///
/// [`Error::PackageNotFound`] when `name` is not a node — including names
/// that appear only as dangling edge targets elsewhere in the graph.
pub fn package_detail(graph: &PackageGraph, name: &str) -> Result<PackageDetail, Error> {
    let node = graph
        .node(name)
        .ok_or_else(|| Error::PackageNotFound(name.to_string()))?;

    let edges = graph.edges_for(name);
    let (forward, reverse): (Vec<&Edge>, Vec<&Edge>) =
        edges.iter().partition(|edge| edge.kind.is_forward());

    Ok(PackageDetail {
        name: node.name.clone(),
        description: node.description.clone(),
        dependencies: forward.into_iter().map(|e| enrich(graph, e)).collect(),
        reverse_dependencies: reverse.into_iter().map(|e| enrich(graph, e)).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationMode;
    use crate::graph::build::build_graph;

    const LISTING: &str = "\
Package: editor
Description: an editor
Depends: libfoo (>= 1.0), spell-a | spell-b

Package: libfoo
Description: a library

Package: spell-a
Description: spell checker
";

    fn graph() -> PackageGraph {
        build_graph(LISTING, ValidationMode::Lenient).expect("fixture builds")
    }

    #[test]
    fn partitions_forward_and_reverse() {
        let graph = graph();
        let detail = package_detail(&graph, "libfoo").expect("found");
        assert!(detail.dependencies.is_empty());
        assert_eq!(detail.reverse_dependencies.len(), 1);
        assert_eq!(detail.reverse_dependencies[0].target, "editor");
        assert_eq!(detail.reverse_dependencies[0].kind, EdgeKind::Reversed);
    }

    #[test]
    fn annotates_graph_membership() {
        let graph = graph();
        let detail = package_detail(&graph, "editor").expect("found");

        let dep_libfoo = &detail.dependencies[0];
        assert!(dep_libfoo.target_in_graph);

        // spell-a is described, spell-b is only referenced.
        let alt = &detail.dependencies[1];
        assert_eq!(alt.kind, EdgeKind::Alternative);
        assert!(alt.target_in_graph);
        assert_eq!(alt.alternatives.len(), 1);
        assert_eq!(alt.alternatives[0].target, "spell-b");
        assert!(!alt.alternatives[0].target_in_graph);
    }

    #[test]
    fn dangling_target_is_not_found_as_a_node() {
        let graph = graph();
        // spell-b has reverse edges but is not a described package.
        let err = package_detail(&graph, "spell-b").expect_err("must be not found");
        assert_eq!(err, Error::PackageNotFound("spell-b".to_string()));
    }

    #[test]
    fn unknown_name_is_not_found() {
        let graph = graph();
        assert!(matches!(
            package_detail(&graph, "no-such"),
            Err(Error::PackageNotFound(_))
        ));
    }

    #[test]
    fn node_without_edges_yields_empty_views() {
        let graph = build_graph(
            "Package: lonely\nDescription: nothing depends on this",
            ValidationMode::Lenient,
        )
        .expect("build");
        let detail = package_detail(&graph, "lonely").expect("found");
        assert!(detail.dependencies.is_empty());
        assert!(detail.reverse_dependencies.is_empty());
    }

    #[test]
    fn json_shape_uses_camel_case_and_wire_kind_names() {
        let graph = graph();
        let detail = package_detail(&graph, "editor").expect("found");
        let json = serde_json::to_value(&detail).expect("serialize");

        assert!(json.get("reverseDependencies").is_some());
        let alt = &json["dependencies"][1];
        assert_eq!(alt["type"], "alternative");
        assert_eq!(alt["alternatives"][0]["targetInGraph"], false);
    }
}
