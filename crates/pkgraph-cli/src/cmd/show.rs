//! `pkgr show` — single-package detail with enriched dependency views.

use std::io::Write as _;

use clap::Args;
use pkgraph_core::{EnrichedEdge, PackageDetail, PackageGraph, package_detail};

use crate::output::{self, OutputMode};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Package name to look up.
    pub name: String,
}

/// Marker appended to names that are only referenced, never described.
const DANGLING_MARK: &str = " (not in listing)";

fn write_edge_line(w: &mut dyn std::io::Write, edge: &EnrichedEdge) -> std::io::Result<()> {
    let mark = if edge.target_in_graph { "" } else { DANGLING_MARK };
    writeln!(w, "  {}{mark}", edge.target)?;
    for alt in &edge.alternatives {
        let mark = if alt.target_in_graph { "" } else { DANGLING_MARK };
        writeln!(w, "    | {}{mark}", alt.target)?;
    }
    Ok(())
}

fn write_pretty(detail: &PackageDetail, w: &mut dyn std::io::Write) -> std::io::Result<()> {
    output::pretty_section(w, &detail.name)?;
    let (short, long) = detail
        .description
        .split_once('\n')
        .unwrap_or((detail.description.as_str(), ""));
    writeln!(w, "{short}")?;
    if !long.is_empty() {
        writeln!(w, "\n{long}")?;
    }

    writeln!(w)?;
    output::pretty_section(w, &format!("dependencies ({})", detail.dependencies.len()))?;
    for edge in &detail.dependencies {
        write_edge_line(w, edge)?;
    }

    writeln!(w)?;
    output::pretty_section(
        w,
        &format!(
            "reverse dependencies ({})",
            detail.reverse_dependencies.len()
        ),
    )?;
    for edge in &detail.reverse_dependencies {
        write_edge_line(w, edge)?;
    }
    Ok(())
}

fn write_text(detail: &PackageDetail, w: &mut dyn std::io::Write) -> std::io::Result<()> {
    // One row per edge: direction, target, in-graph flag, alternatives.
    for edge in &detail.dependencies {
        writeln!(
            w,
            "dep\t{}\t{}\t{}",
            edge.target,
            edge.target_in_graph,
            edge.alternatives
                .iter()
                .map(|a| a.target.as_str())
                .collect::<Vec<_>>()
                .join("|")
        )?;
    }
    for edge in &detail.reverse_dependencies {
        writeln!(w, "rdep\t{}\t{}\t", edge.target, edge.target_in_graph)?;
    }
    Ok(())
}

pub fn run_show(args: &ShowArgs, graph: &PackageGraph, output: OutputMode) -> anyhow::Result<()> {
    let detail = package_detail(graph, &args.name)?;
    output::render_mode(output, &detail, write_text, write_pretty)
}
