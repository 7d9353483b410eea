//! `pkgr list` — cursor-paginated package name listing.

use std::io::Write as _;

use clap::Args;
use pkgraph_core::{Config, PackageGraph, PageRequest, paginate};

use crate::output::{self, OutputMode};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page forward: names strictly after this cursor.
    #[arg(long)]
    pub after: Option<String>,

    /// Page backward: names strictly before this cursor.
    #[arg(long)]
    pub before: Option<String>,

    /// Page size; defaults to the configured value.
    #[arg(short = 'n', long)]
    pub size: Option<usize>,
}

pub fn run_list(
    args: &ListArgs,
    graph: &PackageGraph,
    config: &Config,
    output: OutputMode,
) -> anyhow::Result<()> {
    let request = PageRequest {
        after: args.after.clone(),
        before: args.before.clone(),
        page_size: args.size.unwrap_or(config.page_size),
    };
    let page = paginate(graph, &request)?;

    output::render_mode(
        output,
        &page,
        |page, w| {
            for name in &page.packages {
                writeln!(w, "{name}")?;
            }
            Ok(())
        },
        |page, w| {
            output::pretty_section(w, &format!("packages ({})", page.packages.len()))?;
            for name in &page.packages {
                writeln!(w, "  {name}")?;
            }
            output::pretty_rule(w)?;
            if let Some(ref before) = page.cursors.before {
                output::pretty_kv(w, "prev", format!("--before {before}"))?;
            }
            if let Some(ref after) = page.cursors.after {
                output::pretty_kv(w, "next", format!("--after {after}"))?;
            }
            Ok(())
        },
    )
}
