//! Cursor pagination over the sorted package-name universe.
//!
//! Cursors are literal boundary names used for exclusive-range paging:
//! `after` pages forward from strictly-greater names, `before` pages
//! backward from strictly-smaller names (the page itself stays in ascending
//! order). The response carries a `before`/`after` cursor only when there
//! really is something on that side of the page.

use serde::Serialize;

use crate::error::Error;
use crate::graph::PackageGraph;

/// Pagination parameters. At most one of `after`/`before` may be set.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    /// Page forward: names strictly greater than this cursor.
    pub after: Option<String>,
    /// Page backward: names strictly less than this cursor.
    pub before: Option<String>,
    /// Maximum number of names to return; must be at least 1.
    pub page_size: usize,
}

/// Response cursors. Absent on the side where the page touches the edge of
/// the universe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cursors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
}

/// One page of package names in ascending order, plus navigation cursors.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub packages: Vec<String>,
    pub cursors: Cursors,
}

/// Compute one page over the graph's sorted name universe.
///
/// # Errors
///
/// - [`Error::InvalidPageSize`] for a page size of 0.
/// - [`Error::ConflictingCursors`] when both cursors are supplied.
/// - [`Error::UnknownCursor`] when a cursor names no existing package —
///   cursors come from previous responses, so an unknown one is a caller
///   bug, not an empty result.
pub fn paginate(graph: &PackageGraph, request: &PageRequest) -> Result<Page, Error> {
    if request.page_size < 1 {
        return Err(Error::InvalidPageSize(request.page_size));
    }
    if request.after.is_some() && request.before.is_some() {
        return Err(Error::ConflictingCursors);
    }
    for cursor in [&request.after, &request.before].into_iter().flatten() {
        if !graph.contains(cursor) {
            return Err(Error::UnknownCursor(cursor.clone()));
        }
    }

    let names = graph.sorted_names();
    let page = window(&names, request);

    let universe_first = names.first().copied();
    let universe_last = names.last().copied();
    let cursors = Cursors {
        before: page
            .first()
            .copied()
            .filter(|&first| Some(first) != universe_first)
            .map(ToString::to_string),
        after: page
            .last()
            .copied()
            .filter(|&last| Some(last) != universe_last)
            .map(ToString::to_string),
    };

    Ok(Page {
        packages: page.iter().map(ToString::to_string).collect(),
        cursors,
    })
}

/// Select the page slice out of the sorted universe.
///
/// A window shorter than the page size is returned whole.
fn window<'n>(names: &'n [&'n str], request: &PageRequest) -> &'n [&'n str] {
    let n = request.page_size;

    if let Some(after) = request.after.as_deref() {
        let start = names.partition_point(|&name| name <= after);
        let end = names.len().min(start + n);
        return &names[start..end];
    }
    if let Some(before) = request.before.as_deref() {
        let end = names.partition_point(|&name| name < before);
        let start = end.saturating_sub(n);
        return &names[start..end];
    }
    &names[..names.len().min(n)]
}
