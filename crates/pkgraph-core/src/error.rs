//! Error taxonomy shared by the graph builder and the query layer.
//!
//! Three classes matter to callers and must stay distinguishable:
//!
//! - **Build** failures (`MissingRequiredField`) — only raised in strict
//!   validation mode; abort the whole build, no partial graph escapes.
//! - **Usage** errors (`ConflictingCursors`, `UnknownCursor`,
//!   `InvalidPageSize`) — the caller supplied bad pagination parameters and
//!   should fix the request, not retry it.
//! - **Not found** (`PackageNotFound`) — the lookup target is simply absent
//!   from the node table; dangling edge targets land here too.

use thiserror::Error as ThisError;

/// All failures the core can report to its transport-layer collaborator.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// A record lacked an identity (`Package`/`Source`) or `Description`
    /// field while building in strict mode.
    #[error("record is missing required field `{field}`: {record}")]
    MissingRequiredField {
        /// The field that failed to resolve.
        field: &'static str,
        /// A short excerpt of the offending record for diagnostics.
        record: String,
    },

    /// `after` and `before` cursors were supplied on the same request.
    #[error("using `before` and `after` at the same time is not allowed")]
    ConflictingCursors,

    /// A cursor named a package that is not a node in the graph.
    #[error("bad cursor: {0}")]
    UnknownCursor(String),

    /// Page size must be at least 1.
    #[error("page size should be at least 1, got {0}")]
    InvalidPageSize(usize),

    /// Single-package lookup targeted a name absent from the node table.
    #[error("package not found: {0}")]
    PackageNotFound(String),
}

impl Error {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingRequiredField { .. } => "E1001",
            Self::ConflictingCursors => "E2001",
            Self::UnknownCursor(_) => "E2002",
            Self::InvalidPageSize(_) => "E2003",
            Self::PackageNotFound(_) => "E3001",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::MissingRequiredField { .. } => {
                Some("Re-run in lenient mode to skip malformed records.")
            }
            Self::ConflictingCursors => Some("Supply either `--after` or `--before`, not both."),
            Self::UnknownCursor(_) => {
                Some("Cursors must be package names from a previous page response.")
            }
            Self::InvalidPageSize(_) => Some("Use a page size of 1 or more."),
            Self::PackageNotFound(_) => None,
        }
    }

    /// Returns `true` for the usage-error class (bad request parameters).
    #[must_use]
    pub const fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::ConflictingCursors | Self::UnknownCursor(_) | Self::InvalidPageSize(_)
        )
    }
}
