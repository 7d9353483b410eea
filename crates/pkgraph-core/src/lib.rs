//! pkgraph-core library.
//!
//! Parses a Debian control-file package listing into an immutable in-memory
//! dependency graph and answers the two read queries the transport layer
//! exposes: a cursor-paginated listing of package names and a single-package
//! lookup with enriched forward/reverse dependency edges.
//!
//! # Conventions
//!
//! - **Errors**: fallible operations return [`error::Error`] (or
//!   `anyhow::Result` at I/O-adjacent seams).
//! - **Logging**: use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`,
//!   `trace!`). Lenient-mode degradations are `warn!`, never silent.
//! - **Mutation**: the graph is built once, synchronously, then treated as
//!   read-only. Queries take `&PackageGraph` and never lock.

pub mod config;
pub mod control;
pub mod error;
pub mod graph;

pub use config::{Config, ValidationMode};
pub use error::Error;
pub use graph::build::build_graph;
pub use graph::page::{Page, PageRequest, paginate};
pub use graph::query::{AlternativeRef, EnrichedEdge, PackageDetail, package_detail};
pub use graph::{Edge, EdgeKind, Node, PackageGraph};
