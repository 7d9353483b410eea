//! Listing retrieval: local status file with a remote example fallback.
//!
//! The core is agnostic to where the control-file text comes from; this
//! module implements the retrieval chain the service uses:
//!
//! 1. An explicit `--file` path — no fallback, a bad path is the caller's
//!    problem and fails loudly.
//! 2. The configured `status_file` (default `/var/lib/dpkg/status`).
//! 3. The configured `fallback_url`, fetched over HTTP.

use std::path::Path;

use anyhow::{Context, Result};
use pkgraph_core::Config;
use tracing::{info, warn};

/// Read an explicitly requested listing file. No fallback.
pub fn read_listing_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("reading package listing {}", path.display()))
}

/// Fetch the example listing from the configured URL.
fn fetch_listing_url(url: &str) -> Result<String> {
    info!(url, "fetching package listing");
    let body = ureq::get(url)
        .call()
        .with_context(|| format!("fetching package listing from {url}"))?
        .into_string()
        .context("reading package listing response body")?;
    Ok(body)
}

/// Load the listing text according to the retrieval chain.
///
/// An unreadable local status file is expected on non-Debian hosts, so it
/// only warns before the remote fallback is tried. A fallback failure is
/// fatal — there is nothing left to build the graph from.
pub fn load_listing(explicit: Option<&Path>, config: &Config) -> Result<String> {
    if let Some(path) = explicit {
        return read_listing_file(path);
    }

    match read_listing_file(&config.status_file) {
        Ok(text) => Ok(text),
        Err(err) => {
            warn!(
                path = %config.status_file.display(),
                error = %err,
                "could not read local status file, falling back to example listing"
            );
            fetch_listing_url(&config.fallback_url)
        }
    }
}
