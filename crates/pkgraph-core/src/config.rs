//! Configuration: listing location, pagination defaults, validation mode.
//!
//! Loaded from `pkgraph.toml` when present; every field has a default so an
//! absent or partial file still yields a usable config. CLI flags override
//! loaded values at the call site.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Where the real dpkg status listing lives on a Debian system.
const DEFAULT_STATUS_FILE: &str = "/var/lib/dpkg/status";

/// Public example listing used when no local status file is readable.
const DEFAULT_FALLBACK_URL: &str = "https://gist.githubusercontent.com/lauripiispanen/29735158335170c27297422a22b48caa/raw/61a0f1150f33a1f31510b8e3a70cbac970892b2f/status.real";

/// Required-field policy for the graph builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Warn and continue on records missing identity or description.
    /// Resilient against partially malformed real-world listings.
    #[default]
    Lenient,
    /// Abort the whole build on the first record missing a required field;
    /// no partial graph is exposed.
    Strict,
}

impl ValidationMode {
    /// Returns `true` for [`ValidationMode::Strict`].
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Top-level pkgraph configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Local control-file listing to read first.
    #[serde(default = "default_status_file")]
    pub status_file: PathBuf,

    /// Remote listing fetched when the local file cannot be read.
    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,

    /// Page size used by the listing query when the caller gives none.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Required-field policy for graph construction.
    #[serde(default)]
    pub mode: ValidationMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            status_file: default_status_file(),
            fallback_url: default_fallback_url(),
            page_size: default_page_size(),
            mode: ValidationMode::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or does not parse as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Load `pkgraph.toml` from `dir` if it exists, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Fails only when the file exists but cannot be read or parsed — a
    /// broken config should be fixed, not silently ignored.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let path = dir.join("pkgraph.toml");
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}

fn default_status_file() -> PathBuf {
    PathBuf::from(DEFAULT_STATUS_FILE)
}

fn default_fallback_url() -> String {
    DEFAULT_FALLBACK_URL.to_string()
}

const fn default_page_size() -> usize {
    100
}
