//! Command handlers. Each submodule owns one subcommand's args and logic.

pub mod list;
pub mod show;
pub mod stats;
