//! checkgate core library.
//!
//! This crate bootstraps the plugin set of a static-analysis run and decides,
//! per checker, whether it is active for the run.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `models`: Languages, checkers, plugins and the manifest schema.
//! - `plugin_source`: Populates the plugin list from manifests.
//! - `overrides`: The `CODE[:TOOL[:LANGUAGE]]` override table.
//! - `resolver`: Checker enablement resolution and the per-run activation map.
//! - `authority`: Checker config sync with a configuration authority.
//! - `extensions`: Supported file extensions of the loaded plugins.
//! - `notify`: User-facing notifications.
//! - `bootstrap`: Sequences the above for one run.
//! - `output`: Human/JSON printers.
//! - `logging`: Diagnostic logging setup.
//! - `error`: Error types.
pub mod authority;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod extensions;
pub mod logging;
pub mod models;
pub mod notify;
pub mod output;
pub mod overrides;
pub mod plugin_source;
pub mod resolver;

pub use bootstrap::{BootOutcome, BootReport, Bootstrap};
pub use overrides::{OverrideSpec, OverrideTable};
pub use resolver::{resolve, ActivationMap, Verdict};
