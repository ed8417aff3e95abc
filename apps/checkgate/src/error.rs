//! Error types for plugin loading, override parsing, config sync and config
//! discovery.
//!
//! `BootError` is the umbrella returned by the bootstrap; the binary maps any
//! of these to exit status 2. "No plugins found" is deliberately not an error
//! here: it is a terminal outcome (see `bootstrap::BootOutcome`).

use std::path::PathBuf;

/// Failures raised while populating the plugin list.
#[derive(Debug, thiserror::Error)]
pub enum PluginInitError {
    #[error("invalid plugin glob pattern `{pattern}`: {message}")]
    BadPattern { pattern: String, message: String },

    #[error("failed to read plugin manifest {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("plugin manifest {} is not valid TOML: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("plugin manifest {}: {message}", .path.display())]
    Invalid { path: PathBuf, message: String },

    #[error("plugin `{name}` is declared more than once (again in {})", .path.display())]
    DuplicatePlugin { name: String, path: PathBuf },
}

/// Malformed override input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OverrideError {
    #[error(
        "override sequences differ in length: {codes} codes, {tools} tool names, {languages} languages"
    )]
    LengthMismatch {
        codes: usize,
        tools: usize,
        languages: usize,
    },

    #[error("override entry #{index} has an empty checker code")]
    EmptyCode { index: usize },

    #[error("checker code `{0}` is listed more than once")]
    DuplicateCode(String),

    #[error("invalid override `{0}`: expected CODE[:TOOL[:LANGUAGE]]")]
    BadSpec(String),
}

/// Failures while synchronising checker configuration with the authority.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("failed to read authority snapshot {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("authority snapshot {} is not valid TOML: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

/// Failures while loading `checkgate.toml|yaml|yml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config {} is invalid: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("unsupported output mode `{0}`; expected human|json")]
    Output(String),

    #[error(transparent)]
    Override(#[from] OverrideError),
}

/// Any failure that aborts a bootstrap run.
#[derive(Debug, thiserror::Error)]
pub enum BootError {
    #[error(transparent)]
    PluginInit(#[from] PluginInitError),

    #[error("config sync failed for plugin `{plugin}`: {source}")]
    Sync {
        plugin: String,
        #[source]
        source: SyncError,
    },
}
