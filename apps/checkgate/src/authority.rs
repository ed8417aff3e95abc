//! Checker configuration authority.
//!
//! Outside standalone mode a live authority may rewrite plugin defaults
//! (active state and severity) before overrides are resolved. The shipped
//! authority reads a TOML snapshot exported by the central server:
//!
//! ```toml
//! [[checker]]
//! tool = "pmd"
//! code = "E002"
//! active = false
//! severity = "critical"
//! ```
//!
//! The snapshot is read once, on the first sync, and reused for every plugin
//! of the run.

use crate::error::SyncError;
use crate::models::Plugin;
use log::debug;
use once_cell::unsync::OnceCell;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Source of centrally managed checker configuration.
pub trait ConfigAuthority {
    fn is_alive(&self) -> bool;

    /// Apply the authority's configuration to `plugin`'s checkers.
    fn sync_config(&self, plugin: &mut Plugin) -> Result<(), SyncError>;
}

#[derive(Deserialize)]
struct Snapshot {
    #[serde(default, rename = "checker")]
    checkers: Vec<SnapshotEntry>,
}

#[derive(Deserialize)]
struct SnapshotEntry {
    tool: String,
    code: String,
    active: Option<bool>,
    severity: Option<String>,
}

/// Authority backed by a snapshot file; alive when the file exists.
pub struct FileAuthority {
    path: PathBuf,
    snapshot: OnceCell<Snapshot>,
}

impl FileAuthority {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            snapshot: OnceCell::new(),
        }
    }

    fn snapshot(&self) -> Result<&Snapshot, SyncError> {
        self.snapshot.get_or_try_init(|| {
            debug!("event=snapshot_load path={}", self.path.display());
            self.load()
        })
    }

    fn load(&self) -> Result<Snapshot, SyncError> {
        let text = fs::read_to_string(&self.path).map_err(|source| SyncError::Read {
            path: self.path.clone(),
            source,
        })?;
        toml::from_str(&text).map_err(|e| SyncError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}

impl ConfigAuthority for FileAuthority {
    fn is_alive(&self) -> bool {
        self.snapshot.get().is_some() || self.path.is_file()
    }

    fn sync_config(&self, plugin: &mut Plugin) -> Result<(), SyncError> {
        let snapshot = self.snapshot()?;
        let tool = plugin.tool_name().to_string();
        for entry in snapshot.checkers.iter().filter(|e| e.tool == tool) {
            let Some(checker) = plugin.checker_mut(&entry.code) else {
                debug!(
                    "event=sync_skip tool={} code={} reason=unknown_checker",
                    tool, entry.code
                );
                continue;
            };
            if let Some(active) = entry.active {
                checker.active = active;
            }
            if let Some(severity) = &entry.severity {
                checker.severity = severity.clone();
            }
        }
        Ok(())
    }
}
