//! Plugin population.
//!
//! A `PluginSource` fills a caller-owned list with the plugins of one run.
//! The shipped source reads TOML manifests matched by glob patterns; plugins
//! are declared, never dynamically loaded.

use crate::error::PluginInitError;
use crate::models::manifest::Manifest;
use crate::models::Plugin;
use glob::glob;
use log::debug;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Default manifest location, relative to the repository root.
pub const DEFAULT_PLUGIN_PATTERN: &str = "plugins/*.toml";

/// Supplies the ordered list of loaded plugins.
pub trait PluginSource {
    /// Appends plugins to `plugins` in load order.
    fn init(&self, plugins: &mut Vec<Plugin>) -> Result<(), PluginInitError>;
}

/// Reads plugin manifests matched by glob patterns under `root`.
pub struct ManifestPluginSource {
    root: PathBuf,
    patterns: Vec<String>,
}

impl ManifestPluginSource {
    pub fn new(root: impl Into<PathBuf>, patterns: Vec<String>) -> Self {
        Self {
            root: root.into(),
            patterns,
        }
    }

    /// Manifest files matched by the patterns, sorted and de-duplicated.
    pub fn manifest_paths(&self) -> Result<Vec<PathBuf>, PluginInitError> {
        let mut paths: Vec<PathBuf> = Vec::new();
        for pat in &self.patterns {
            let abs = if Path::new(pat).is_absolute() {
                PathBuf::from(pat)
            } else {
                self.root.join(pat)
            };
            let pattern = abs.to_string_lossy().to_string();
            let entries = glob(&pattern).map_err(|e| PluginInitError::BadPattern {
                pattern: pat.clone(),
                message: e.msg.to_string(),
            })?;
            for entry in entries.flatten() {
                if entry.is_file() {
                    paths.push(entry);
                }
            }
        }
        paths.sort();
        paths.dedup();
        Ok(paths)
    }
}

impl PluginSource for ManifestPluginSource {
    fn init(&self, plugins: &mut Vec<Plugin>) -> Result<(), PluginInitError> {
        let mut names: HashSet<String> = plugins
            .iter()
            .map(|p| p.tool_name().to_string())
            .collect();
        for path in self.manifest_paths()? {
            let text = fs::read_to_string(&path).map_err(|source| PluginInitError::Read {
                path: path.clone(),
                source,
            })?;
            let manifest: Manifest =
                toml::from_str(&text).map_err(|e| PluginInitError::Parse {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
            debug!(
                "event=manifest_read path={} plugins={}",
                path.display(),
                manifest.plugins.len()
            );
            for entry in manifest.plugins {
                let plugin = entry
                    .into_plugin()
                    .map_err(|message| PluginInitError::Invalid {
                        path: path.clone(),
                        message,
                    })?;
                if !names.insert(plugin.tool_name().to_string()) {
                    return Err(PluginInitError::DuplicatePlugin {
                        name: plugin.tool_name().to_string(),
                        path,
                    });
                }
                plugins.push(plugin);
            }
        }
        Ok(())
    }
}

/// In-memory plugin list.
#[derive(Debug, Clone, Default)]
pub struct StaticPluginSource {
    plugins: Vec<Plugin>,
}

impl StaticPluginSource {
    pub fn new(plugins: Vec<Plugin>) -> Self {
        Self { plugins }
    }
}

impl PluginSource for StaticPluginSource {
    fn init(&self, plugins: &mut Vec<Plugin>) -> Result<(), PluginInitError> {
        plugins.extend(self.plugins.iter().cloned());
        Ok(())
    }
}
