//! Supported source file extensions, collected from loaded plugins.

use crate::models::Plugin;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
/// Extension (lowercase, no dot) to the plugins that analyse it.
pub struct ExtensionRegistry {
    by_extension: BTreeMap<String, BTreeSet<String>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, plugin: &Plugin) {
        for ext in &plugin.description.extensions {
            self.by_extension
                .entry(ext.to_ascii_lowercase())
                .or_default()
                .insert(plugin.tool_name().to_string());
        }
    }

    pub fn from_plugins(plugins: &[Plugin]) -> Self {
        let mut reg = Self::new();
        for p in plugins {
            reg.register(p);
        }
        reg
    }

    pub fn plugins_for(&self, ext: &str) -> Vec<&str> {
        let key = ext.trim_start_matches('.').to_ascii_lowercase();
        self.by_extension
            .get(&key)
            .map(|s| s.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.by_extension.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.by_extension.is_empty()
    }
}
