//! Plugin manifest schema: declares plugins and their checkers.
//!
//! ```toml
//! [[plugin]]
//! name = "pmd"
//! version = "6.0.1"
//! language = "java"
//! extensions = ["java"]
//!
//! [[plugin.checker]]
//! code = "E002"
//! name = "AvoidCatchingNPE"
//! severity = "major"
//! active = true
//! ```

use super::{Checker, Language, Plugin, PluginDescription};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;

static IDENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.\-]*$").expect("identifier regex is valid")
});

#[derive(Deserialize)]
/// Top-level manifest file.
pub struct Manifest {
    #[serde(default, rename = "plugin")]
    pub plugins: Vec<PluginEntry>,
}

#[derive(Deserialize)]
/// A `[[plugin]]` table.
pub struct PluginEntry {
    pub name: String,
    #[serde(default)]
    pub version: String,
    pub language: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default, rename = "checker")]
    pub checkers: Vec<CheckerEntry>,
}

#[derive(Deserialize)]
/// A `[[plugin.checker]]` table.
pub struct CheckerEntry {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_severity")]
    pub severity: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_severity() -> String {
    "major".to_string()
}

fn default_active() -> bool {
    true
}

/// Whether `s` is usable as a plugin name or checker code.
pub fn is_valid_ident(s: &str) -> bool {
    IDENT_RE.is_match(s)
}

impl PluginEntry {
    /// Validate the entry and convert it into a `Plugin`.
    ///
    /// Returns a human-readable reason on failure; the caller attaches the
    /// manifest path.
    pub fn into_plugin(self) -> Result<Plugin, String> {
        let name = self.name.trim().to_string();
        if !is_valid_ident(&name) {
            return Err(format!("invalid plugin name `{}`", self.name));
        }
        let mut seen = HashSet::new();
        let mut checkers = Vec::with_capacity(self.checkers.len());
        for c in self.checkers {
            let code = c.code.trim().to_string();
            if !is_valid_ident(&code) {
                return Err(format!("plugin `{name}`: invalid checker code `{}`", c.code));
            }
            if !seen.insert(code.clone()) {
                return Err(format!("plugin `{name}`: duplicate checker code `{code}`"));
            }
            checkers.push(Checker {
                name: if c.name.is_empty() { code.clone() } else { c.name },
                code,
                severity: c.severity,
                active: c.active,
            });
        }
        let extensions = self
            .extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Ok(Plugin {
            description: PluginDescription {
                name,
                version: self.version,
                language: Language::parse(&self.language),
                description: self.description,
                extensions,
            },
            checkers,
        })
    }
}
