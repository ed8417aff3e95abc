//! Checker enablement resolution.
//!
//! When override mode is active a checker is enabled only if its code is
//! listed and the entry's tool and language constraints (when present) equal
//! the owning plugin's tool name and canonical language string exactly.
//! Everything else is disabled. When override mode is off the resolver is not
//! consulted and the plugin-assigned default stands.

use crate::models::{Checker, Language, Plugin};
use crate::overrides::OverrideTable;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of resolving one checker against an active table.
pub enum Verdict {
    Enabled,
    NotListed,
    ToolMismatch { expected: String },
    LanguageMismatch { expected: String },
}

impl Verdict {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Verdict::Enabled)
    }
}

/// Resolve with an explanation. Tool is checked before language.
pub fn explain(code: &str, tool_name: &str, language: &str, table: &OverrideTable) -> Verdict {
    let Some(scope) = table.lookup(code) else {
        return Verdict::NotListed;
    };
    if let Some(expected) = scope.tool.as_deref() {
        if expected != tool_name {
            return Verdict::ToolMismatch {
                expected: expected.to_string(),
            };
        }
    }
    if let Some(expected) = scope.language.as_deref() {
        if expected != language {
            return Verdict::LanguageMismatch {
                expected: expected.to_string(),
            };
        }
    }
    Verdict::Enabled
}

/// Whether the checker `code` of `tool_name`/`language` is enabled by `table`.
pub fn resolve(code: &str, tool_name: &str, language: &str, table: &OverrideTable) -> bool {
    explain(code, tool_name, language, table).is_enabled()
}

/// Resolve one checker of a plugin; `None` when override mode is off.
pub fn resolve_checker(
    checker: &Checker,
    tool_name: &str,
    language: Language,
    table: &OverrideTable,
) -> Option<bool> {
    if !table.is_active() {
        return None;
    }
    Some(resolve(&checker.code, tool_name, language.as_str(), table))
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
/// Identity of a checker within a run.
pub struct CheckerKey {
    pub tool: String,
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Per-run resolved active state of every checker.
///
/// Checker objects are never mutated by resolution; the execution stage
/// reads this map instead.
pub struct ActivationMap {
    states: BTreeMap<CheckerKey, bool>,
}

impl ActivationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, tool: &str, code: &str, active: bool) {
        self.states.insert(
            CheckerKey {
                tool: tool.to_string(),
                code: code.to_string(),
            },
            active,
        );
    }

    /// Resolved state, or `None` for an unknown checker.
    pub fn is_active(&self, tool: &str, code: &str) -> Option<bool> {
        self.states
            .get(&CheckerKey {
                tool: tool.to_string(),
                code: code.to_string(),
            })
            .copied()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.states.values().filter(|v| **v).count()
    }

    /// Entries ordered by tool, then code.
    pub fn iter(&self) -> impl Iterator<Item = (&CheckerKey, bool)> {
        self.states.iter().map(|(k, v)| (k, *v))
    }
}

/// Resolve every checker of `plugin` into `map`, in the plugin's order.
///
/// Returns the number of checkers whose state differs from the default.
pub fn resolve_plugin(plugin: &Plugin, table: &OverrideTable, map: &mut ActivationMap) -> usize {
    let tool = plugin.tool_name();
    let language = plugin.language();
    let mut changed = 0;
    for checker in &plugin.checkers {
        let active = resolve_checker(checker, tool, language, table).unwrap_or(checker.active);
        if active != checker.active {
            changed += 1;
        }
        map.set(tool, &checker.code, active);
    }
    changed
}
