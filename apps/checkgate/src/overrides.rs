//! Command-line checker overrides.
//!
//! Users force checkers on with entries of the form `CODE[:TOOL[:LANGUAGE]]`.
//! An empty tool or language segment matches any tool or language. The table
//! is keyed by code in an ordered map, so callers never need to pre-sort.
//!
//! Only the `CODE[:TOOL[:LANGUAGE]]` parser trims surrounding whitespace.
//! Values handed to `from_parallel` are stored verbatim and compared exactly;
//! there only `""` is a wildcard.

use crate::error::OverrideError;
use crate::models::Language;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Optional tool/language scoping of one override entry. `None` is a wildcard.
pub struct Scope {
    pub tool: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One parsed `CODE[:TOOL[:LANGUAGE]]` entry.
pub struct OverrideSpec {
    pub code: String,
    pub scope: Scope,
}

fn trimmed_non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

fn wildcard_or_exact(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

impl OverrideSpec {
    /// Parse `CODE[:TOOL[:LANGUAGE]]`, trimming whitespace around segments.
    ///
    /// The language segment is normalised to its canonical form, so `java`
    /// and `JAVA` scope the same plugins. Unrecognised language names are kept
    /// verbatim and will simply never match.
    pub fn parse(s: &str) -> Result<Self, OverrideError> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() > 3 {
            return Err(OverrideError::BadSpec(s.to_string()));
        }
        let code = trimmed_non_empty(parts[0]).ok_or_else(|| OverrideError::BadSpec(s.to_string()))?;
        let tool = parts.get(1).and_then(|t| trimmed_non_empty(t));
        let language = parts.get(2).and_then(|l| trimmed_non_empty(l)).map(|l| {
            match Language::parse(&l) {
                Language::Unknown => l,
                lang => lang.to_string(),
            }
        });
        Ok(Self {
            code,
            scope: Scope { tool, language },
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Sparse override table plus the override-mode switch.
pub struct OverrideTable {
    active: bool,
    entries: BTreeMap<String, Scope>,
}

impl OverrideTable {
    /// Override mode off: every checker keeps its default state.
    pub fn inactive() -> Self {
        Self::default()
    }

    /// Override mode on with no entries: every checker is disabled.
    pub fn active_empty() -> Self {
        Self {
            active: true,
            entries: BTreeMap::new(),
        }
    }

    /// Build an active table from the three index-aligned CLI sequences.
    ///
    /// Only `""` in `tools`/`languages` is a wildcard; every other value,
    /// whitespace included, is stored verbatim. Input order does not matter;
    /// lengths must agree and codes must be unique and non-empty.
    pub fn from_parallel<S: AsRef<str>>(
        codes: &[S],
        tools: &[S],
        languages: &[S],
    ) -> Result<Self, OverrideError> {
        if codes.len() != tools.len() || codes.len() != languages.len() {
            return Err(OverrideError::LengthMismatch {
                codes: codes.len(),
                tools: tools.len(),
                languages: languages.len(),
            });
        }
        let mut table = Self::active_empty();
        for (i, code) in codes.iter().enumerate() {
            let code = code.as_ref();
            if code.is_empty() {
                return Err(OverrideError::EmptyCode { index: i });
            }
            let scope = Scope {
                tool: wildcard_or_exact(tools[i].as_ref()),
                language: wildcard_or_exact(languages[i].as_ref()),
            };
            table.insert(code.to_string(), scope)?;
        }
        Ok(table)
    }

    /// Build an active table from parsed entries.
    pub fn from_specs(specs: Vec<OverrideSpec>) -> Result<Self, OverrideError> {
        let mut table = Self::active_empty();
        for spec in specs {
            table.insert(spec.code, spec.scope)?;
        }
        Ok(table)
    }

    fn insert(&mut self, code: String, scope: Scope) -> Result<(), OverrideError> {
        if self.entries.contains_key(&code) {
            return Err(OverrideError::DuplicateCode(code));
        }
        self.entries.insert(code, scope);
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact lookup by checker code.
    pub fn lookup(&self, code: &str) -> Option<&Scope> {
        self.entries.get(code)
    }

    /// Entries in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scope)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_code_only() {
        let s = OverrideSpec::parse("E001").unwrap();
        assert_eq!(s.code, "E001");
        assert_eq!(s.scope, Scope::default());
    }

    #[test]
    fn parse_with_tool_and_language() {
        let s = OverrideSpec::parse("E002:pmd:java").unwrap();
        assert_eq!(s.scope.tool.as_deref(), Some("pmd"));
        assert_eq!(s.scope.language.as_deref(), Some("JAVA"));
    }

    #[test]
    fn parse_empty_tool_segment_is_wildcard() {
        let s = OverrideSpec::parse("E003::c++").unwrap();
        assert_eq!(s.scope.tool, None);
        assert_eq!(s.scope.language.as_deref(), Some("CPP"));
    }

    #[test]
    fn parse_keeps_unknown_language_verbatim() {
        let s = OverrideSpec::parse("E003::Cobol").unwrap();
        assert_eq!(s.scope.language.as_deref(), Some("Cobol"));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(OverrideSpec::parse("").is_err());
        assert!(OverrideSpec::parse(":pmd").is_err());
        assert!(OverrideSpec::parse("E1:a:b:c").is_err());
    }

    #[test]
    fn from_parallel_accepts_unsorted_codes() {
        let t = OverrideTable::from_parallel(&["E9", "E1"], &["", "pmd"], &["", ""]).unwrap();
        assert!(t.is_active());
        let codes: Vec<_> = t.iter().map(|(c, _)| c).collect();
        assert_eq!(codes, vec!["E1", "E9"]);
        assert_eq!(t.lookup("E1").unwrap().tool.as_deref(), Some("pmd"));
    }

    #[test]
    fn from_parallel_rejects_length_mismatch() {
        let err = OverrideTable::from_parallel(&["E1", "E2"], &[""], &["", ""]).unwrap_err();
        assert_eq!(
            err,
            OverrideError::LengthMismatch {
                codes: 2,
                tools: 1,
                languages: 2
            }
        );
    }

    #[test]
    fn from_parallel_rejects_duplicates_and_empty_codes() {
        let dup = OverrideTable::from_parallel(&["E1", "E1"], &["", "pmd"], &["", ""]);
        assert_eq!(dup.unwrap_err(), OverrideError::DuplicateCode("E1".into()));
        let empty = OverrideTable::from_parallel(&["E1", ""], &["", ""], &["", ""]);
        assert_eq!(empty.unwrap_err(), OverrideError::EmptyCode { index: 1 });
    }

    #[test]
    fn from_parallel_stores_values_verbatim() {
        let t = OverrideTable::from_parallel(&[" E3", "E1"], &[" ", " pmd"], &["", "java "])
            .unwrap();
        assert!(t.lookup("E3").is_none());
        assert_eq!(t.lookup(" E3").unwrap().tool.as_deref(), Some(" "));
        assert_eq!(t.lookup("E1").unwrap().tool.as_deref(), Some(" pmd"));
        assert_eq!(t.lookup("E1").unwrap().language.as_deref(), Some("java "));
    }

    #[test]
    fn inactive_table_is_not_active() {
        assert!(!OverrideTable::inactive().is_active());
        assert!(OverrideTable::active_empty().is_active());
    }
}
