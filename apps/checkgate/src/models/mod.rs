//! Shared data models: languages, checkers and plugins.

pub mod manifest;

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
/// Analysis language a plugin targets.
///
/// The canonical string form (`Display`) is what override language
/// constraints are compared against.
pub enum Language {
    Java,
    C,
    Cpp,
    CSharp,
    JavaScript,
    Python,
    Go,
    Kotlin,
    All,
    Unknown,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Java => "JAVA",
            Language::C => "C",
            Language::Cpp => "CPP",
            Language::CSharp => "C_SHARP",
            Language::JavaScript => "JAVASCRIPT",
            Language::Python => "PYTHON",
            Language::Go => "GO",
            Language::Kotlin => "KOTLIN",
            Language::All => "ALL",
            Language::Unknown => "UNKNOWN",
        }
    }

    /// Lenient parse; unrecognised names map to `Unknown`.
    pub fn parse(s: &str) -> Language {
        match s.trim().to_ascii_lowercase().as_str() {
            "java" => Language::Java,
            "c" => Language::C,
            "cpp" | "c++" | "cxx" => Language::Cpp,
            "c_sharp" | "csharp" | "c#" | "cs" => Language::CSharp,
            "javascript" | "js" => Language::JavaScript,
            "python" | "py" => Language::Python,
            "go" | "golang" => Language::Go,
            "kotlin" | "kt" => Language::Kotlin,
            "all" => Language::All,
            _ => Language::Unknown,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A single analysis rule owned by a plugin.
pub struct Checker {
    pub code: String,
    pub name: String,
    pub severity: String,
    /// Plugin-assigned default; the authority sync may rewrite it.
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Identity and metadata of a loaded plugin.
pub struct PluginDescription {
    pub name: String,
    pub version: String,
    pub language: Language,
    pub description: String,
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One analysis tool's checkers for one language.
pub struct Plugin {
    pub description: PluginDescription,
    pub checkers: Vec<Checker>,
}

impl Plugin {
    pub fn tool_name(&self) -> &str {
        &self.description.name
    }

    pub fn language(&self) -> Language {
        self.description.language
    }

    pub fn checker_mut(&mut self, code: &str) -> Option<&mut Checker> {
        self.checkers.iter_mut().find(|c| c.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_parse_accepts_aliases() {
        assert_eq!(Language::parse("c++"), Language::Cpp);
        assert_eq!(Language::parse(" JS "), Language::JavaScript);
        assert_eq!(Language::parse("C#"), Language::CSharp);
        assert_eq!(Language::parse("cobol"), Language::Unknown);
    }

    #[test]
    fn canonical_form_round_trips_through_parse() {
        for lang in [
            Language::Java,
            Language::C,
            Language::Cpp,
            Language::CSharp,
            Language::JavaScript,
            Language::Python,
            Language::Go,
            Language::Kotlin,
            Language::All,
        ] {
            assert_eq!(Language::parse(&lang.to_string()), lang);
        }
    }

    #[test]
    fn language_serializes_as_canonical_string() {
        let v = serde_json::to_value(Language::CSharp).unwrap();
        assert_eq!(v, "C_SHARP");
    }
}
