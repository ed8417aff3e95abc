//! Configuration discovery and effective settings resolution.
//!
//! checkgate reads `checkgate.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config.
//! Defaults:
//! - `plugins`: `["plugins/*.toml"]`
//! - `standalone`: false
//! - `authority`: none (no config sync)
//! - `output`: `human`
//! - `log_level`: `warn`
//! - `checkers.enabled`: none; `checkers.specified_only`: false
//!
//! Overrides precedence: CLI > config file > defaults. CLI `--enable`
//! entries replace the config list instead of extending it. `--standalone`
//! and `--no-standalone` each beat the config's `standalone` value.

use crate::error::ConfigError;
use crate::overrides::{OverrideSpec, OverrideTable};
use crate::plugin_source::DEFAULT_PLUGIN_PATTERN;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_NAMES: [&str; 3] = ["checkgate.toml", "checkgate.yaml", "checkgate.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// `[checkers]` section.
pub struct CheckersCfg {
    /// Entries of the form `CODE[:TOOL[:LANGUAGE]]`.
    #[serde(default)]
    pub enabled: Option<Vec<String>>,
    /// Turn override mode on even when `enabled` is empty.
    pub specified_only: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
/// Root configuration loaded from `checkgate.toml|yaml`.
pub struct CheckgateConfig {
    pub plugins: Option<Vec<String>>,
    pub standalone: Option<bool>,
    pub authority: Option<String>,
    pub output: Option<String>,
    pub log_level: Option<String>,
    #[serde(default)]
    pub checkers: Option<CheckersCfg>,
}

#[derive(Debug, Default, Clone)]
/// Flags collected from the command line; `None` means "not given".
pub struct CliArgs {
    pub repo_root: Option<String>,
    pub plugins: Vec<String>,
    pub enable: Vec<String>,
    /// `Some(true)` for `--standalone`, `Some(false)` for `--no-standalone`.
    pub standalone: Option<bool>,
    pub authority: Option<String>,
    pub output: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(OutputMode::Human),
            "json" => Ok(OutputMode::Json),
            other => Err(ConfigError::Output(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_file: Option<PathBuf>,
    pub plugin_patterns: Vec<String>,
    pub standalone: bool,
    /// Snapshot path, resolved against `repo_root`.
    pub authority: Option<PathBuf>,
    pub output: OutputMode,
    pub log_level: String,
    pub overrides: OverrideTable,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `checkgate.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Path of the config file in `root`, if any. TOML wins over YAML.
pub fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_NAMES
        .iter()
        .map(|n| root.join(n))
        .find(|p| p.is_file())
}

/// Load `CheckgateConfig` from `root`; `Ok(None)` when no file exists.
pub fn load_config(root: &Path) -> Result<Option<CheckgateConfig>, ConfigError> {
    let Some(path) = find_config(root) else {
        return Ok(None);
    };
    let s = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let is_toml = path.extension().and_then(|e| e.to_str()) == Some("toml");
    let cfg = if is_toml {
        toml::from_str::<CheckgateConfig>(&s).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str::<CheckgateConfig>(&s).map_err(|e| e.to_string())
    };
    cfg.map(Some).map_err(|message| ConfigError::Parse { path, message })
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// `env_log_level` is the value of `CHECKGATE_LOG`, passed in so resolution
/// stays independent of process state.
pub fn resolve_effective(
    cli: &CliArgs,
    env_log_level: Option<&str>,
) -> Result<Effective, ConfigError> {
    let start = PathBuf::from(cli.repo_root.as_deref().unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let config_file = find_config(&repo_root);
    let cfg = load_config(&repo_root)?.unwrap_or_default();

    let plugin_patterns = if !cli.plugins.is_empty() {
        cli.plugins.clone()
    } else {
        cfg.plugins
            .clone()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_PLUGIN_PATTERN.to_string()])
    };

    let standalone = cli.standalone.or(cfg.standalone).unwrap_or(false);

    let authority = cli
        .authority
        .clone()
        .or(cfg.authority.clone())
        .map(|a| {
            let p = PathBuf::from(a);
            if p.is_absolute() {
                p
            } else {
                repo_root.join(p)
            }
        });

    let output = OutputMode::parse(
        cli.output
            .as_deref()
            .or(cfg.output.as_deref())
            .unwrap_or("human"),
    )?;

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| env_log_level.map(str::to_string))
        .or(cfg.log_level.clone())
        .unwrap_or_else(|| crate::logging::default_log_level().to_string());

    let checkers = cfg.checkers.unwrap_or_default();
    let entries: Vec<String> = if !cli.enable.is_empty() {
        cli.enable.clone()
    } else {
        checkers.enabled.unwrap_or_default()
    };
    let specified_only = checkers.specified_only.unwrap_or(false);
    let overrides = if entries.is_empty() && !specified_only {
        OverrideTable::inactive()
    } else {
        let specs = entries
            .iter()
            .map(|e| OverrideSpec::parse(e))
            .collect::<Result<Vec<_>, _>>()?;
        OverrideTable::from_specs(specs)?
    };

    Ok(Effective {
        repo_root,
        config_file,
        plugin_patterns,
        standalone,
        authority,
        output,
        log_level,
        overrides,
    })
}
