//! CLI argument parsing via `clap`.

use crate::config::CliArgs;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "checkgate",
    version,
    about = "Plugin bootstrap and checker selection for static analysis runs",
    long_about = "checkgate — loads analysis plugins from TOML manifests, syncs checker defaults with a configuration authority, and resolves which checkers are active for this run.\n\nConfiguration precedence: CLI > checkgate.toml > defaults.",
    after_help = "Examples:\n  checkgate resolve\n  checkgate resolve --enable E001 --enable E002:pmd --enable E003::java\n  checkgate resolve --standalone --output json\n  checkgate resolve --no-standalone --authority snapshot.toml\n  checkgate plugins --plugins 'tools/*.toml'",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current checkgate version.")]
    Version,
    /// Load plugins and resolve checker states
    #[command(
        about = "Resolve active checkers",
        long_about = "Load plugins, sync checker config unless standalone, and apply --enable overrides. With at least one override only the listed checkers stay active.",
        after_help = "Override syntax: CODE[:TOOL[:LANGUAGE]]; empty TOOL or LANGUAGE matches any.\nExit codes: 0 ok, 1 no plugins found, 2 configuration or load error."
    )]
    Resolve {
        #[command(flatten)]
        common: CommonArgs,
        #[arg(long = "enable", value_name = "SPEC", help = "Force a checker on: CODE[:TOOL[:LANGUAGE]] (repeatable)")]
        enable: Vec<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Do not consult the configuration authority")]
        standalone: bool,
        #[arg(
            long,
            action = clap::ArgAction::SetTrue,
            conflicts_with = "standalone",
            help = "Consult the authority even if checkgate.toml sets standalone = true"
        )]
        no_standalone: bool,
        #[arg(long, value_name = "PATH", help = "Authority snapshot file used for config sync")]
        authority: Option<String>,
    },
    /// List loaded plugins with default checker states
    #[command(
        about = "List plugins",
        long_about = "Load plugins in standalone mode without overrides and print their checkers and supported extensions."
    )]
    Plugins {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
/// Options shared by `resolve` and `plugins`.
pub struct CommonArgs {
    #[arg(long, help = "Repository root (default: current dir)")]
    pub repo_root: Option<String>,
    #[arg(long = "plugins", value_name = "GLOB", help = "Plugin manifest glob, relative to repo root (repeatable)")]
    pub plugins: Vec<String>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(long, help = "Log level: trace|debug|info|warn|error|off (default: warn)")]
    pub log_level: Option<String>,
}

/// Fold `--standalone`/`--no-standalone` into a tri-state; `None` defers to config.
pub fn standalone_choice(standalone: bool, no_standalone: bool) -> Option<bool> {
    match (standalone, no_standalone) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

impl CommonArgs {
    pub fn into_cli_args(self) -> CliArgs {
        CliArgs {
            repo_root: self.repo_root,
            plugins: self.plugins,
            output: self.output,
            log_level: self.log_level,
            ..CliArgs::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_enable_flags() {
        let cli = Cli::try_parse_from([
            "checkgate",
            "resolve",
            "--enable",
            "E001",
            "--enable",
            "E002:pmd",
            "--standalone",
            "--output",
            "json",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Resolve {
                common,
                enable,
                standalone,
                no_standalone,
                authority,
            } => {
                assert_eq!(enable, vec!["E001", "E002:pmd"]);
                assert!(standalone);
                assert!(!no_standalone);
                assert!(authority.is_none());
                assert_eq!(common.output.as_deref(), Some("json"));
            }
            _ => panic!("expected resolve"),
        }
    }

    #[test]
    fn no_standalone_flag_turns_config_standalone_off() {
        let cli = Cli::try_parse_from(["checkgate", "resolve", "--no-standalone"]).unwrap();
        match cli.cmd {
            Commands::Resolve {
                standalone,
                no_standalone,
                ..
            } => assert_eq!(standalone_choice(standalone, no_standalone), Some(false)),
            _ => panic!("expected resolve"),
        }
        assert_eq!(standalone_choice(false, false), None);
        assert_eq!(standalone_choice(true, false), Some(true));
        assert!(
            Cli::try_parse_from(["checkgate", "resolve", "--standalone", "--no-standalone"]).is_err()
        );
    }

    #[test]
    fn plugins_subcommand_accepts_globs() {
        let cli = Cli::try_parse_from([
            "checkgate",
            "plugins",
            "--plugins",
            "a/*.toml",
            "--plugins",
            "b/*.toml",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Plugins { common } => {
                let args = common.into_cli_args();
                assert_eq!(args.plugins, vec!["a/*.toml", "b/*.toml"]);
                assert!(args.enable.is_empty());
            }
            _ => panic!("expected plugins"),
        }
    }
}
