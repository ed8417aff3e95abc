//! checkgate CLI binary entry point.
//! Resolves configuration, runs the bootstrap, prints the report, and owns
//! the process exit code.

use checkgate::authority::FileAuthority;
use checkgate::cli::{standalone_choice, Cli, Commands};
use checkgate::config::{self, CliArgs, OutputMode};
use checkgate::notify::{error_prefix, ConsoleNotifier};
use checkgate::plugin_source::ManifestPluginSource;
use checkgate::{logging, output, BootOutcome, Bootstrap, OverrideTable};
use clap::Parser;
use log::error;

const EXIT_OK: i32 = 0;
const EXIT_NO_PLUGINS: i32 = 1;
const EXIT_FAILURE: i32 = 2;

fn main() {
    let cli = Cli::parse();
    let code = match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            EXIT_OK
        }
        Commands::Resolve {
            common,
            enable,
            standalone,
            no_standalone,
            authority,
        } => {
            let args = CliArgs {
                enable,
                standalone: standalone_choice(standalone, no_standalone),
                authority,
                ..common.into_cli_args()
            };
            run(&args, false)
        }
        Commands::Plugins { common } => run(&common.into_cli_args(), true),
    };
    std::process::exit(code);
}

/// Run one bootstrap. `list_only` loads plugins standalone and ignores
/// overrides, so the report shows plugin defaults.
fn run(args: &CliArgs, list_only: bool) -> i32 {
    let env_level = std::env::var(logging::LOG_ENV).ok();
    let eff = match config::resolve_effective(args, env_level.as_deref()) {
        Ok(eff) => eff,
        Err(e) => {
            eprintln!("{} {}", error_prefix(true), e);
            return EXIT_FAILURE;
        }
    };
    let color = eff.output == OutputMode::Human;
    if let Err(e) = logging::init_logging(&eff.log_level) {
        eprintln!("{} {}", error_prefix(color), e);
        return EXIT_FAILURE;
    }

    let source = ManifestPluginSource::new(&eff.repo_root, eff.plugin_patterns.clone());
    let authority = eff.authority.as_ref().map(|p| FileAuthority::new(p));
    let overrides = if list_only {
        OverrideTable::inactive()
    } else {
        eff.overrides.clone()
    };
    let mut notifier = ConsoleNotifier::new(color, eff.output == OutputMode::Json);

    let mut boot = Bootstrap::new(&source, &mut notifier, &overrides);
    if let Some(a) = authority.as_ref() {
        boot = boot.with_authority(a);
    }
    let boot = boot.standalone(list_only || eff.standalone);

    match boot.run() {
        Ok(BootOutcome::Ready(report)) => {
            output::print_report(&report, eff.output);
            EXIT_OK
        }
        Ok(BootOutcome::NoPluginsFound) => EXIT_NO_PLUGINS,
        Err(e) => {
            error!("event=bootstrap status=error error={}", e);
            eprintln!("{} {}", error_prefix(color), e);
            EXIT_FAILURE
        }
    }
}
