//! Culprit CLI: spectrum-based fault localization
//!
//! ## Usage
//!
//! ```bash
//! culprit localize -m matrix.txt -s spectra.txt -t ochiai      # Rank every element
//! culprit localize -m matrix.txt -s spectra.txt -t dstar2 -n 10
//! culprit diagnose -m matrix.txt --format json                 # Matrix statistics
//! culprit techniques                                           # List formulas
//! ```

use clap::Parser;
use culprit_cli::{
    handlers::{execute_diagnose, execute_localize, execute_techniques},
    init_tracing, Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(&config);

    match cli.command {
        Commands::Localize(args) => execute_localize(&config, &args),
        Commands::Diagnose(args) => execute_diagnose(&config, &args),
        Commands::Techniques => {
            execute_techniques();
            Ok(())
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.into();
    CliConfig::new().with_verbosity(verbosity).with_color(color)
}
