//! Taxon CLI entry point.

use std::{io, process::ExitCode, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use taxon_cli::{Args, error_adapter::Report, selftest};

fn main() -> ExitCode {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logger(&args.log_level);

    info!(log_level = args.log_level.as_str(); "Starting Taxon");
    debug!(args:?; "Parsed arguments");

    if args.test {
        return self_test();
    }

    match taxon_cli::run(&args) {
        Ok(()) => {
            info!("Completed successfully");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", Report::from_error(&err).render());
            ExitCode::FAILURE
        }
    }
}

fn init_logger(level: &str) {
    let filter = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .init();
}

fn self_test() -> ExitCode {
    match selftest::run(&mut io::stdout().lock()) {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(err) => {
            error!(err:%; "Failed to write self-test report");
            ExitCode::FAILURE
        }
    }
}
