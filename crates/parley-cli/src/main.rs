//! Parley CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, info};

use parley::ParleyError;
use parley_cli::{Args, error_adapter::to_reportables};

fn init_logging(level: &str) {
    let level = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .init();
}

/// Print every diagnostic of `err` to stderr, whatever the log level.
fn report(err: &ParleyError) {
    let reporter = miette::GraphicalReportHandler::new();
    let reportables = to_reportables(err);

    for reportable in &reportables {
        let mut rendered = String::new();
        reporter
            .render_report(&mut rendered, reportable)
            .expect("Writing to String buffer is infallible");
        eprintln!("{rendered}");
    }

    if reportables.len() > 1 {
        eprintln!("{} problems found", reportables.len());
    }
}

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logging(&args.log_level);

    info!(version = env!("CARGO_PKG_VERSION"); "Starting Parley");
    debug!(args:?; "Parsed arguments");

    if let Err(err) = parley_cli::run(&args) {
        report(&err);
        process::exit(1);
    }

    info!("Completed successfully");
}
