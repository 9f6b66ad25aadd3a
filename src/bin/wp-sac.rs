//! wp-sac CLI Binary
//!
//! Converts a WordPress export into SacItem JSON files.

use anyhow::Context;
use clap::Parser;
use std::process;
use wp_sac::logging::init_logging;
use wp_sac::tooling::cli::{Cli, CliContext};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let context = CliContext::new(cli.config.clone()).context("loading configuration")?;
    let logging = cli.logging_config(&context.config().logging);
    init_logging(Some(&logging)).context("initializing logging")?;

    let output = context.execute(&cli.command)?;
    println!("{}", output);
    Ok(())
}
