#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Mars Rover mission.

mod config;
mod input;
mod logging;
mod mission;
mod prompt;

use std::{io, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use mars_rover_core::WELCOME_BANNER;

use crate::prompt::{Prompter, DEFAULT_MAX_ATTEMPTS};

const DEFAULT_LOG_FILE: &str = "mars-rover.log";

/// Drive a rover across a bounded grid of obstacles.
#[derive(Debug, Parser)]
#[command(name = "mars-rover", version)]
struct Cli {
    /// TOML mission file with the terrain and rover start; prompts when omitted.
    #[arg(long, value_name = "FILE")]
    mission: Option<PathBuf>,
    /// Run one batch of M/L/R/S commands after setup, print the status and exit.
    #[arg(long, value_name = "BATCH")]
    commands: Option<String>,
    /// Attempts allowed for each prompt before giving up.
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_ATTEMPTS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    max_attempts: u32,
    /// Append the mission log to this file.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,
    /// Do not write a mission log file.
    #[arg(long, conflicts_with = "log_file")]
    no_log_file: bool,
}

/// Entry point for the Mars Rover command-line interface.
fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let log_file = (!cli.no_log_file).then_some(cli.log_file.as_path());
    logging::init(log_file)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock(), cli.max_attempts);
    prompter.say(WELCOME_BANNER)?;

    let (terrain, mut rover) = match &cli.mission {
        Some(path) => config::load(path)?.build()?,
        None => mission::setup(&mut prompter)?,
    };

    match cli.commands.as_deref() {
        Some(batch) => mission::run_once(batch, &mut rover, &terrain, &mut prompter),
        None => mission::run(&mut rover, &terrain, &mut prompter),
    }
}
