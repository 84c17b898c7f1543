//! porogen - command-line front end for the porous cube generator
//!
//! Usage:
//!   porogen run --pores 10 --radius 0.5 --models 3 -o out/
//!   porogen run --params batch.json
//!   porogen plan --params batch.json --json
//!   porogen sample --cube-size 1 --radius 0.05 --gap 0.01 --seed 42

mod args;
mod commands;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use args::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        LevelFilter::Debug
    } else if cli.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::Run {
            params,
            output,
            segments,
            ascii,
        } => commands::run(&params, output, segments, ascii),
        Commands::Plan { params, json } => commands::plan(&params, json),
        Commands::Sample { params } => commands::sample(&params),
    }
}
