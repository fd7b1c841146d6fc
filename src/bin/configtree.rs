//! configtree CLI Binary
//!
//! Command-line interface for inspecting and editing configuration trees.

use clap::Parser;
use configtree::config::ConfigLoader;
use configtree::logging::init_logging;
use configtree::tooling::{Cli, CliContext};
use std::process;

fn run(cli: &Cli) -> anyhow::Result<String> {
    let mut config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    cli.apply_logging_overrides(&mut config);
    init_logging(Some(&config.logging))?;

    let mut context = CliContext::with_config(config, cli.tree.clone())?;
    Ok(context.execute(&cli.command)?)
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
