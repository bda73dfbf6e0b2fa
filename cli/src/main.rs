// CLI-specific lint overrides
#![allow(clippy::print_stdout, reason = "CLI tools print to stdout")]
#![allow(clippy::print_stderr, reason = "CLI tools print to stderr")]

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use color_eyre::eyre::Result;
use tracing_subscriber::filter::EnvFilter;

fn main() -> Result<()> {
    color_eyre::install()?;

    // Logs go to stderr so stdout stays machine readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Transaction(args) => commands::transaction::run(args, cli.json),
        Commands::Nested(args) => commands::nested::run(args, cli.json),
        Commands::Message(args) => commands::message::run(args, cli.json),
        Commands::Networks => commands::networks::run(cli.json),
    }
}
