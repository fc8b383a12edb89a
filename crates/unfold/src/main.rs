//! unfold CLI - Outline and disclosure decorator.
//!
//! Provides commands for:
//! - `decorate`: Number headings, normalize accordions and tab sets, and
//!   open the containers around a fragment target
//! - `toc`: Print the table of contents of a page

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{DecorateArgs, TocArgs};
use output::Output;

/// unfold - Outline and disclosure decorator.
#[derive(Parser)]
#[command(name = "unfold", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decorate a page and write the resulting markup.
    Decorate(DecorateArgs),
    /// Print the table of contents of a page.
    Toc(TocArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let verbose = matches!(&cli.command, Commands::Decorate(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Decorate(args) => args.execute(),
        Commands::Toc(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
