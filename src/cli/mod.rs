//! Command-line interface for pr-comments
//!
//! Provides `render` and `chunk` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod chunk;
mod render;
mod utils;

/// Render cluster reports as pull-request comments sized for the hosting API
#[derive(Parser)]
#[command(name = "pr-comments")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (TOML or YAML); discovered in the working directory when omitted
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a report request into comment chunks
    Render(render::RenderArgs),

    /// Split an existing markdown body into comment chunks
    Chunk(chunk::ChunkArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Render(args) => render::run(args, cli.config.as_deref()),
        Commands::Chunk(args) => chunk::run(args, cli.config.as_deref()),
    }
}
