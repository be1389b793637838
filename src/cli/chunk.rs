//! Chunk command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::utils::{emit_chunks, OutputArgs};
use crate::chunk::comment_chunks;
use crate::config::load_settings;

#[derive(Args)]
pub struct ChunkArgs {
    /// Markdown file to split; reads stdin when omitted
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn run(args: ChunkArgs, config: Option<&Path>) -> Result<()> {
    let body = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed reading markdown: {}", path.display()))?,
        None => io::read_to_string(io::stdin())
            .context("Failed reading markdown from stdin")?,
    };

    let max_size = match args.output.max_size {
        Some(size) => size,
        None => load_settings(&std::env::current_dir()?, config)?.max_comment_size,
    };

    let chunks = comment_chunks(&body, max_size)?;
    emit_chunks(&chunks, &args.output)
}
