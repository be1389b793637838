//! Render command implementation

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use super::utils::{emit_chunks, OutputArgs};
use crate::chunk::comment_chunks;
use crate::config::load_settings;
use crate::input::load_request;
use crate::render::render_or_error;

#[derive(Args)]
pub struct RenderArgs {
    /// Report request document (JSON, or YAML by extension)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Environment tag (overrides the request document and settings)
    #[arg(short, long, value_name = "ENV")]
    pub env: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn run(args: RenderArgs, config: Option<&Path>) -> Result<()> {
    let work_dir = std::env::current_dir()?;
    let settings = load_settings(&work_dir, config)?;

    let mut request = load_request(&args.input)?;
    if let Some(env) = args.env {
        request.env = Some(env);
    }

    let report = request.to_report(&settings.env, &settings.command);
    let body = render_or_error(&report);

    let max_size = args.output.max_size.unwrap_or(settings.max_comment_size);
    let chunks = comment_chunks(&body, max_size)?;
    tracing::debug!(kind = report.kind(), chunks = chunks.len(), "rendered report");

    emit_chunks(&chunks, &args.output)
}
