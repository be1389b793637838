//! Shared CLI utilities.

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct OutputArgs {
    /// Maximum size of one comment in bytes (overrides the settings file)
    #[arg(short = 'm', long, value_name = "BYTES")]
    pub max_size: Option<usize>,

    /// Write comment-001.md, comment-002.md, ... into this directory
    #[arg(short = 'o', long, value_name = "DIR", conflicts_with = "json")]
    pub output_dir: Option<PathBuf>,

    /// Print the chunks as a JSON array
    #[arg(long)]
    pub json: bool,
}

/// Emit chunks in posting order.
pub fn emit_chunks(chunks: &[String], args: &OutputArgs) -> Result<()> {
    if let Some(dir) = &args.output_dir {
        let written = write_chunk_files(chunks, dir)?;
        eprintln!("Wrote {} comment(s) to {}", written.len(), dir.display());
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(chunks)?);
        return Ok(());
    }

    let total = chunks.len();
    for (idx, chunk) in chunks.iter().enumerate() {
        println!("<!-- comment {}/{} -->", idx + 1, total);
        println!("{chunk}");
    }
    Ok(())
}

pub fn write_chunk_files(chunks: &[String], dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed creating output directory: {}", dir.display()))?;

    let mut written = Vec::with_capacity(chunks.len());
    for (idx, chunk) in chunks.iter().enumerate() {
        let path = dir.join(format!("comment-{:03}.md", idx + 1));
        fs::write(&path, chunk)
            .with_context(|| format!("Failed writing comment: {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn chunk_files_are_numbered_in_order() {
        let tmp = TempDir::new().expect("tmp");
        let dir = tmp.path().join("out");
        let chunks = vec!["first".to_string(), "second".to_string()];

        let written = write_chunk_files(&chunks, &dir).expect("write");
        assert_eq!(
            written,
            vec![dir.join("comment-001.md"), dir.join("comment-002.md")]
        );
        assert_eq!(fs::read_to_string(&written[1]).expect("read"), "second");
    }
}
