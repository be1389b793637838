//! Splitting rendered comments into postable pieces.

use thiserror::Error;

pub mod comment_chunker;
pub mod fence;

pub use comment_chunker::{reassemble, CommentChunk, CommentChunker};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    #[error("maximum comment size must be greater than zero")]
    InvalidMaxSize,
}

/// Split `body` into comment bodies of at most `max_size` bytes, in posting order.
pub fn comment_chunks(body: &str, max_size: usize) -> Result<Vec<String>, ChunkError> {
    let chunks = CommentChunker::new(max_size)?.chunk(body);
    log_chunk_stats(&chunks, max_size);
    Ok(chunks.into_iter().map(|c| c.body).collect())
}

pub fn log_chunk_stats(chunks: &[CommentChunk], max_size: usize) {
    let largest = chunks.iter().map(|c| c.body.len()).max().unwrap_or(0);
    let reopened = chunks.iter().filter(|c| c.reopened_fence).count();
    tracing::debug!(
        chunks = chunks.len(),
        largest,
        reopened_fences = reopened,
        max_size,
        "split comment body"
    );
    if largest > max_size {
        tracing::debug!("a chunk exceeds {max_size} bytes to keep a line or fence intact");
    }
}
