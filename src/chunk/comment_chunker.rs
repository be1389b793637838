//! Size-bounded, fence-aware splitting of a comment body.

use crate::chunk::fence::{FenceState, FENCE_CLOSER};
use crate::chunk::ChunkError;

/// One comment's worth of markdown, plus where it came from in the source body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentChunk {
    pub body: String,
    /// 1-based source lines covered by this chunk (inclusive).
    pub start_line: usize,
    pub end_line: usize,
    /// Body starts with a re-emitted fence opener that is not part of the source.
    pub reopened_fence: bool,
    /// Body ends with a fence closer that is not part of the source.
    pub closed_fence: bool,
    /// The last source line was cut and continues at the start of the next chunk.
    pub continues_line: bool,
}

/// Splits markdown into pieces of at most `max_size` bytes.
///
/// Lines are kept whole whenever possible. A line outside a fenced code block
/// may be cut to fill a partially used chunk; a line inside one never is.
/// When a chunk has to end inside a fence it is closed with a synthetic
/// closer and the next chunk starts by repeating the opener, so every chunk
/// renders on its own. A chunk never ends on a bare fence opener.
///
/// A line longer than `max_size` always gets a chunk of its own (with the
/// fence markers around it when it sits inside a block). Otherwise the bound
/// is exceeded only when a line that fits spills into a chunk that still had
/// room, or by the width of the synthetic fence markers.
#[derive(Debug, Clone, Copy)]
pub struct CommentChunker {
    max_size: usize,
}

impl CommentChunker {
    pub fn new(max_size: usize) -> Result<Self, ChunkError> {
        if max_size == 0 {
            return Err(ChunkError::InvalidMaxSize);
        }
        Ok(Self { max_size })
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn chunk(&self, body: &str) -> Vec<CommentChunk> {
        if body.is_empty() {
            return Vec::new();
        }

        let mut cursor = Cursor::new(self.max_size);
        for (idx, line) in body.split('\n').enumerate() {
            cursor.push_line(idx + 1, line);
        }
        cursor.finish()
    }
}

struct Pending {
    body: String,
    start_line: usize,
    end_line: usize,
    /// Byte offset of the separator before a fence opener that is the last
    /// line of the body; `Some(0)` when nothing worth keeping precedes it.
    trailing_opener: Option<usize>,
    reopened_fence: bool,
}

impl Pending {
    fn new(line_no: usize, text: &str) -> Self {
        Self {
            body: text.to_string(),
            start_line: line_no,
            end_line: line_no,
            trailing_opener: None,
            reopened_fence: false,
        }
    }

    fn append(&mut self, line_no: usize, text: &str) {
        self.body.push('\n');
        self.body.push_str(text);
        self.end_line = line_no;
        self.trailing_opener = None;
    }

    fn drop_trailing_opener(&mut self, at: usize) {
        self.body.truncate(at);
        self.end_line -= 1;
        self.trailing_opener = None;
    }

    fn into_chunk(self, closed_fence: bool, continues_line: bool) -> CommentChunk {
        CommentChunk {
            body: self.body,
            start_line: self.start_line,
            end_line: self.end_line,
            reopened_fence: self.reopened_fence,
            closed_fence,
            continues_line,
        }
    }
}

struct Cursor {
    max_size: usize,
    fence: FenceState,
    current: Option<Pending>,
    chunks: Vec<CommentChunk>,
}

impl Cursor {
    fn new(max_size: usize) -> Self {
        Self {
            max_size,
            fence: FenceState::default(),
            current: None,
            chunks: Vec::new(),
        }
    }

    fn push_line(&mut self, line_no: usize, line: &str) {
        let inside_fence = self.fence.is_open();
        let is_delimiter = self.fence.observe(line);
        let opens_fence = is_delimiter && !inside_fence;
        let oversized = line.len() > self.max_size;
        let mut rest = line;

        loop {
            let Some(current) = self.current.as_mut() else {
                let mut next = Pending::new(line_no, rest);
                if opens_fence {
                    next.trailing_opener = Some(0);
                }
                self.current = Some(next);
                return;
            };

            let len = current.body.len();
            if len + 1 + rest.len() <= self.max_size {
                current.append(line_no, rest);
                if opens_fence {
                    current.trailing_opener = Some(len);
                }
                return;
            }

            if inside_fence {
                let trailing_opener = current.trailing_opener;
                match trailing_opener {
                    Some(0) => current.append(line_no, rest),
                    Some(at) => {
                        // Move the opener down so this chunk does not end on it.
                        current.drop_trailing_opener(at);
                        self.commit(false);
                        self.start_from_opener(line_no - 1);
                        continue;
                    }
                    // The closing delimiter stays with its block.
                    None if is_delimiter || (!oversized && len < self.max_size) => {
                        current.append(line_no, rest)
                    }
                    None => self.reopen(line_no, rest),
                }
                return;
            }

            if is_delimiter || oversized || len >= self.max_size {
                self.commit(false);
                continue;
            }

            let cut = floor_char_boundary(rest, self.max_size - len - 1);
            if cut == 0 {
                current.append(line_no, rest);
                return;
            }
            current.append(line_no, &rest[..cut]);
            self.commit(true);
            rest = &rest[cut..];
        }
    }

    fn commit(&mut self, continues_line: bool) {
        if let Some(current) = self.current.take() {
            self.chunks.push(current.into_chunk(false, continues_line));
        }
    }

    fn start_from_opener(&mut self, line_no: usize) {
        let opener = self.fence.opener().unwrap_or(FENCE_CLOSER);
        let mut next = Pending::new(line_no, opener);
        next.trailing_opener = Some(0);
        self.current = Some(next);
    }

    fn reopen(&mut self, line_no: usize, line: &str) {
        if let Some(mut current) = self.current.take() {
            current.body.push('\n');
            current.body.push_str(FENCE_CLOSER);
            self.chunks.push(current.into_chunk(true, false));
        }

        let opener = self.fence.opener().unwrap_or(FENCE_CLOSER);
        let mut next = Pending::new(line_no, opener);
        next.append(line_no, line);
        next.reopened_fence = true;
        self.current = Some(next);
    }

    fn finish(mut self) -> Vec<CommentChunk> {
        self.commit(false);
        if self.fence.is_open() {
            tracing::debug!("comment body ends inside an unterminated code fence");
        }
        self.chunks
    }
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}

/// Rebuild the original body from its chunks, dropping synthetic fence lines.
pub fn reassemble(chunks: &[CommentChunk]) -> String {
    let mut out = String::new();
    let mut separator = "";

    for chunk in chunks {
        out.push_str(separator);

        let mut body = chunk.body.as_str();
        if chunk.reopened_fence {
            body = body.split_once('\n').map(|(_, rest)| rest).unwrap_or("");
        }
        if chunk.closed_fence {
            body = body
                .strip_suffix(FENCE_CLOSER)
                .and_then(|b| b.strip_suffix('\n'))
                .unwrap_or(body);
        }
        out.push_str(body);

        separator = if chunk.continues_line { "" } else { "\n" };
    }

    out
}
