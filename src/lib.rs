//! pr-comments: render cluster apply/diff/status reports as pull-request
//! comments and split them to fit the hosting API's comment size limit.
//!
//! Data flows one way: [`domain`] report data is rendered to a single
//! markdown body by [`render`], which [`chunk`] splits into comments that are
//! posted in order.

pub mod chunk;
pub mod cli;
pub mod config;
pub mod domain;
pub mod input;
pub mod render;

pub use chunk::{comment_chunks, ChunkError, CommentChunker};
pub use domain::{PullRequestState, Report};
pub use render::{render_or_error, render_report, RenderError};
