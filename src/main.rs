//! pr-comments: render cluster reports as size-bounded pull-request comments.

use anyhow::Result;

fn main() -> Result<()> {
    pr_comments::cli::run()
}
