//! Pull-request state banner shown at the top of apply, diff and status comments.

use crate::domain::PullRequestState;
use crate::render::plural;
use std::fmt::{self, Write};

pub fn write_banner(out: &mut String, pull_request: &dyn PullRequestState) -> fmt::Result {
    writeln!(
        out,
        "> Approved: {} | Mergeable: {} | Merged: {} | Behind base: {}",
        mark(pull_request.is_approved()),
        mark(pull_request.is_mergeable()),
        mark(pull_request.is_merged()),
        plural(pull_request.commits_behind_base(), "commit"),
    )?;
    writeln!(out)
}

fn mark(value: bool) -> &'static str {
    if value {
        "✅"
    } else {
        "❌"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::StaticPullRequestState;

    #[test]
    fn banner_reflects_pull_request_state() {
        let pr = StaticPullRequestState {
            approved: true,
            mergeable: false,
            merged: true,
            behind_by: 1,
        };
        let mut out = String::new();
        write_banner(&mut out, &pr).expect("banner");
        assert_eq!(
            out,
            "> Approved: ✅ | Mergeable: ❌ | Merged: ✅ | Behind base: 1 commit\n\n"
        );
    }
}
