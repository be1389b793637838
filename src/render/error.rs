//! Error comments.
//!
//! No pull-request banner here: an error comment is what gets posted when the
//! pull request's state could not be determined in the first place.

use crate::domain::ErrorReport;
use crate::render::finish;

pub fn render_error(report: &ErrorReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("#### ❌ Error (env: `{}`)\n\n", report.env));
    out.push_str("```\n");
    out.push_str(report.error.trim_end_matches('\n'));
    out.push_str("\n```\n");
    finish(out)
}
