//! Diff comments.

use crate::domain::DiffReport;
use crate::render::banner::write_banner;
use crate::render::{
    check_cluster_names, finish, plural, write_cluster_header, write_title, RenderError,
};
use std::fmt::Write;

pub fn render_diff(report: &DiffReport<'_>) -> Result<String, RenderError> {
    check_cluster_names(report.cluster_diffs.iter().map(|d| &d.cluster))?;

    let mut out = String::new();
    write_title(&mut out, "🔍 Diff results", &report.env)?;
    write_banner(&mut out, report.pull_request)?;

    let behind_by = report.pull_request.commits_behind_base();
    if behind_by > 0 {
        writeln!(
            out,
            "> ⚠️ This branch is {} behind the base branch. \
             Merge or rebase before applying so these diffs match what will be applied.",
            plural(behind_by, "commit"),
        )?;
        writeln!(out)?;
    }

    for cluster_diff in &report.cluster_diffs {
        write_cluster_header(&mut out, &cluster_diff.cluster)?;
        if cluster_diff.has_changes() {
            writeln!(out, "```diff")?;
            let raw_diffs = cluster_diff.raw_diffs.trim_end_matches(['\n', '\r']);
            writeln!(out, "{raw_diffs}")?;
            writeln!(out, "```")?;
        } else {
            writeln!(out, "_No changes._")?;
        }
        writeln!(out)?;
    }

    Ok(finish(out))
}
