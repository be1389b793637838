//! Help comments: usage instructions and the clusters a pull request touches.

use crate::domain::HelpReport;
use crate::render::{
    check_cluster_names, code_list, escape_cell, finish, write_title, RenderError,
};
use std::fmt::Write;

pub fn render_help(report: &HelpReport) -> Result<String, RenderError> {
    check_cluster_names(&report.clusters)?;

    let command = &report.command;
    let mut out = String::new();
    write_title(&mut out, "ℹ️ Help", &report.env)?;

    writeln!(
        out,
        "Comment on this pull request with one of the following commands:"
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "- `{command} diff [cluster1,cluster2,...] [--subpath=path]`: \
         show the changes this pull request would make"
    )?;
    writeln!(
        out,
        "- `{command} apply [cluster1,cluster2,...] [--subpath=path]`: \
         apply the changes; the pull request must be approved and mergeable"
    )?;
    writeln!(
        out,
        "- `{command} status [cluster1,cluster2,...]`: show the health of each cluster"
    )?;
    writeln!(out, "- `{command} help`: show this message")?;
    writeln!(out)?;

    if report.clusters.is_empty() {
        writeln!(out, "_No clusters are affected by this pull request._")?;
        return Ok(finish(out));
    }

    writeln!(out, "Clusters affected by this pull request:")?;
    writeln!(out)?;
    writeln!(out, "| Cluster | Region | Subpaths |")?;
    writeln!(out, "| --- | --- | --- |")?;
    for cluster in &report.clusters {
        let subpaths = if cluster.is_restricted() {
            escape_cell(&code_list(&cluster.subpaths))
        } else {
            "_all_".to_string()
        };
        writeln!(
            out,
            "| `{}` | `{}` | {} |",
            escape_cell(&cluster.cluster),
            escape_cell(&cluster.region),
            subpaths
        )?;
    }

    Ok(finish(out))
}
