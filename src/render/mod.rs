//! Markdown rendering of pull-request comments, one builder per report kind.

use crate::domain::{ClusterIdentity, ErrorReport, Report};
use std::fmt::{self, Write};
use thiserror::Error;

pub mod apply;
pub mod banner;
pub mod diff;
pub mod error;
pub mod help;
pub mod status;

pub use apply::render_apply;
pub use diff::render_diff;
pub use error::render_error;
pub use help::render_help;
pub use status::render_status;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to format comment: {0}")]
    Format(#[from] fmt::Error),

    #[error("cluster #{index} in the report has no name")]
    MissingClusterName { index: usize },
}

/// Render any report kind.
pub fn render_report(report: &Report<'_>) -> Result<String, RenderError> {
    tracing::debug!(
        kind = report.kind(),
        env = report.env(),
        clusters = report.clusters().len(),
        "rendering comment"
    );
    match report {
        Report::Apply(r) => render_apply(r),
        Report::Diff(r) => render_diff(r),
        Report::Error(r) => Ok(render_error(r)),
        Report::Help(r) => render_help(r),
        Report::Status(r) => render_status(r),
    }
}

/// Render `report`, or an error comment describing why it could not be rendered.
pub fn render_or_error(report: &Report<'_>) -> String {
    match render_report(report) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(
                kind = report.kind(),
                "falling back to error comment: {err}"
            );
            render_error(&ErrorReport::new(&err, report.env()))
        }
    }
}

pub(crate) fn check_cluster_names<'a>(
    clusters: impl IntoIterator<Item = &'a ClusterIdentity>,
) -> Result<(), RenderError> {
    for (index, cluster) in clusters.into_iter().enumerate() {
        if cluster.cluster.trim().is_empty() {
            return Err(RenderError::MissingClusterName { index });
        }
    }
    Ok(())
}

pub(crate) fn write_title(out: &mut String, title: &str, env: &str) -> fmt::Result {
    writeln!(out, "#### {title} (env: `{env}`)")?;
    writeln!(out)
}

pub(crate) fn write_cluster_header(out: &mut String, cluster: &ClusterIdentity) -> fmt::Result {
    writeln!(
        out,
        "##### Cluster `{}` · region `{}` · env `{}`",
        cluster.cluster, cluster.region, cluster.env
    )?;
    if cluster.is_restricted() {
        writeln!(out, "Subpaths: {}", code_list(&cluster.subpaths))?;
    }
    writeln!(out)
}

pub(crate) fn code_list(items: &[String]) -> String {
    items
        .iter()
        .map(|s| format!("`{s}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Make `value` safe to place inside a markdown table cell.
pub(crate) fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\r', '\n'], " ")
}

pub(crate) fn plural(count: u32, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Exactly one trailing newline.
pub(crate) fn finish(mut out: String) -> String {
    out.truncate(out.trim_end().len());
    out.push('\n');
    out
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::domain::ClusterIdentity;
    use crate::input::StaticPullRequestState;

    pub fn clusters() -> Vec<ClusterIdentity> {
        vec![
            ClusterIdentity::new("test-cluster1", "test-region", "test-env")
                .with_expanded_path("/git/repo/expanded/test-cluster1")
                .with_subpaths(["test/subpath"]),
            ClusterIdentity::new("test-cluster2", "test-region", "test-env")
                .with_expanded_path("/git/repo/expanded/test-cluster2"),
            ClusterIdentity::new("test-cluster3", "test-region", "test-env")
                .with_expanded_path("/git/repo/expanded/test-cluster3")
                .with_subpaths(["subpath1/subpath2"]),
        ]
    }

    pub fn approved_pr() -> StaticPullRequestState {
        StaticPullRequestState {
            approved: true,
            mergeable: true,
            merged: false,
            behind_by: 0,
        }
    }
}
