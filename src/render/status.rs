//! Cluster status comments.

use crate::domain::StatusReport;
use crate::render::banner::write_banner;
use crate::render::{
    check_cluster_names, finish, write_cluster_header, write_title, RenderError,
};
use std::fmt::Write;

pub fn render_status(report: &StatusReport<'_>) -> Result<String, RenderError> {
    check_cluster_names(report.cluster_statuses.iter().map(|s| &s.cluster))?;

    let mut out = String::new();
    write_title(&mut out, "📊 Cluster status", &report.env)?;
    write_banner(&mut out, report.pull_request)?;

    for status in &report.cluster_statuses {
        write_cluster_header(&mut out, &status.cluster)?;
        let summary = status.health_summary.trim_end_matches(['\n', '\r']);
        if summary.trim().is_empty() {
            writeln!(out, "_No health summary reported._")?;
        } else {
            writeln!(out, "```")?;
            writeln!(out, "{summary}")?;
            writeln!(out, "```")?;
        }
        writeln!(out)?;
    }

    Ok(finish(out))
}
