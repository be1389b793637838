//! Apply result comments.

use crate::domain::{ApplyReport, ApplyResult};
use crate::render::banner::write_banner;
use crate::render::{
    check_cluster_names, escape_cell, finish, write_cluster_header, write_title, RenderError,
};
use chrono::SecondsFormat;
use std::fmt::{self, Write};

pub fn render_apply(report: &ApplyReport<'_>) -> Result<String, RenderError> {
    check_cluster_names(report.cluster_applies.iter().map(|a| &a.cluster))?;

    let mut out = String::new();
    write_title(&mut out, "🚀 Apply results", &report.env)?;
    write_banner(&mut out, report.pull_request)?;

    for cluster_apply in &report.cluster_applies {
        write_cluster_header(&mut out, &cluster_apply.cluster)?;

        if cluster_apply.results.is_empty() {
            writeln!(out, "_No resources were changed._")?;
            writeln!(out)?;
            continue;
        }

        writeln!(out, "| Kind | Namespace | Name | Version | Created |")?;
        writeln!(out, "| --- | --- | --- | --- | --- |")?;
        for result in &cluster_apply.results {
            write_result_row(&mut out, result)?;
        }
        writeln!(out)?;
    }

    Ok(finish(out))
}

fn write_result_row(out: &mut String, result: &ApplyResult) -> fmt::Result {
    let version = if result.is_noop() {
        format!("`{}` (unchanged)", escape_cell(&result.old_version))
    } else {
        format!(
            "`{}` → `{}`",
            escape_cell(&result.old_version),
            escape_cell(&result.new_version)
        )
    };
    writeln!(
        out,
        "| {} | {} | {} | {} | {} |",
        escape_cell(&result.kind),
        escape_cell(&result.namespace),
        escape_cell(&result.name),
        version,
        result.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClusterApply;
    use crate::render::fixtures;
    use chrono::{TimeZone, Utc};

    fn result(name: &str, old: &str, new: &str, created: i64) -> ApplyResult {
        ApplyResult {
            name: name.to_string(),
            namespace: "test-namespace".to_string(),
            kind: "test-kind".to_string(),
            created_at: Utc.timestamp_opt(created, 0).unwrap(),
            old_version: old.to_string(),
            new_version: new.to_string(),
        }
    }

    #[test]
    fn renders_banner_sections_and_rows() {
        let clusters = fixtures::clusters();
        let pr = fixtures::approved_pr();
        let report = ApplyReport {
            cluster_applies: vec![
                ClusterApply {
                    cluster: clusters[0].clone(),
                    results: vec![
                        result("test-name", "1234", "3456", 12345),
                        result("test-name2", "1234", "1234", 56778),
                    ],
                },
                ClusterApply {
                    cluster: clusters[1].clone(),
                    results: Vec::new(),
                },
            ],
            pull_request: &pr,
            env: "stage".to_string(),
        };

        let text = render_apply(&report).expect("render");
        similar_asserts::assert_eq!(
            text,
            "#### 🚀 Apply results (env: `stage`)

> Approved: ✅ | Mergeable: ✅ | Merged: ❌ | Behind base: 0 commits

##### Cluster `test-cluster1` · region `test-region` · env `test-env`
Subpaths: `test/subpath`

| Kind | Namespace | Name | Version | Created |
| --- | --- | --- | --- | --- |
| test-kind | test-namespace | test-name | `1234` → `3456` | 1970-01-01T03:25:45Z |
| test-kind | test-namespace | test-name2 | `1234` (unchanged) | 1970-01-01T15:46:18Z |

##### Cluster `test-cluster2` · region `test-region` · env `test-env`

_No resources were changed._
"
        );
    }

    #[test]
    fn unchanged_row_is_marked_not_dropped() {
        let clusters = fixtures::clusters();
        let pr = fixtures::approved_pr();
        let report = ApplyReport {
            cluster_applies: vec![ClusterApply {
                cluster: clusters[2].clone(),
                results: vec![result("test-name3", "1234", "1234", 12345)],
            }],
            pull_request: &pr,
            env: "stage".to_string(),
        };

        let text = render_apply(&report).expect("render");
        assert!(text.contains("| test-name3 | `1234` (unchanged) |"));
        assert!(text.contains("Approved: ✅ | Mergeable: ✅ | Merged: ❌"));
        assert!(text.contains("Subpaths: `subpath1/subpath2`"));
    }

    #[test]
    fn pipes_in_names_are_escaped() {
        let clusters = fixtures::clusters();
        let pr = fixtures::approved_pr();
        let report = ApplyReport {
            cluster_applies: vec![ClusterApply {
                cluster: clusters[1].clone(),
                results: vec![result("odd|name", "1", "2", 0)],
            }],
            pull_request: &pr,
            env: "stage".to_string(),
        };
        let text = render_apply(&report).expect("render");
        assert!(text.contains("| odd\\|name |"));
    }
}
