//! Report request documents: what the `render` command reads.

use crate::domain::{
    ApplyReport, ClusterApply, ClusterDiff, ClusterIdentity, ClusterStatus, DiffReport,
    ErrorReport, HelpReport, PullRequestState, Report, StatusReport,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Pull-request state captured up front, e.g. by the job that ran the diff.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticPullRequestState {
    pub approved: bool,
    pub mergeable: bool,
    pub merged: bool,
    pub behind_by: u32,
}

impl PullRequestState for StaticPullRequestState {
    fn is_approved(&self) -> bool {
        self.approved
    }

    fn is_mergeable(&self) -> bool {
        self.mergeable
    }

    fn is_merged(&self) -> bool {
        self.merged
    }

    fn commits_behind_base(&self) -> u32 {
        self.behind_by
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReportPayload {
    Apply {
        #[serde(default)]
        applies: Vec<ClusterApply>,
    },
    Diff {
        #[serde(default)]
        diffs: Vec<ClusterDiff>,
    },
    Error {
        error: String,
    },
    Help {
        #[serde(default)]
        clusters: Vec<ClusterIdentity>,
    },
    Status {
        #[serde(default)]
        statuses: Vec<ClusterStatus>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportRequest {
    #[serde(flatten)]
    pub payload: ReportPayload,
    #[serde(default)]
    pub env: Option<String>,
    #[serde(default)]
    pub pull_request: StaticPullRequestState,
}

impl ReportRequest {
    /// Build the report, borrowing this request's pull-request state.
    pub fn to_report(&self, default_env: &str, command: &str) -> Report<'_> {
        let env = self.env.clone().unwrap_or_else(|| default_env.to_string());
        match &self.payload {
            ReportPayload::Apply { applies } => Report::Apply(ApplyReport {
                cluster_applies: applies.clone(),
                pull_request: &self.pull_request,
                env,
            }),
            ReportPayload::Diff { diffs } => Report::Diff(DiffReport {
                cluster_diffs: diffs.clone(),
                pull_request: &self.pull_request,
                env,
            }),
            ReportPayload::Error { error } => Report::Error(ErrorReport::new(error, env)),
            ReportPayload::Help { clusters } => Report::Help(HelpReport {
                clusters: clusters.clone(),
                env,
                command: command.to_string(),
            }),
            ReportPayload::Status { statuses } => Report::Status(StatusReport {
                cluster_statuses: statuses.clone(),
                pull_request: &self.pull_request,
                env,
            }),
        }
    }
}

pub fn load_request(path: &Path) -> Result<ReportRequest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed reading report request: {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let request = parse_request(&content, &ext)
        .with_context(|| format!("Invalid report request: {}", path.display()))?;
    tracing::debug!("loaded report request from {}", path.display());
    Ok(request)
}

pub fn parse_request(content: &str, ext: &str) -> Result<ReportRequest> {
    match ext {
        "yaml" | "yml" => serde_yaml::from_str(content).context("Invalid YAML syntax"),
        _ => serde_json::from_str(content).context("Invalid JSON syntax"),
    }
}
