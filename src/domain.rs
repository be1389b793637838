//! Report model: the data a single pull-request comment is rendered from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Identity of one cluster that an apply/diff/status run targeted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterIdentity {
    pub cluster: String,
    pub region: String,
    pub env: String,
    /// Resolved location of the cluster's expanded configs.
    #[serde(default)]
    pub expanded_path: PathBuf,
    /// When non-empty, restricts the run to these subpaths of the cluster.
    #[serde(default)]
    pub subpaths: Vec<String>,
}

impl ClusterIdentity {
    pub fn new(
        cluster: impl Into<String>,
        region: impl Into<String>,
        env: impl Into<String>,
    ) -> Self {
        Self {
            cluster: cluster.into(),
            region: region.into(),
            env: env.into(),
            expanded_path: PathBuf::new(),
            subpaths: Vec::new(),
        }
    }

    pub fn with_subpaths<I, S>(mut self, subpaths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subpaths = subpaths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_expanded_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.expanded_path = path.into();
        self
    }

    pub fn is_restricted(&self) -> bool {
        !self.subpaths.is_empty()
    }
}

/// One resource touched by an apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyResult {
    pub name: String,
    pub namespace: String,
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub old_version: String,
    pub new_version: String,
}

impl ApplyResult {
    /// The apply left this resource as it was.
    pub fn is_noop(&self) -> bool {
        self.old_version == self.new_version
    }
}

/// Results of applying one cluster, in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterApply {
    pub cluster: ClusterIdentity,
    #[serde(default)]
    pub results: Vec<ApplyResult>,
}

/// Raw unified diff for one cluster; empty means no changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterDiff {
    pub cluster: ClusterIdentity,
    #[serde(default)]
    pub raw_diffs: String,
}

impl ClusterDiff {
    pub fn has_changes(&self) -> bool {
        !self.raw_diffs.trim().is_empty()
    }
}

/// Free-text health summary for one cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterStatus {
    pub cluster: ClusterIdentity,
    #[serde(default)]
    pub health_summary: String,
}

/// Read-only view of the pull request a comment is posted on.
///
/// Implemented by the hosting client; reports only ever query it.
pub trait PullRequestState {
    fn is_approved(&self) -> bool;
    fn is_mergeable(&self) -> bool;
    fn is_merged(&self) -> bool;
    fn commits_behind_base(&self) -> u32;
}

pub struct ApplyReport<'a> {
    pub cluster_applies: Vec<ClusterApply>,
    pub pull_request: &'a dyn PullRequestState,
    pub env: String,
}

pub struct DiffReport<'a> {
    pub cluster_diffs: Vec<ClusterDiff>,
    pub pull_request: &'a dyn PullRequestState,
    pub env: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub error: String,
    pub env: String,
}

impl ErrorReport {
    pub fn new(error: impl std::fmt::Display, env: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            env: env.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpReport {
    pub clusters: Vec<ClusterIdentity>,
    pub env: String,
    /// Comment-command prefix shown in the usage instructions.
    pub command: String,
}

pub struct StatusReport<'a> {
    pub cluster_statuses: Vec<ClusterStatus>,
    pub pull_request: &'a dyn PullRequestState,
    pub env: String,
}

/// Every kind of comment this crate knows how to render.
pub enum Report<'a> {
    Apply(ApplyReport<'a>),
    Diff(DiffReport<'a>),
    Error(ErrorReport),
    Help(HelpReport),
    Status(StatusReport<'a>),
}

impl Report<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Report::Apply(_) => "apply",
            Report::Diff(_) => "diff",
            Report::Error(_) => "error",
            Report::Help(_) => "help",
            Report::Status(_) => "status",
        }
    }

    pub fn env(&self) -> &str {
        match self {
            Report::Apply(r) => &r.env,
            Report::Diff(r) => &r.env,
            Report::Error(r) => &r.env,
            Report::Help(r) => &r.env,
            Report::Status(r) => &r.env,
        }
    }

    /// Every cluster identity carried by the report, in report order.
    pub fn clusters(&self) -> Vec<&ClusterIdentity> {
        match self {
            Report::Apply(r) => r.cluster_applies.iter().map(|a| &a.cluster).collect(),
            Report::Diff(r) => r.cluster_diffs.iter().map(|d| &d.cluster).collect(),
            Report::Error(_) => Vec::new(),
            Report::Help(r) => r.clusters.iter().collect(),
            Report::Status(r) => r.cluster_statuses.iter().map(|s| &s.cluster).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn apply_result_is_noop_when_versions_match() {
        let mut result = ApplyResult {
            name: "web".to_string(),
            namespace: "default".to_string(),
            kind: "Deployment".to_string(),
            created_at: Utc.timestamp_opt(12345, 0).unwrap(),
            old_version: "1234".to_string(),
            new_version: "1234".to_string(),
        };
        assert!(result.is_noop());
        result.new_version = "3456".to_string();
        assert!(!result.is_noop());
    }

    #[test]
    fn whitespace_only_diff_has_no_changes() {
        let cluster = ClusterIdentity::new("c1", "us-west-2", "stage");
        let diff = ClusterDiff {
            cluster: cluster.clone(),
            raw_diffs: " \n\n".to_string(),
        };
        assert!(!diff.has_changes());
        let diff = ClusterDiff {
            cluster,
            raw_diffs: "+ added".to_string(),
        };
        assert!(diff.has_changes());
    }

    #[test]
    fn error_report_has_no_clusters() {
        let report = Report::Error(ErrorReport::new("boom", "stage"));
        assert_eq!(report.kind(), "error");
        assert_eq!(report.env(), "stage");
        assert!(report.clusters().is_empty());
    }
}
