use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Category tag for a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Overlap,
    Gap,
    FanOut,
    Depth,
    Atomicity,
    Dependency,
    Schema,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::Overlap => write!(f, "overlap"),
            IssueKind::Gap => write!(f, "gap"),
            IssueKind::FanOut => write!(f, "fan_out"),
            IssueKind::Depth => write!(f, "depth"),
            IssueKind::Atomicity => write!(f, "atomicity"),
            IssueKind::Dependency => write!(f, "dependency"),
            IssueKind::Schema => write!(f, "schema"),
        }
    }
}

/// A single validation finding, ordinary data rather than an exception.
/// Error-severity issues never halt rendering of the tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    /// A node id (`node:1.2`) or a non-node location such as `metadata`.
    pub location: String,
    pub issue_type: IssueKind,
    pub message: String,
}

/// Declared quality assessment carried inside a decomposition document.
///
/// The ME/CE scores come from an external judgment pass; the counters are
/// cross-checked against computed tree statistics by the validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub me_score: f64,
    pub ce_score: f64,
    pub overall_score: f64,
    pub levels_assessed: u32,
    pub total_nodes: u32,
    pub total_atoms: u32,
    pub total_branches: u32,
    pub max_depth: u32,
    pub max_fan_out: u32,
    #[serde(default)]
    pub issues: Vec<Issue>,
}
