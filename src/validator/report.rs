use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::model::{Issue, IssueKind, Severity};

/// Accumulator for one validation pass: ordered issues plus tree statistics.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
    pub node_count: u32,
    pub atom_count: u32,
    pub branch_count: u32,
    pub max_depth: u32,
    pub max_fan_out: u32,
    pub all_node_ids: AHashSet<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(
        &mut self,
        severity: Severity,
        location: impl Into<String>,
        issue_type: IssueKind,
        message: impl Into<String>,
    ) {
        self.issues.push(Issue {
            severity,
            location: location.into(),
            issue_type,
            message: message.into(),
        });
    }

    pub fn error_count(&self) -> u32 {
        self.count_severity(Severity::Error)
    }

    pub fn warning_count(&self) -> u32 {
        self.count_severity(Severity::Warning)
    }

    pub fn info_count(&self) -> u32 {
        self.count_severity(Severity::Info)
    }

    fn count_severity(&self, severity: Severity) -> u32 {
        self.issues.iter().filter(|i| i.severity == severity).count() as u32
    }

    /// A report is valid when it holds no error-severity issues.
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    /// Serializable report matching the CLI output contract.
    pub fn to_output(&self) -> ReportOutput {
        ReportOutput {
            valid: self.is_valid(),
            summary: ReportSummary {
                errors: self.error_count(),
                warnings: self.warning_count(),
                info: self.info_count(),
                total_nodes: self.node_count,
                total_atoms: self.atom_count,
                total_branches: self.branch_count,
                max_depth: self.max_depth,
                max_fan_out: self.max_fan_out,
            },
            issues: self.issues.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOutput {
    pub valid: bool,
    pub summary: ReportSummary,
    pub issues: Vec<Issue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub errors: u32,
    pub warnings: u32,
    pub info: u32,
    pub total_nodes: u32,
    pub total_atoms: u32,
    pub total_branches: u32,
    pub max_depth: u32,
    pub max_fan_out: u32,
}
