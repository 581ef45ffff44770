use serde::{Deserialize, Serialize};

use super::node::Node;
use super::summary::ValidationSummary;
use crate::error::ParseError;

/// Axis along which a process was decomposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Temporal,
    Functional,
    Stakeholder,
    State,
    InputOutput,
    Custom,
}

/// Where the process knowledge came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    SmeInterview,
    Document,
    Verbal,
    Observation,
    Hybrid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub scope: String,
    pub trigger: String,
    pub completion_criteria: String,
    pub decomposition_dimension: Dimension,
    pub dimension_rationale: String,
    pub source_type: SourceType,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
    pub version: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Data,
    Sequencing,
    Resource,
    Approval,
}

/// A non-hierarchical edge between two nodes in different branches.
///
/// Both endpoints must reference existing nodes and must differ; the
/// validator flags violations rather than the model rejecting them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossBranchDependency {
    pub from_id: String,
    pub to_id: String,
    pub dependency_type: DependencyKind,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<String>,
}

/// Top-level container for one decomposition session.
///
/// Produced wholesale by an external generation process and replaced
/// atomically; the only partial mutation path is node refinement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decomposition {
    pub metadata: Metadata,
    pub tree: Node,
    pub cross_branch_dependencies: Vec<CrossBranchDependency>,
    pub validation_summary: ValidationSummary,
}

impl Decomposition {
    /// Strictly parses a complete decomposition document.
    ///
    /// This is the terminal-payload path; transiently invalid partial JSON
    /// goes through the streaming parser instead.
    pub fn from_json(raw: &str) -> Result<Self, ParseError> {
        serde_json::from_str(raw).map_err(|e| ParseError::Json(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, ParseError> {
        serde_json::to_string(self).map_err(|e| ParseError::Json(e.to_string()))
    }

    /// Looks up a node anywhere in the tree by its hierarchical id.
    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.tree.find(id)
    }

    /// All node ids in the tree, preorder.
    pub fn node_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        self.tree.visit(&mut |node| ids.push(node.id().to_string()));
        ids
    }
}
