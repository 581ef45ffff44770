use serde_json::{Map, Value, json};
use tracing::warn;

use super::SessionContext;
use crate::bridge::ToolBridge;
use crate::error::RefineError;
use crate::model::{Decomposition, Node, Orchestration};

/// Name of the tool call that reconciles a single-node edit.
pub const REFINE_TOOL: &str = "mece-refine-node";

/// A targeted edit to one node. Unset fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct NodeEdit {
    pub label: Option<String>,
    pub description: Option<String>,
    /// Branch nodes only; ignored for atoms.
    pub orchestration: Option<Orchestration>,
    pub orchestration_rationale: Option<String>,
}

impl NodeEdit {
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn orchestration(mut self, orchestration: Orchestration) -> Self {
        self.orchestration = Some(orchestration);
        self
    }

    pub fn orchestration_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.orchestration_rationale = Some(rationale.into());
        self
    }
}

/// Computes the update payload for an edit: exactly the fields whose values
/// differ from the node's current values, nothing else.
pub fn diff_node(node: &Node, edit: &NodeEdit) -> Map<String, Value> {
    let mut updates = Map::new();

    if let Some(label) = &edit.label {
        if label != node.label() {
            updates.insert("label".into(), Value::String(label.clone()));
        }
    }

    if let Some(description) = &edit.description {
        if description != node.description() {
            updates.insert("description".into(), Value::String(description.clone()));
        }
    }

    if let Node::Branch(branch) = node {
        if let Some(orchestration) = edit.orchestration {
            if orchestration != branch.orchestration {
                if let Ok(value) = serde_json::to_value(orchestration) {
                    updates.insert("orchestration".into(), value);
                }
            }
        }

        if let Some(rationale) = &edit.orchestration_rationale {
            if rationale != &branch.orchestration_rationale {
                updates.insert(
                    "orchestration_rationale".into(),
                    Value::String(rationale.clone()),
                );
            }
        }
    }

    updates
}

/// Sends a single-node refinement to the external reconciliation process.
///
/// The current tree travels with the call so the external side can re-score
/// the whole decomposition. An edit that changes nothing short-circuits to
/// `Ok(None)` without calling out. Failures are logged against the session
/// and returned; the caller's state is never mutated on this path.
pub fn refine_node(
    bridge: &dyn ToolBridge,
    ctx: &SessionContext,
    decomposition: &Decomposition,
    node_id: &str,
    edit: &NodeEdit,
) -> Result<Option<Value>, RefineError> {
    let node = decomposition
        .find_node(node_id)
        .ok_or_else(|| RefineError::UnknownNode(node_id.to_string()))?;

    let updates = diff_node(node, edit);
    if updates.is_empty() {
        return Ok(None);
    }

    let full_tree = decomposition
        .to_json()
        .map_err(|e| RefineError::Serialize(e.to_string()))?;

    let args = json!({
        "nodeId": node_id,
        "updates": updates,
        "fullTree": full_tree,
    });

    match bridge.call(REFINE_TOOL, &args) {
        Ok(response) => Ok(Some(response)),
        Err(e) => {
            warn!(session = %ctx.session_id, node = node_id, error = %e, "refinement tool call failed");
            Err(e.into())
        }
    }
}
