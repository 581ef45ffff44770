//! Common test utilities for building decomposition documents.
use std::cell::RefCell;

use mece::error::ToolCallError;
use mece::model::{
    AgentDefinition, AtomNode, AtomSpec, BranchNode, Dimension, ExecutionType, ExternalIntegration,
    HumanInstruction, IntegrationMethod, ModelTier, Protocol, SourceType, ToolInvocation,
};
use mece::prelude::*;
use serde_json::Value;

#[allow(dead_code)]
pub fn metadata() -> Metadata {
    Metadata {
        scope: "Invoice approval from receipt to payment".to_string(),
        trigger: "Invoice arrives by email or upload".to_string(),
        completion_criteria: "Invoice paid or rejected with reason".to_string(),
        decomposition_dimension: Dimension::Temporal,
        dimension_rationale: "Approval follows a fixed time sequence".to_string(),
        source_type: SourceType::SmeInterview,
        inclusions: vec!["standard invoices".to_string()],
        exclusions: vec!["credit notes".to_string()],
        version: "1.0".to_string(),
        created_at: "2026-01-15T10:00:00Z".to_string(),
    }
}

#[allow(dead_code)]
pub fn tool_atom(id: &str, parent_id: &str, depth: u32, label: &str) -> Node {
    let mut parameters = serde_json::Map::new();
    parameters.insert("source".to_string(), serde_json::json!("inbox"));
    Node::Atom(AtomNode {
        id: id.to_string(),
        label: label.to_string(),
        description: format!("{label} step"),
        depth,
        parent_id: Some(parent_id.to_string()),
        atom_spec: Some(AtomSpec {
            estimated_duration: "2 minutes".to_string(),
            inputs: vec!["raw invoice".to_string()],
            outputs: vec!["digitized invoice".to_string()],
            error_modes: vec!["unreadable scan".to_string()],
            execution_type: ExecutionType::Tool,
            agent_definition: None,
            human_instruction: None,
            tool_invocation: Some(ToolInvocation {
                tool_name: "ocr_pipeline".to_string(),
                parameters,
                retry_policy: None,
                max_retries: None,
            }),
            external_integration: None,
        }),
    })
}

#[allow(dead_code)]
pub fn human_atom(id: &str, parent_id: &str, depth: u32, label: &str) -> Node {
    Node::Atom(AtomNode {
        id: id.to_string(),
        label: label.to_string(),
        description: format!("{label} step"),
        depth,
        parent_id: Some(parent_id.to_string()),
        atom_spec: Some(AtomSpec {
            estimated_duration: "1 day".to_string(),
            inputs: vec!["digitized invoice".to_string()],
            outputs: vec!["approval decision".to_string()],
            error_modes: vec!["approver unavailable".to_string()],
            execution_type: ExecutionType::Human,
            agent_definition: None,
            human_instruction: Some(HumanInstruction {
                action: "Approve or reject the invoice".to_string(),
                context: "High-value invoices need a manager decision".to_string(),
                decision_criteria: "Amount matches the purchase order".to_string(),
                escalation_path: Some("finance director".to_string()),
                integration_method: IntegrationMethod::AskUserQuestion,
            }),
            tool_invocation: None,
            external_integration: None,
        }),
    })
}

#[allow(dead_code)]
pub fn agent_atom(id: &str, parent_id: &str, depth: u32, label: &str) -> Node {
    Node::Atom(AtomNode {
        id: id.to_string(),
        label: label.to_string(),
        description: format!("{label} step"),
        depth,
        parent_id: Some(parent_id.to_string()),
        atom_spec: Some(AtomSpec {
            estimated_duration: "5 minutes".to_string(),
            inputs: vec!["digitized invoice".to_string()],
            outputs: vec!["validation verdict".to_string()],
            error_modes: vec!["missing purchase order".to_string()],
            execution_type: ExecutionType::Agent,
            agent_definition: Some(AgentDefinition {
                name: "invoice-checker".to_string(),
                description: "Checks invoice fields against the purchase order".to_string(),
                prompt: "Compare the invoice lines to the purchase order and report mismatches.".to_string(),
                tools: vec!["read_po".to_string(), "read_invoice".to_string()],
                model: ModelTier::Mid,
                model_rationale: "Structured comparison, no deep reasoning".to_string(),
                max_turns: Some(4),
            }),
            human_instruction: None,
            tool_invocation: None,
            external_integration: None,
        }),
    })
}

#[allow(dead_code)]
pub fn external_atom(id: &str, parent_id: &str, depth: u32, label: &str) -> Node {
    Node::Atom(AtomNode {
        id: id.to_string(),
        label: label.to_string(),
        description: format!("{label} step"),
        depth,
        parent_id: Some(parent_id.to_string()),
        atom_spec: Some(AtomSpec {
            estimated_duration: "30 seconds".to_string(),
            inputs: vec!["approval decision".to_string()],
            outputs: vec!["payment confirmation".to_string()],
            error_modes: vec!["payment gateway down".to_string()],
            execution_type: ExecutionType::External,
            agent_definition: None,
            human_instruction: None,
            tool_invocation: None,
            external_integration: Some(ExternalIntegration {
                system: "payments-service".to_string(),
                operation: "schedule_payment".to_string(),
                protocol: Protocol::RestApi,
                timeout: Some("30s".to_string()),
                fallback: Some("queue for manual payment".to_string()),
            }),
        }),
    })
}

/// The Invoice Approval Workflow scenario: a sequential root with three
/// children, one of which is a conditional branch with two children.
#[allow(dead_code)]
pub fn invoice_tree() -> Node {
    Node::Branch(BranchNode {
        id: "1".to_string(),
        label: "Invoice Approval Workflow".to_string(),
        description: "End-to-end invoice handling".to_string(),
        depth: 0,
        parent_id: None,
        orchestration: Orchestration::Sequential,
        orchestration_rationale: "Each stage depends on the previous one".to_string(),
        condition: None,
        loop_spec: None,
        children: vec![
            tool_atom("1.1", "1", 1, "Receive and Digitize Invoice"),
            Node::Branch(BranchNode {
                id: "1.2".to_string(),
                label: "Review and Approval".to_string(),
                description: "Validation and the approval decision".to_string(),
                depth: 1,
                parent_id: Some("1".to_string()),
                orchestration: Orchestration::Conditional,
                orchestration_rationale: "Routing depends on the invoice amount".to_string(),
                condition: Some("amount > 1000".to_string()),
                loop_spec: None,
                children: vec![
                    agent_atom("1.2.1", "1.2", 2, "Validate Against Purchase Order"),
                    human_atom("1.2.2", "1.2", 2, "Manager Approval"),
                ],
            }),
            external_atom("1.3", "1", 1, "Schedule Payment"),
        ],
    })
}

#[allow(dead_code)]
pub fn invoice_decomposition() -> Decomposition {
    Decomposition {
        metadata: metadata(),
        tree: invoice_tree(),
        cross_branch_dependencies: vec![CrossBranchDependency {
            from_id: "1.2.1".to_string(),
            to_id: "1.3".to_string(),
            dependency_type: mece::model::DependencyKind::Data,
            description: "Validation verdict gates payment scheduling".to_string(),
            artifact: Some("validation verdict".to_string()),
        }],
        validation_summary: ValidationSummary {
            me_score: 0.92,
            ce_score: 0.88,
            overall_score: 0.9,
            levels_assessed: 3,
            total_nodes: 6,
            total_atoms: 4,
            total_branches: 2,
            max_depth: 2,
            max_fan_out: 3,
            issues: vec![],
        },
    }
}

#[allow(dead_code)]
pub fn invoice_json() -> String {
    serde_json::to_string(&invoice_decomposition()).expect("fixture serializes")
}

#[allow(dead_code)]
pub fn invoice_value() -> Value {
    serde_json::to_value(invoice_decomposition()).expect("fixture serializes")
}

/// Records every tool call it receives; optionally fails them all.
#[allow(dead_code)]
pub struct RecordingBridge {
    pub calls: RefCell<Vec<(String, Value)>>,
    pub fail: bool,
}

#[allow(dead_code)]
impl RecordingBridge {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail: true,
        }
    }
}

impl ToolBridge for RecordingBridge {
    fn call(&self, name: &str, args: &Value) -> std::result::Result<Value, ToolCallError> {
        self.calls.borrow_mut().push((name.to_string(), args.clone()));
        if self.fail {
            Err(ToolCallError::Transport("connection reset".to_string()))
        } else {
            Ok(serde_json::json!({ "status": "accepted" }))
        }
    }
}

/// Clipboard sink that either captures the text or refuses the write.
#[allow(dead_code)]
pub struct TestClipboard {
    pub contents: Option<String>,
    pub fail: bool,
}

#[allow(dead_code)]
impl TestClipboard {
    pub fn new() -> Self {
        Self {
            contents: None,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            contents: None,
            fail: true,
        }
    }
}

impl Clipboard for TestClipboard {
    fn write(&mut self, text: &str) -> std::io::Result<()> {
        if self.fail {
            return Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "clipboard not available",
            ));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
