//! Structural validator behavior against well-formed and broken documents.
mod common;
use mece::model::{AtomNode, BranchNode};
use mece::prelude::*;
use serde_json::Value;

fn patched(f: impl FnOnce(&mut Value)) -> Value {
    let mut value = common::invoice_value();
    f(&mut value);
    value
}

fn has_issue(
    report: &ValidationReport,
    severity: Severity,
    kind: IssueKind,
    location: &str,
    message_fragment: &str,
) -> bool {
    report.issues.iter().any(|i| {
        i.severity == severity
            && i.issue_type == kind
            && i.location == location
            && i.message.contains(message_fragment)
    })
}

#[test]
fn valid_document_produces_no_issues() {
    let report = validate(&common::invoice_value());
    assert!(report.is_valid());
    assert!(report.issues.is_empty(), "unexpected issues: {:?}", report.issues);
    assert_eq!(report.node_count, 6);
    assert_eq!(report.atom_count, 4);
    assert_eq!(report.branch_count, 2);
    assert_eq!(report.max_depth, 2);
    assert_eq!(report.max_fan_out, 3);
}

#[test]
fn missing_tool_invocation_is_schema_error_at_node() {
    let value = patched(|v| {
        v["tree"]["children"][0]["atom_spec"]
            .as_object_mut()
            .unwrap()
            .remove("tool_invocation");
    });
    let report = validate(&value);
    assert!(!report.is_valid());
    assert!(has_issue(
        &report,
        Severity::Error,
        IssueKind::Schema,
        "node:1.1",
        "tool_invocation"
    ));

    // The typed model still loads and the payload section simply renders
    // nothing for the missing execution type.
    let raw = serde_json::to_string(&value).unwrap();
    let decomposition = Decomposition::from_json(&raw).unwrap();
    let Node::Atom(atom) = decomposition.find_node("1.1").unwrap() else {
        panic!("expected atom");
    };
    assert!(atom.atom_spec.as_ref().unwrap().tool_invocation.is_none());
}

#[test]
fn duplicate_node_id_is_error() {
    let value = patched(|v| {
        v["tree"]["children"][2]["id"] = serde_json::json!("1.1");
    });
    let report = validate(&value);
    assert!(has_issue(
        &report,
        Severity::Error,
        IssueKind::Schema,
        "node:1.1",
        "Duplicate node ID"
    ));
}

#[test]
fn declared_depth_mismatch_is_error() {
    let value = patched(|v| {
        v["tree"]["children"][0]["depth"] = serde_json::json!(5);
    });
    let report = validate(&value);
    assert!(has_issue(
        &report,
        Severity::Error,
        IssueKind::Schema,
        "node:1.1",
        "Depth mismatch"
    ));
}

#[test]
fn parent_prefix_violation_is_warning() {
    let value = patched(|v| {
        v["tree"]["children"][0]["id"] = serde_json::json!("2.1");
    });
    let report = validate(&value);
    assert!(has_issue(
        &report,
        Severity::Warning,
        IssueKind::Schema,
        "node:2.1",
        "parent prefix"
    ));
}

#[test]
fn low_fan_out_is_warning_not_error() {
    let value = patched(|v| {
        let children = v["tree"]["children"][1]["children"].as_array_mut().unwrap();
        children.truncate(1);
    });
    let report = validate(&value);
    assert!(has_issue(
        &report,
        Severity::Warning,
        IssueKind::FanOut,
        "node:1.2",
        "minimum"
    ));
    // Fan-out findings alone never make the document invalid
    assert!(report.is_valid());
}

#[test]
fn parallel_fan_out_over_limit_is_error() {
    let children: Vec<Node> = (1..=8)
        .map(|i| common::tool_atom(&format!("1.{i}"), "1", 1, &format!("Step {i}")))
        .collect();
    let tree = Node::Branch(BranchNode {
        id: "1".to_string(),
        label: "Wide".to_string(),
        description: "Too many concurrent children".to_string(),
        depth: 0,
        parent_id: None,
        orchestration: Orchestration::Parallel,
        orchestration_rationale: "All steps are independent".to_string(),
        condition: None,
        loop_spec: None,
        children,
    });
    let mut decomposition = common::invoice_decomposition();
    decomposition.tree = tree;
    decomposition.cross_branch_dependencies.clear();
    let value = serde_json::to_value(&decomposition).unwrap();

    let report = validate(&value);
    assert!(has_issue(
        &report,
        Severity::Error,
        IssueKind::FanOut,
        "node:1",
        "Parallel branch"
    ));
    assert!(has_issue(
        &report,
        Severity::Warning,
        IssueKind::FanOut,
        "node:1",
        "maximum"
    ));
}

#[test]
fn dependency_to_unknown_node_is_error() {
    let value = patched(|v| {
        v["cross_branch_dependencies"][0]["to_id"] = serde_json::json!("9.9");
    });
    let report = validate(&value);
    assert!(has_issue(
        &report,
        Severity::Error,
        IssueKind::Dependency,
        "dependency[0]",
        "9.9"
    ));
}

#[test]
fn self_referencing_dependency_is_error() {
    let value = patched(|v| {
        v["cross_branch_dependencies"][0]["from_id"] = serde_json::json!("1.1");
        v["cross_branch_dependencies"][0]["to_id"] = serde_json::json!("1.1");
    });
    let report = validate(&value);
    assert!(has_issue(
        &report,
        Severity::Error,
        IssueKind::Dependency,
        "dependency[0]",
        "Self-referencing"
    ));
}

#[test]
fn sibling_dependency_is_info() {
    let value = patched(|v| {
        v["cross_branch_dependencies"][0]["from_id"] = serde_json::json!("1.2.1");
        v["cross_branch_dependencies"][0]["to_id"] = serde_json::json!("1.2.2");
    });
    let report = validate(&value);
    assert!(has_issue(
        &report,
        Severity::Info,
        IssueKind::Dependency,
        "dependency[0]",
        "intra-branch"
    ));
    assert!(report.is_valid());
}

#[test]
fn declared_counter_mismatch_is_warning() {
    let value = patched(|v| {
        v["validation_summary"]["total_atoms"] = serde_json::json!(99);
    });
    let report = validate(&value);
    assert!(has_issue(
        &report,
        Severity::Warning,
        IssueKind::Schema,
        "validation_summary",
        "total_atoms=99"
    ));
}

#[test]
fn score_outside_unit_range_is_warning() {
    let value = patched(|v| {
        v["validation_summary"]["me_score"] = serde_json::json!(1.5);
    });
    let report = validate(&value);
    assert!(has_issue(
        &report,
        Severity::Warning,
        IssueKind::Schema,
        "validation_summary",
        "me_score"
    ));
}

#[test]
fn missing_top_level_field_is_error() {
    let value = patched(|v| {
        v.as_object_mut().unwrap().remove("metadata");
    });
    let report = validate(&value);
    assert!(has_issue(
        &report,
        Severity::Error,
        IssueKind::Schema,
        "root",
        "metadata"
    ));
}

#[test]
fn conditional_branch_without_condition_is_warning() {
    let value = patched(|v| {
        v["tree"]["children"][1].as_object_mut().unwrap().remove("condition");
    });
    let report = validate(&value);
    assert!(has_issue(
        &report,
        Severity::Warning,
        IssueKind::Schema,
        "node:1.2",
        "condition"
    ));
}

#[test]
fn atom_with_children_is_error() {
    let value = patched(|v| {
        v["tree"]["children"][0]["children"] = serde_json::json!([]);
    });
    let report = validate(&value);
    assert!(has_issue(
        &report,
        Severity::Error,
        IssueKind::Schema,
        "node:1.1",
        "must not have 'children'"
    ));
}

#[test]
fn atom_without_spec_is_error() {
    let mut decomposition = common::invoice_decomposition();
    let Node::Branch(root) = &mut decomposition.tree else {
        panic!("expected branch root");
    };
    root.children[0] = Node::Atom(AtomNode {
        id: "1.1".to_string(),
        label: "Bare".to_string(),
        description: "Atom with no execution contract".to_string(),
        depth: 1,
        parent_id: Some("1".to_string()),
        atom_spec: None,
    });
    let value = serde_json::to_value(&decomposition).unwrap();
    let report = validate(&value);
    assert!(has_issue(
        &report,
        Severity::Error,
        IssueKind::Schema,
        "node:1.1",
        "atom_spec"
    ));
}

#[test]
fn report_output_matches_cli_contract() {
    let report = validate(&common::invoice_value());
    let output = report.to_output();
    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["valid"], serde_json::json!(true));
    assert_eq!(json["summary"]["total_nodes"], serde_json::json!(6));
    assert_eq!(json["summary"]["errors"], serde_json::json!(0));
    assert!(json["issues"].as_array().unwrap().is_empty());
}
