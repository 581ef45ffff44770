//! Deterministic structural validation of decomposition documents.
//!
//! The walk operates on loosely-typed [`serde_json::Value`] rather than the
//! typed model, so schema violations surface as ordered [`Issue`] entries
//! instead of failing a typed parse. Findings never halt the walk; a single
//! pass reports everything it can see.

use serde_json::{Map, Value};

mod checks;
mod report;

pub use report::{ReportOutput, ReportSummary, ValidationReport};

use checks::{require_enum, require_string, require_string_list};

use crate::model::{IssueKind, Severity};

pub const MIN_CHILDREN: usize = 2;
pub const MAX_CHILDREN: usize = 7;
pub const MAX_DEPTH: u32 = 5;
pub const MAX_PARALLEL_FAN_OUT: usize = 7;
pub const MAX_TOOLS_PER_ATOM: usize = 5;
pub const MAX_PROMPT_WORDS: usize = 500;

const NODE_TYPES: &[&str] = &["branch", "atom"];
const ORCHESTRATIONS: &[&str] = &["sequential", "parallel", "conditional", "loop"];
const EXECUTION_TYPES: &[&str] = &["agent", "human", "tool", "external"];
const DIMENSIONS: &[&str] = &[
    "temporal",
    "functional",
    "stakeholder",
    "state",
    "input_output",
    "custom",
];
const SOURCE_TYPES: &[&str] = &["sme_interview", "document", "verbal", "observation", "hybrid"];
const DEPENDENCY_TYPES: &[&str] = &["data", "sequencing", "resource", "approval"];
const SEVERITIES: &[&str] = &["error", "warning", "info"];
const ISSUE_TYPES: &[&str] = &[
    "overlap",
    "gap",
    "fan_out",
    "depth",
    "atomicity",
    "dependency",
    "schema",
];
const MODEL_TIERS: &[&str] = &["low", "mid", "high", "haiku", "sonnet", "opus"];
const INTEGRATION_METHODS: &[&str] = &["ask_user_question", "webhook", "manual"];
const RETRY_POLICIES: &[&str] = &["none", "fixed", "exponential"];
const PROTOCOLS: &[&str] = &["rest_api", "grpc", "message_queue", "file_system", "database"];

/// Validates a complete decomposition document.
///
/// Dependency references are checked after the tree walk so that the full
/// node-id set is available for resolution.
pub fn validate(data: &Value) -> ValidationReport {
    let mut report = ValidationReport::new();

    let Some(root) = data.as_object() else {
        report.add_issue(
            Severity::Error,
            "root",
            IssueKind::Schema,
            "Root must be a JSON object",
        );
        return report;
    };

    for field in [
        "metadata",
        "tree",
        "cross_branch_dependencies",
        "validation_summary",
    ] {
        if !root.contains_key(field) {
            report.add_issue(
                Severity::Error,
                "root",
                IssueKind::Schema,
                format!("Missing required top-level field: {field}"),
            );
        }
    }

    if let Some(metadata) = root.get("metadata") {
        validate_metadata(metadata, &mut report);
    }

    if let Some(tree) = root.get("tree") {
        validate_node(tree, None, 0, &mut report);
    }

    if let Some(deps) = root.get("cross_branch_dependencies") {
        validate_dependencies(deps, &mut report);
    }

    if let Some(summary) = root.get("validation_summary") {
        validate_declared_summary(summary, &mut report);
        cross_check_summary(summary, &mut report);
    }

    report
}

fn validate_metadata(metadata: &Value, report: &mut ValidationReport) {
    let location = "metadata";
    let Some(obj) = metadata.as_object() else {
        report.add_issue(
            Severity::Error,
            location,
            IssueKind::Schema,
            "metadata must be an object",
        );
        return;
    };

    require_string(obj, "scope", location, report);
    require_string(obj, "trigger", location, report);
    require_string(obj, "completion_criteria", location, report);
    require_enum(obj, "decomposition_dimension", DIMENSIONS, location, report);
    require_string(obj, "dimension_rationale", location, report);
    require_enum(obj, "source_type", SOURCE_TYPES, location, report);
    require_string_list(obj, "inclusions", location, report, false);
    require_string_list(obj, "exclusions", location, report, false);
    require_string(obj, "version", location, report);
    require_string(obj, "created_at", location, report);
}

fn validate_node(
    node: &Value,
    expected_parent_id: Option<&str>,
    expected_depth: u32,
    report: &mut ValidationReport,
) {
    let Some(obj) = node.as_object() else {
        report.add_issue(
            Severity::Error,
            "tree",
            IssueKind::Schema,
            "Node must be an object",
        );
        return;
    };

    let node_id = obj
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or("<missing>")
        .to_string();
    let location = format!("node:{node_id}");

    report.node_count += 1;

    require_string(obj, "id", &location, report);
    require_string(obj, "label", &location, report);
    require_string(obj, "description", &location, report);

    if !require_enum(obj, "node_type", NODE_TYPES, &location, report) {
        return;
    }

    if !report.all_node_ids.insert(node_id.clone()) {
        report.add_issue(
            Severity::Error,
            &location,
            IssueKind::Schema,
            format!("Duplicate node ID: {node_id}"),
        );
    }

    match obj.get("depth").and_then(Value::as_u64) {
        None => report.add_issue(
            Severity::Error,
            &location,
            IssueKind::Schema,
            "Missing required field: depth",
        ),
        Some(declared) if declared != u64::from(expected_depth) => report.add_issue(
            Severity::Error,
            &location,
            IssueKind::Schema,
            format!("Depth mismatch: declared {declared}, expected {expected_depth}"),
        ),
        Some(_) => {}
    }

    if expected_depth > report.max_depth {
        report.max_depth = expected_depth;
    }

    if expected_depth > MAX_DEPTH {
        report.add_issue(
            Severity::Warning,
            &location,
            IssueKind::Depth,
            format!("Node depth {expected_depth} exceeds recommended max of {MAX_DEPTH}"),
        );
    }

    let declared_parent = obj.get("parent_id").and_then(Value::as_str);
    if declared_parent != expected_parent_id {
        report.add_issue(
            Severity::Error,
            &location,
            IssueKind::Schema,
            format!(
                "Parent ID mismatch: declared '{}', expected '{}'",
                declared_parent.unwrap_or("null"),
                expected_parent_id.unwrap_or("null"),
            ),
        );
    }

    // The id of a child must extend its parent's id by one dot-separated
    // segment; a bare prefix check catches restructured trees.
    if let Some(parent) = expected_parent_id {
        if !node_id.starts_with(&format!("{parent}.")) {
            report.add_issue(
                Severity::Warning,
                &location,
                IssueKind::Schema,
                format!("ID '{node_id}' does not follow parent prefix pattern '{parent}.X'"),
            );
        }
    }

    match obj.get("node_type").and_then(Value::as_str) {
        Some("branch") => {
            report.branch_count += 1;
            validate_branch(obj, &node_id, expected_depth, report);
        }
        Some("atom") => {
            report.atom_count += 1;
            validate_atom(obj, &location, report);
        }
        _ => {}
    }
}

fn validate_branch(
    obj: &Map<String, Value>,
    node_id: &str,
    depth: u32,
    report: &mut ValidationReport,
) {
    let location = format!("node:{node_id}");

    require_enum(obj, "orchestration", ORCHESTRATIONS, &location, report);
    require_string(obj, "orchestration_rationale", &location, report);

    let orchestration = obj
        .get("orchestration")
        .and_then(Value::as_str)
        .unwrap_or_default();

    if orchestration == "conditional" && !obj.contains_key("condition") {
        report.add_issue(
            Severity::Warning,
            &location,
            IssueKind::Schema,
            "Conditional branch should have a 'condition' field",
        );
    }

    if orchestration == "loop" {
        match obj.get("loop_spec") {
            None => report.add_issue(
                Severity::Error,
                &location,
                IssueKind::Schema,
                "Loop branch must have a 'loop_spec' field",
            ),
            Some(spec) => validate_loop_spec(spec, &location, report),
        }
    }

    let Some(children) = obj.get("children") else {
        report.add_issue(
            Severity::Error,
            &location,
            IssueKind::Schema,
            "Branch node must have 'children' array",
        );
        return;
    };

    let Some(children) = children.as_array() else {
        report.add_issue(
            Severity::Error,
            &location,
            IssueKind::Schema,
            "'children' must be an array",
        );
        return;
    };

    let child_count = children.len();

    if child_count < MIN_CHILDREN {
        report.add_issue(
            Severity::Warning,
            &location,
            IssueKind::FanOut,
            format!("Branch has {child_count} children (minimum recommended: {MIN_CHILDREN})"),
        );
    }

    if child_count > MAX_CHILDREN {
        report.add_issue(
            Severity::Warning,
            &location,
            IssueKind::FanOut,
            format!("Branch has {child_count} children (maximum recommended: {MAX_CHILDREN})"),
        );
    }

    if child_count as u32 > report.max_fan_out {
        report.max_fan_out = child_count as u32;
    }

    // Parallel fan-out is a concurrency limit, not a readability heuristic.
    if orchestration == "parallel" && child_count > MAX_PARALLEL_FAN_OUT {
        report.add_issue(
            Severity::Error,
            &location,
            IssueKind::FanOut,
            format!("Parallel branch has {child_count} children (max parallel: {MAX_PARALLEL_FAN_OUT})"),
        );
    }

    if obj.contains_key("atom_spec") {
        report.add_issue(
            Severity::Error,
            &location,
            IssueKind::Schema,
            "Branch node must not have 'atom_spec'",
        );
    }

    for child in children {
        validate_node(child, Some(node_id), depth + 1, report);
    }
}

fn validate_atom(obj: &Map<String, Value>, location: &str, report: &mut ValidationReport) {
    match obj.get("atom_spec") {
        None => report.add_issue(
            Severity::Error,
            location,
            IssueKind::Schema,
            "Atom node must have 'atom_spec'",
        ),
        Some(spec) => validate_atom_spec(spec, location, report),
    }

    if obj.contains_key("children") {
        report.add_issue(
            Severity::Error,
            location,
            IssueKind::Schema,
            "Atom node must not have 'children'",
        );
    }
}

fn validate_atom_spec(spec: &Value, location: &str, report: &mut ValidationReport) {
    let Some(obj) = spec.as_object() else {
        report.add_issue(
            Severity::Error,
            location,
            IssueKind::Schema,
            "atom_spec must be an object",
        );
        return;
    };

    require_string(obj, "estimated_duration", location, report);
    require_string_list(obj, "inputs", location, report, true);
    require_string_list(obj, "outputs", location, report, true);
    require_string_list(obj, "error_modes", location, report, true);

    if !require_enum(obj, "execution_type", EXECUTION_TYPES, location, report) {
        return;
    }

    let exec_type = obj
        .get("execution_type")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let payload_key = match exec_type {
        "agent" => "agent_definition",
        "human" => "human_instruction",
        "tool" => "tool_invocation",
        "external" => "external_integration",
        _ => return,
    };

    let Some(payload) = obj.get(payload_key) else {
        report.add_issue(
            Severity::Error,
            location,
            IssueKind::Schema,
            format!("Atom with execution_type '{exec_type}' must have {payload_key}"),
        );
        return;
    };

    match exec_type {
        "agent" => validate_agent_definition(payload, location, report),
        "human" => validate_human_instruction(payload, location, report),
        "tool" => validate_tool_invocation(payload, location, report),
        "external" => validate_external_integration(payload, location, report),
        _ => {}
    }
}

fn validate_agent_definition(payload: &Value, location: &str, report: &mut ValidationReport) {
    let Some(obj) = payload.as_object() else {
        report.add_issue(
            Severity::Error,
            location,
            IssueKind::Schema,
            "agent_definition must be an object",
        );
        return;
    };

    require_string(obj, "name", location, report);
    require_string(obj, "description", location, report);
    require_string(obj, "prompt", location, report);
    require_string_list(obj, "tools", location, report, true);
    require_enum(obj, "model", MODEL_TIERS, location, report);
    require_string(obj, "model_rationale", location, report);

    if let Some(tools) = obj.get("tools").and_then(Value::as_array) {
        if tools.len() > MAX_TOOLS_PER_ATOM {
            report.add_issue(
                Severity::Warning,
                location,
                IssueKind::Atomicity,
                format!(
                    "Agent has {} tools (max recommended: {MAX_TOOLS_PER_ATOM}). \
                     Consider splitting into multiple agents.",
                    tools.len()
                ),
            );
        }
    }

    if let Some(prompt) = obj.get("prompt").and_then(Value::as_str) {
        let word_count = prompt.split_whitespace().count();
        if word_count > MAX_PROMPT_WORDS {
            report.add_issue(
                Severity::Warning,
                location,
                IssueKind::Atomicity,
                format!(
                    "Agent prompt is {word_count} words (max recommended: {MAX_PROMPT_WORDS}). \
                     Consider simplifying."
                ),
            );
        }
    }
}

fn validate_human_instruction(payload: &Value, location: &str, report: &mut ValidationReport) {
    let Some(obj) = payload.as_object() else {
        report.add_issue(
            Severity::Error,
            location,
            IssueKind::Schema,
            "human_instruction must be an object",
        );
        return;
    };

    require_string(obj, "action", location, report);
    require_string(obj, "context", location, report);
    require_string(obj, "decision_criteria", location, report);
    require_enum(obj, "integration_method", INTEGRATION_METHODS, location, report);
}

fn validate_tool_invocation(payload: &Value, location: &str, report: &mut ValidationReport) {
    let Some(obj) = payload.as_object() else {
        report.add_issue(
            Severity::Error,
            location,
            IssueKind::Schema,
            "tool_invocation must be an object",
        );
        return;
    };

    require_string(obj, "tool_name", location, report);
    if !obj.get("parameters").is_some_and(Value::is_object) {
        report.add_issue(
            Severity::Error,
            location,
            IssueKind::Schema,
            "tool_invocation.parameters must be an object",
        );
    }

    if obj.contains_key("retry_policy") {
        require_enum(obj, "retry_policy", RETRY_POLICIES, location, report);
    }
}

fn validate_external_integration(payload: &Value, location: &str, report: &mut ValidationReport) {
    let Some(obj) = payload.as_object() else {
        report.add_issue(
            Severity::Error,
            location,
            IssueKind::Schema,
            "external_integration must be an object",
        );
        return;
    };

    require_string(obj, "system", location, report);
    require_string(obj, "operation", location, report);
    require_enum(obj, "protocol", PROTOCOLS, location, report);
}

fn validate_loop_spec(spec: &Value, location: &str, report: &mut ValidationReport) {
    let Some(obj) = spec.as_object() else {
        report.add_issue(
            Severity::Error,
            location,
            IssueKind::Schema,
            "loop_spec must be an object",
        );
        return;
    };

    require_string(obj, "iterator", location, report);
    require_string(obj, "termination", location, report);
}

fn validate_dependencies(dependencies: &Value, report: &mut ValidationReport) {
    let Some(deps) = dependencies.as_array() else {
        report.add_issue(
            Severity::Error,
            "cross_branch_dependencies",
            IssueKind::Schema,
            "cross_branch_dependencies must be an array",
        );
        return;
    };

    for (i, dep) in deps.iter().enumerate() {
        let location = format!("dependency[{i}]");

        let Some(obj) = dep.as_object() else {
            report.add_issue(
                Severity::Error,
                &location,
                IssueKind::Schema,
                "Dependency must be an object",
            );
            continue;
        };

        require_string(obj, "from_id", &location, report);
        require_string(obj, "to_id", &location, report);
        require_enum(obj, "dependency_type", DEPENDENCY_TYPES, &location, report);
        require_string(obj, "description", &location, report);

        let from_id = obj.get("from_id").and_then(Value::as_str).unwrap_or_default();
        let to_id = obj.get("to_id").and_then(Value::as_str).unwrap_or_default();

        if !from_id.is_empty() && !report.all_node_ids.contains(from_id) {
            report.add_issue(
                Severity::Error,
                &location,
                IssueKind::Dependency,
                format!("from_id '{from_id}' does not reference a valid node"),
            );
        }

        if !to_id.is_empty() && !report.all_node_ids.contains(to_id) {
            report.add_issue(
                Severity::Error,
                &location,
                IssueKind::Dependency,
                format!("to_id '{to_id}' does not reference a valid node"),
            );
        }

        if !from_id.is_empty() && from_id == to_id {
            report.add_issue(
                Severity::Error,
                &location,
                IssueKind::Dependency,
                format!("Self-referencing dependency: '{from_id}' -> '{to_id}'"),
            );
        }

        // Edges between siblings are intra-branch; orchestration order
        // already expresses them.
        if !from_id.is_empty()
            && !to_id.is_empty()
            && report.all_node_ids.contains(from_id)
            && report.all_node_ids.contains(to_id)
        {
            let from_parts: Vec<&str> = from_id.split('.').collect();
            let to_parts: Vec<&str> = to_id.split('.').collect();
            if from_parts.len() > 1
                && to_parts.len() > 1
                && from_parts[0] == to_parts[0]
                && from_parts[..from_parts.len() - 1] == to_parts[..to_parts.len() - 1]
            {
                report.add_issue(
                    Severity::Info,
                    &location,
                    IssueKind::Dependency,
                    format!(
                        "Dependency between siblings ({from_id} -> {to_id}) -- this is \
                         intra-branch, not cross-branch. Consider using orchestration \
                         order instead."
                    ),
                );
            }
        }
    }
}

fn validate_declared_summary(summary: &Value, report: &mut ValidationReport) {
    let location = "validation_summary";
    let Some(obj) = summary.as_object() else {
        report.add_issue(
            Severity::Error,
            location,
            IssueKind::Schema,
            "validation_summary must be an object",
        );
        return;
    };

    for field in ["me_score", "ce_score", "overall_score"] {
        match obj.get(field).and_then(Value::as_f64) {
            None => {
                if obj.contains_key(field) {
                    report.add_issue(
                        Severity::Error,
                        location,
                        IssueKind::Schema,
                        format!("Field {field} must be a number"),
                    );
                } else {
                    report.add_issue(
                        Severity::Error,
                        location,
                        IssueKind::Schema,
                        format!("Missing required field: {field}"),
                    );
                }
            }
            Some(score) if !(0.0..=1.0).contains(&score) => {
                report.add_issue(
                    Severity::Warning,
                    location,
                    IssueKind::Schema,
                    format!("Field {field} value {score} is outside 0.0-1.0 range"),
                );
            }
            Some(_) => {}
        }
    }

    for field in [
        "levels_assessed",
        "total_nodes",
        "total_atoms",
        "total_branches",
        "max_depth",
        "max_fan_out",
    ] {
        match obj.get(field) {
            None => report.add_issue(
                Severity::Error,
                location,
                IssueKind::Schema,
                format!("Missing required field: {field}"),
            ),
            Some(value) if !value.is_u64() && !value.is_i64() => report.add_issue(
                Severity::Error,
                location,
                IssueKind::Schema,
                format!("Field {field} must be an integer"),
            ),
            Some(_) => {}
        }
    }

    let Some(issues) = obj.get("issues") else {
        return;
    };
    let Some(issues) = issues.as_array() else {
        report.add_issue(
            Severity::Error,
            location,
            IssueKind::Schema,
            "validation_summary.issues must be an array",
        );
        return;
    };

    for (i, issue) in issues.iter().enumerate() {
        let issue_location = format!("validation_summary.issues[{i}]");
        let Some(issue_obj) = issue.as_object() else {
            report.add_issue(
                Severity::Error,
                &issue_location,
                IssueKind::Schema,
                "Issue must be an object",
            );
            continue;
        };
        require_enum(issue_obj, "severity", SEVERITIES, &issue_location, report);
        require_string(issue_obj, "location", &issue_location, report);
        require_enum(issue_obj, "issue_type", ISSUE_TYPES, &issue_location, report);
        require_string(issue_obj, "message", &issue_location, report);
    }
}

/// Cross-checks declared summary counters against computed tree statistics.
fn cross_check_summary(summary: &Value, report: &mut ValidationReport) {
    let Some(obj) = summary.as_object() else {
        return;
    };

    let checks = [
        ("total_nodes", report.node_count),
        ("total_atoms", report.atom_count),
        ("total_branches", report.branch_count),
        ("max_depth", report.max_depth),
        ("max_fan_out", report.max_fan_out),
    ];

    for (field, computed) in checks {
        if let Some(declared) = obj.get(field).and_then(Value::as_u64) {
            if declared != u64::from(computed) {
                report.add_issue(
                    Severity::Warning,
                    "validation_summary",
                    IssueKind::Schema,
                    format!("Declared {field}={declared} does not match computed value {computed}"),
                );
            }
        }
    }
}
