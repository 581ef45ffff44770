use itertools::Itertools;
use serde_json::{Map, Value};

use super::report::ValidationReport;
use crate::model::{IssueKind, Severity};

/// Checks that `key` exists, is a string, and is non-blank.
pub(super) fn require_string(
    obj: &Map<String, Value>,
    key: &str,
    location: &str,
    report: &mut ValidationReport,
) -> bool {
    let Some(value) = obj.get(key) else {
        report.add_issue(
            Severity::Error,
            location,
            IssueKind::Schema,
            format!("Missing required field: {key}"),
        );
        return false;
    };
    let Some(s) = value.as_str() else {
        report.add_issue(
            Severity::Error,
            location,
            IssueKind::Schema,
            format!("Field {key} must be a string"),
        );
        return false;
    };
    if s.trim().is_empty() {
        report.add_issue(
            Severity::Error,
            location,
            IssueKind::Schema,
            format!("Field {key} must not be empty"),
        );
        return false;
    }
    true
}

/// Checks that `key` is a non-blank string taking one of the declared values.
pub(super) fn require_enum(
    obj: &Map<String, Value>,
    key: &str,
    valid_values: &[&str],
    location: &str,
    report: &mut ValidationReport,
) -> bool {
    if !require_string(obj, key, location, report) {
        return false;
    }
    let value = obj[key].as_str().unwrap_or_default();
    if !valid_values.contains(&value) {
        let choices = valid_values.iter().sorted().join(", ");
        report.add_issue(
            Severity::Error,
            location,
            IssueKind::Schema,
            format!("Field {key} value '{value}' not in [{choices}]"),
        );
        return false;
    }
    true
}

/// Checks that `key`, when present (or always, if required), is an array of strings.
pub(super) fn require_string_list(
    obj: &Map<String, Value>,
    key: &str,
    location: &str,
    report: &mut ValidationReport,
    required: bool,
) -> bool {
    let Some(value) = obj.get(key) else {
        if required {
            report.add_issue(
                Severity::Error,
                location,
                IssueKind::Schema,
                format!("Missing required field: {key}"),
            );
            return false;
        }
        return true;
    };
    let Some(items) = value.as_array() else {
        report.add_issue(
            Severity::Error,
            location,
            IssueKind::Schema,
            format!("Field {key} must be an array"),
        );
        return false;
    };
    for (i, item) in items.iter().enumerate() {
        if !item.is_string() {
            report.add_issue(
                Severity::Error,
                location,
                IssueKind::Schema,
                format!("Field {key}[{i}] must be a string"),
            );
            return false;
        }
    }
    true
}
