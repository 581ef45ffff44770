//! Best-effort parsing of decomposition JSON as it streams in.
//!
//! Generation happens outside this crate; partial payloads arrive as raw
//! strings that are expected to be transiently invalid JSON. The parser
//! never surfaces an error on the partial path -- unparseable input retains
//! the previous state, and an unchanged string is a no-op so callers can
//! feed every event without triggering redundant re-renders.

use std::fmt;

use serde_json::Value;
use tracing::{debug, trace};

use crate::model::Decomposition;

/// Coarse progress through an incremental generation, derived purely from
/// the shape of the last successfully parsed partial payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    MetadataOnly,
    TreeRoot,
    BuildingTree,
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::MetadataOnly => write!(f, "metadata_only"),
            Phase::TreeRoot => write!(f, "tree_root"),
            Phase::BuildingTree => write!(f, "building_tree"),
            Phase::Complete => write!(f, "complete"),
        }
    }
}

/// Classifies a parsed partial payload by how much tree structure is present.
///
/// `Complete` is never returned here; only the complete-payload path can
/// reach it.
pub fn classify(partial: &Value) -> Phase {
    let Some(obj) = partial.as_object() else {
        return Phase::Idle;
    };

    if let Some(tree) = obj.get("tree") {
        let has_children = tree
            .get("children")
            .and_then(Value::as_array)
            .is_some_and(|children| !children.is_empty());
        return if has_children {
            Phase::BuildingTree
        } else {
            Phase::TreeRoot
        };
    }

    if obj.get("metadata").is_some_and(Value::is_object) {
        return Phase::MetadataOnly;
    }

    Phase::Idle
}

/// Incremental parser for one generation session.
///
/// Holds the last raw string, the last good partial snapshot, and -- once the
/// complete payload lands -- the fully typed [`Decomposition`]. All failure
/// modes degrade to retaining the previous state.
#[derive(Debug)]
pub struct StreamingParser {
    session_id: String,
    last_raw: String,
    snapshot: Option<Value>,
    decomposition: Option<Decomposition>,
    phase: Phase,
}

impl StreamingParser {
    /// The session id is explicit context for log correlation, not ambient
    /// state.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            last_raw: String::new(),
            snapshot: None,
            decomposition: None,
            phase: Phase::Idle,
        }
    }

    /// Applies a partial payload, returning the (possibly unchanged) phase.
    ///
    /// An input identical to the last successful one short-circuits without
    /// any state update. Input that fails to parse retains the previous
    /// state silently; partial JSON is expected to be transiently invalid.
    pub fn apply_partial(&mut self, raw: &str) -> Phase {
        if raw == self.last_raw {
            return self.phase;
        }

        match serde_json::from_str::<Value>(raw) {
            Ok(value) => {
                self.phase = classify(&value);
                self.snapshot = Some(value);
                self.last_raw = raw.to_string();
            }
            Err(e) => {
                trace!(session = %self.session_id, error = %e, "partial payload not yet well-formed");
            }
        }

        self.phase
    }

    /// Applies the final, complete payload with a strict typed parse.
    ///
    /// Returns whether the payload was accepted. On failure the last good
    /// state is retained rather than corrupting the view; the failure is
    /// logged at debug level and never surfaced to the caller.
    pub fn apply_complete(&mut self, raw: &str) -> bool {
        match Decomposition::from_json(raw) {
            Ok(decomposition) => {
                self.decomposition = Some(decomposition);
                self.phase = Phase::Complete;
                self.last_raw = raw.to_string();
                true
            }
            Err(e) => {
                debug!(session = %self.session_id, error = %e, "complete payload failed to parse; retaining previous state");
                false
            }
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Last good partial snapshot, if any partial payload parsed so far.
    pub fn snapshot(&self) -> Option<&Value> {
        self.snapshot.as_ref()
    }

    /// The typed decomposition, present only after a complete payload parsed.
    pub fn decomposition(&self) -> Option<&Decomposition> {
        self.decomposition.as_ref()
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}
