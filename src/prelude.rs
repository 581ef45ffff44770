//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the mece crate. Import this
//! module to get the core parse/validate/session surface without importing
//! each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use mece::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let raw = std::fs::read_to_string("path/to/decomposition.json")?;
//! let decomposition = Decomposition::from_json(&raw)?;
//!
//! let data: serde_json::Value = serde_json::from_str(&raw)?;
//! let report = validate(&data);
//! println!("valid: {} ({} issues)", report.is_valid(), report.issues.len());
//!
//! let view = TreeViewState::new(&decomposition.tree);
//! # Ok(())
//! # }
//! ```

// Core model
pub use crate::model::{
    AtomSpec, CrossBranchDependency, Decomposition, Issue, IssueKind, Metadata, Node,
    Orchestration, Severity, ValidationSummary,
};

// Structural validation
pub use crate::validator::{ReportOutput, ValidationReport, validate};

// Streaming parse
pub use crate::stream::{Phase, StreamingParser, classify};

// Session state
pub use crate::session::{
    Clipboard, ExportPreview, NodeEdit, Session, SessionContext, TreeViewState, diff_node,
    refine_node,
};

// Tool-call boundary
pub use crate::bridge::{ToolBridge, ToolInputs, ToolResult};

// Error types
pub use crate::error::{ParseError, RefineError, ToolCallError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
