//! # Mece - Decomposition Validation and Session Engine
//!
//! **Mece** models business-process decompositions as recursive trees of
//! branch and atom nodes (Mutually Exclusive, Collectively Exhaustive
//! components), validates their structure deterministically, and tracks the
//! UI-facing session state -- streaming parse progress, expand/select state,
//! node refinement, and export previews -- for hosts that render them.
//!
//! ## Core Workflow
//!
//! An external generation process produces decomposition JSON, optionally
//! streamed as partial fragments. The crate consumes it in three layers:
//!
//! 1.  **Stream**: feed raw payload strings to a [`stream::StreamingParser`].
//!     Partial fragments are parsed best-effort and classified into a
//!     progress [`stream::Phase`]; the final payload is parsed strictly into
//!     a typed [`model::Decomposition`].
//! 2.  **Validate**: run [`validator::validate`] over the raw JSON to get an
//!     ordered issue list plus tree statistics. Validation findings are
//!     ordinary data, not errors; the tree renders regardless.
//! 3.  **Session**: a [`session::Session`] owns the single decomposition,
//!     replaces it wholesale on each tool result, tracks expansion and
//!     selection via [`session::TreeViewState`], and sends targeted node
//!     edits back out through the [`bridge::ToolBridge`] seam.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mece::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let raw = std::fs::read_to_string("decomposition.json")?;
//!
//!     // Strict parse of a complete document
//!     let decomposition = Decomposition::from_json(&raw)?;
//!
//!     // Structural validation over the loosely-typed JSON
//!     let data: serde_json::Value = serde_json::from_str(&raw)?;
//!     let report = validate(&data);
//!     for issue in &report.issues {
//!         println!("[{}] {} ({}): {}", issue.severity, issue.location, issue.issue_type, issue.message);
//!     }
//!
//!     // View state: depth 0 and 1 branches start expanded
//!     let mut view = TreeViewState::new(&decomposition.tree);
//!     view.select(Some(decomposition.tree.id().to_string()));
//!
//!     Ok(())
//! }
//! ```

pub mod bridge;
pub mod error;
pub mod model;
pub mod prelude;
pub mod session;
pub mod stream;
pub mod validator;
