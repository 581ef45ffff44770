//! Types crossing the host tool-call boundary.
//!
//! Decomposition data arrives as named tool results discriminated on `type`;
//! incremental tool-input events carry the decomposition as a JSON-encoded
//! string. The produced side goes through the [`ToolBridge`] seam so hosts
//! (and tests) supply their own transport.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ToolCallError;

/// A named tool result received from the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolResult {
    Decomposition(ToolResultBody),
    Validation(ToolResultBody),
    Refinement(ToolResultBody),
    Export(ToolResultBody),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResultBody {
    #[serde(rename = "structuredContent")]
    pub structured_content: Value,
}

impl ToolResult {
    pub fn structured_content(&self) -> &Value {
        match self {
            ToolResult::Decomposition(body)
            | ToolResult::Validation(body)
            | ToolResult::Refinement(body)
            | ToolResult::Export(body) => &body.structured_content,
        }
    }
}

/// Tool-input event shape, used by both the partial and the final event.
/// The `decomposition` field is itself a JSON-encoded string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInputs {
    pub decomposition: String,
}

/// The produced side of the tool-call boundary.
///
/// Refinement issues its `mece-refine-node` call through this trait; the
/// host decides how the call actually travels. Implement it on whatever
/// handle your host exposes:
///
/// ```rust,no_run
/// use mece::bridge::ToolBridge;
/// use mece::error::ToolCallError;
/// use serde_json::Value;
///
/// struct HostBridge;
///
/// impl ToolBridge for HostBridge {
///     fn call(&self, name: &str, args: &Value) -> Result<Value, ToolCallError> {
///         // Forward to the host's tool-call transport here.
///         Err(ToolCallError::Transport(format!("no transport for '{name}'")))
///     }
/// }
/// ```
pub trait ToolBridge {
    fn call(&self, name: &str, args: &Value) -> Result<Value, ToolCallError>;
}
