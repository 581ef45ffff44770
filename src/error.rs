use thiserror::Error;

/// Errors from the strict, terminal-payload parse path.
#[derive(Error, Debug, Clone)]
pub enum ParseError {
    #[error("Failed to parse decomposition JSON: {0}")]
    Json(String),
}

/// Errors crossing the produced tool-call boundary.
#[derive(Error, Debug, Clone)]
pub enum ToolCallError {
    #[error("Tool call '{name}' was rejected: {message}")]
    Rejected { name: String, message: String },

    #[error("Tool call transport failed: {0}")]
    Transport(String),
}

/// Errors from the node-refinement path.
#[derive(Error, Debug, Clone)]
pub enum RefineError {
    #[error("Node '{0}' not found in the current tree")]
    UnknownNode(String),

    #[error("Refinement tool call failed: {0}")]
    ToolCall(#[from] ToolCallError),

    #[error("Failed to serialize the current tree: {0}")]
    Serialize(String),
}
