//! Per-session UI state: the single owned decomposition, its view state,
//! the export preview, and the streaming parser feeding them.
//!
//! The decomposition is only ever replaced wholesale (a new decomposition,
//! a validation re-run, a refinement result) or mutated through the single
//! node-refinement diff path. There are no concurrent writers; the session
//! is the sole mutator, and a new generation simply overwrites in-flight
//! streaming state when its first event arrives (last-write-wins, no
//! cancellation token).

pub mod export;
pub mod refine;
pub mod view;

pub use export::{Clipboard, ExportPreview};
pub use refine::{NodeEdit, REFINE_TOOL, diff_node, refine_node};
pub use view::TreeViewState;

use serde_json::Value;
use tracing::debug;

use crate::bridge::{ToolBridge, ToolInputs, ToolResult};
use crate::error::RefineError;
use crate::model::Decomposition;
use crate::stream::{Phase, StreamingParser};

/// Explicit correlation context passed into component calls; never ambient.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: String,
}

impl SessionContext {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }
}

pub struct Session {
    ctx: SessionContext,
    stream: StreamingParser,
    decomposition: Option<Decomposition>,
    view: Option<TreeViewState>,
    export: Option<ExportPreview>,
}

impl Session {
    pub fn new(session_id: impl Into<String>) -> Self {
        let ctx = SessionContext::new(session_id);
        let stream = StreamingParser::new(ctx.session_id.clone());
        Self {
            ctx,
            stream,
            decomposition: None,
            view: None,
            export: None,
        }
    }

    /// Feeds a partial tool-input event into the streaming parser.
    pub fn apply_partial_inputs(&mut self, inputs: &ToolInputs) -> Phase {
        self.stream.apply_partial(&inputs.decomposition)
    }

    /// Feeds the final tool-input event. On a successful strict parse the
    /// session adopts the decomposition and rebuilds the view state.
    pub fn apply_final_inputs(&mut self, inputs: &ToolInputs) -> bool {
        if self.stream.apply_complete(&inputs.decomposition) {
            let decomposition = self.stream.decomposition().cloned();
            if let Some(decomposition) = decomposition {
                self.replace(decomposition);
            }
            return true;
        }
        false
    }

    /// Applies a named tool result. Decomposition, validation, and
    /// refinement results replace the document wholesale; export results
    /// replace the preview. A payload that fails to decode retains the
    /// previous state.
    pub fn apply_result(&mut self, result: &ToolResult) {
        match result {
            ToolResult::Decomposition(_) | ToolResult::Validation(_) | ToolResult::Refinement(_) => {
                match serde_json::from_value::<Decomposition>(result.structured_content().clone()) {
                    Ok(decomposition) => self.replace(decomposition),
                    Err(e) => {
                        debug!(session = %self.ctx.session_id, error = %e, "tool result payload did not decode; retaining previous state");
                    }
                }
            }
            ToolResult::Export(body) => {
                match serde_json::from_value::<ExportPreview>(body.structured_content.clone()) {
                    Ok(preview) => self.export = Some(preview),
                    Err(e) => {
                        debug!(session = %self.ctx.session_id, error = %e, "export payload did not decode; retaining previous state");
                    }
                }
            }
        }
    }

    /// Sends a single-node edit for external reconciliation. The session's
    /// own state is untouched; the reconciled tree comes back as a
    /// refinement tool result.
    pub fn refine(
        &self,
        bridge: &dyn ToolBridge,
        node_id: &str,
        edit: &NodeEdit,
    ) -> Result<Option<Value>, RefineError> {
        let decomposition = self
            .decomposition
            .as_ref()
            .ok_or_else(|| RefineError::UnknownNode(node_id.to_string()))?;
        refine_node(bridge, &self.ctx, decomposition, node_id, edit)
    }

    fn replace(&mut self, decomposition: Decomposition) {
        self.view = Some(TreeViewState::new(&decomposition.tree));
        self.decomposition = Some(decomposition);
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    pub fn phase(&self) -> Phase {
        self.stream.phase()
    }

    pub fn decomposition(&self) -> Option<&Decomposition> {
        self.decomposition.as_ref()
    }

    pub fn view(&self) -> Option<&TreeViewState> {
        self.view.as_ref()
    }

    pub fn view_mut(&mut self) -> Option<&mut TreeViewState> {
        self.view.as_mut()
    }

    pub fn export(&self) -> Option<&ExportPreview> {
        self.export.as_ref()
    }
}
