use serde::{Deserialize, Serialize};
use std::io;
use tracing::debug;

/// Sink for the copy-to-clipboard action. Hosts plug in their own; sandboxed
/// contexts without clipboard permission can simply return an error, which
/// the preview swallows.
pub trait Clipboard {
    fn write(&mut self, text: &str) -> io::Result<()>;
}

/// Generated orchestration code held for display alongside its filename.
/// Pure presentation state; the export text is never parsed back in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportPreview {
    pub filename: String,
    pub code: String,
}

impl ExportPreview {
    pub fn new(filename: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            code: code.into(),
        }
    }

    /// Copies the code text to the given clipboard. Failures are swallowed;
    /// the action is non-critical.
    pub fn copy_to(&self, clipboard: &mut dyn Clipboard) {
        if let Err(e) = clipboard.write(&self.code) {
            debug!(filename = %self.filename, error = %e, "clipboard write failed; ignoring");
        }
    }
}
