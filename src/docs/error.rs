//! Export error types.

use thiserror::Error;

/// Errors that can occur while exporting a state machine description
#[derive(Debug, Error)]
pub enum ExportError {
    /// Serialization to JSON failed
    #[error("failed to serialize state machine document: {0}")]
    Serialization(#[from] serde_json::Error),
}
