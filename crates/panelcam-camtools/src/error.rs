//! Error types for the program generator.
//!
//! Per-operation problems that leave the rest of the program runnable
//! (an unknown tool reference) are reported inline in the program text.
//! Everything here aborts generation because the input model itself is
//! invalid.

use panelcam_core::{ModelError, OperationKind, ToolId};
use panelcam_settings::ConfigError;
use thiserror::Error;

/// Errors that can occur during program generation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CamError {
    /// An operation failed validation (empty path, negative depth, ...).
    #[error("Invalid operation {} ({kind}): {source}", .index + 1)]
    InvalidOperation {
        /// Zero-based position of the operation in the input list.
        index: usize,
        kind: OperationKind,
        #[source]
        source: ModelError,
    },

    /// The panel metadata failed validation.
    #[error("Invalid panel: {0}")]
    InvalidPanel(#[source] ModelError),

    /// A tool referenced by an operation failed validation.
    #[error("Invalid tool '{id}': {source}")]
    InvalidTool {
        id: ToolId,
        #[source]
        source: ModelError,
    },

    /// A tool catalog supplied with a job failed validation.
    #[error("Invalid tool catalog: {0}")]
    InvalidCatalog(#[source] ModelError),

    /// The machine profile failed validation.
    #[error("Invalid machine profile: {0}")]
    InvalidProfile(#[from] ConfigError),
}

/// Result type alias for program generation.
pub type CamResult<T> = Result<T, CamError>;
