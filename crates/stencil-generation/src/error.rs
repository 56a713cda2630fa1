//! Error types for code generation

use thiserror::Error;

use crate::templates::TemplateError;

/// Errors that can occur during code generation
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Reading or rendering the template failed
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Write failed
    #[error("Write failed: {0}")]
    WriteFailed(String),
}
