//! Error types for template loading and rendering

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading, parsing or rendering a template
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template source could not be read
    #[error("Failed to read template {}: {source}", path.display())]
    ReadFailed {
        /// Path that was being read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Invalid template syntax
    #[error("Invalid template syntax at line {line}: {message}")]
    InvalidSyntax {
        /// Line number where syntax error occurred
        line: usize,
        /// Error message describing the syntax issue
        message: String,
    },

    /// A name could not be resolved in strict mode
    #[error("Missing variable: {0}")]
    MissingVariable(String),

    /// Template rendering error
    #[error("Render error: {0}")]
    RenderError(String),

    /// A helper reported a failure of its own
    #[error("Helper '{name}' failed: {message}")]
    HelperFailed {
        /// Name of the helper
        name: String,
        /// Message reported by the helper
        message: String,
    },
}

impl TemplateError {
    /// Build a syntax error for the given line
    pub fn syntax(line: usize, message: impl Into<String>) -> Self {
        TemplateError::InvalidSyntax {
            line,
            message: message.into(),
        }
    }
}
