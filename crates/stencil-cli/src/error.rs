// CLI error types and user-facing messages

use stencil_config::ConfigError;
use stencil_generation::{GenerationError, TemplateError};
use thiserror::Error;

use crate::logging::VerbosityLevel;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),
}

impl CliError {
    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::Io(e) => {
                format!("File operation failed: {}", e)
            }
            CliError::Config(e) => {
                format!(
                    "Configuration error: {}\n\nCheck the --config file and any STENCIL_* environment variables.",
                    e
                )
            }
            CliError::Generation(GenerationError::Template(TemplateError::ReadFailed {
                path,
                source,
            })) => {
                format!("Could not read template '{}': {}", path.display(), source)
            }
            CliError::Generation(GenerationError::Template(e)) => {
                format!("Template rendering failed: {}\n\nNo output was written.", e)
            }
            CliError::Generation(e) => {
                format!("Could not write output: {}", e)
            }
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Get technical details for verbose mode
    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }

    /// Message printed when a command fails, with technical details appended
    /// at verbose level
    pub fn report(&self, level: VerbosityLevel) -> String {
        if level >= VerbosityLevel::Verbose {
            format!("{}\n\nDetails: {}", self.user_message(), self.technical_details())
        } else {
            self.user_message()
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
