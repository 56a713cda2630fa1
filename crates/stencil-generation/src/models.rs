//! Data models shared by the renderer and the generation pipeline

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How interpolated variables are escaped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapeMode {
    /// Escape HTML-significant characters in `{{name}}` tags
    #[default]
    Html,
    /// Emit values verbatim
    None,
}

/// Options for template rendering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Escaping applied to `{{name}}` tags
    pub escape: EscapeMode,
    /// Whether names missing from the context are an error
    pub strict: bool,
}

impl RenderOptions {
    /// Options that emit values verbatim
    pub fn unescaped() -> Self {
        Self {
            escape: EscapeMode::None,
            ..Self::default()
        }
    }

    /// Set strict mode
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Result of template rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderResult {
    /// Rendered content
    pub content: String,
    /// Number of helper sections that were invoked
    pub lambdas_invoked: usize,
}

/// Where rendered output is delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Standard output
    Stdout,
    /// A file, replaced atomically
    File(PathBuf),
}

/// Summary of one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Template that was rendered
    pub template: PathBuf,
    /// Where the output went
    pub target: OutputTarget,
    /// Number of bytes delivered
    pub bytes_written: usize,
    /// Number of helper sections that were invoked
    pub lambdas_invoked: usize,
}
