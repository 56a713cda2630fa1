//! Template loading from files

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::templates::error::TemplateError;

/// Loads template sources from storage
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateLoader;

impl TemplateLoader {
    /// Create a new template loader
    pub fn new() -> Self {
        Self
    }

    /// Read a template source file
    ///
    /// # Arguments
    /// * `path` - Path to the template file
    ///
    /// # Returns
    /// The template source, or [`TemplateError::ReadFailed`] if the file is
    /// missing or unreadable
    pub fn load(&self, path: &Path) -> Result<String, TemplateError> {
        let content = fs::read_to_string(path).map_err(|source| TemplateError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = content.len(), "Loaded template");
        Ok(content)
    }
}
