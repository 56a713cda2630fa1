//! Output writer for rendered templates
//!
//! Output is always delivered in one piece. File targets are written to a
//! temporary file next to the destination and renamed over it, so a failed
//! write never leaves a partial file behind.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::GenerationError;
use crate::models::OutputTarget;

/// Writes rendered output to its target
#[derive(Debug, Clone)]
pub struct OutputWriter {
    target: OutputTarget,
    create_dirs: bool,
}

impl OutputWriter {
    /// Create a writer for the given target
    pub fn new(target: OutputTarget) -> Self {
        Self {
            target,
            create_dirs: true,
        }
    }

    /// Whether missing parent directories of a file target are created
    pub fn with_create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }

    /// The configured target
    pub fn target(&self) -> &OutputTarget {
        &self.target
    }

    /// Deliver `content` to the target, returning the number of bytes written
    pub fn write(&self, content: &str) -> Result<usize, GenerationError> {
        match &self.target {
            OutputTarget::Stdout => {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                self.write_to(&mut handle, content)
            }
            OutputTarget::File(path) => self.write_file(path, content),
        }
    }

    /// Deliver `content` to an arbitrary writer
    pub fn write_to<W: Write>(&self, writer: &mut W, content: &str) -> Result<usize, GenerationError> {
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        Ok(content.len())
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<usize, GenerationError> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        if self.create_dirs && !parent.exists() {
            fs::create_dir_all(parent)?;
        }

        let mut staged = NamedTempFile::new_in(parent)?;
        staged.write_all(content.as_bytes())?;
        staged.flush()?;
        staged.persist(path).map_err(|e| {
            GenerationError::WriteFailed(format!("{}: {}", path.display(), e.error))
        })?;

        debug!(path = %path.display(), bytes = content.len(), "Wrote output file");
        Ok(content.len())
    }
}
