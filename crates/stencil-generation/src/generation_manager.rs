//! Generation pipeline: read a template, render it, deliver the result
//!
//! One request performs exactly one read, one render and one write, in
//! that order. Nothing is written unless rendering finished successfully.

use std::path::PathBuf;

use tracing::info;

use crate::error::GenerationError;
use crate::models::{GenerationReport, OutputTarget, RenderOptions};
use crate::output_writer::OutputWriter;
use crate::templates::{RenderContext, TemplateEngine, TemplateLoader};

/// A single render-and-emit request
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Template file to render
    pub template: PathBuf,
    /// Where to deliver the output
    pub output: OutputTarget,
    /// Context to render against
    pub context: RenderContext,
    /// Rendering options
    pub options: RenderOptions,
}

/// Drives template generation
#[derive(Debug, Clone, Default)]
pub struct GenerationManager {
    loader: TemplateLoader,
}

impl GenerationManager {
    /// Create a new generation manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Read, render and deliver one template
    pub fn generate(&self, request: GenerateRequest) -> Result<GenerationReport, GenerationError> {
        let GenerateRequest {
            template,
            output,
            context,
            options,
        } = request;

        info!(template = %template.display(), "Rendering template");
        let source = self.loader.load(&template)?;

        let rendered = TemplateEngine::with_options(options).render(&source, &context)?;

        let writer = OutputWriter::new(output.clone());
        let bytes_written = writer.write(&rendered.content)?;

        info!(
            bytes = bytes_written,
            lambdas = rendered.lambdas_invoked,
            "Generation complete"
        );

        Ok(GenerationReport {
            template,
            target: output,
            bytes_written,
            lambdas_invoked: rendered.lambdas_invoked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{build_context, TemplateError};
    use std::fs;

    fn request(template: PathBuf, output: PathBuf) -> GenerateRequest {
        GenerateRequest {
            template,
            output: OutputTarget::File(output),
            context: build_context("addy mail", vec!["mail_alias"], "AcmeCorp"),
            options: RenderOptions::default(),
        }
    }

    #[test]
    fn test_generate_writes_rendered_output() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("resource.mustache");
        let output = dir.path().join("out.txt");
        fs::write(&template, "{{#provider.resources}}{{#camel}}{{.}}{{/camel}}{{/provider.resources}}").unwrap();

        let report = GenerationManager::new()
            .generate(request(template, output.clone()))
            .unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "mailAlias");
        assert_eq!(report.bytes_written, "mailAlias".len());
        assert_eq!(report.lambdas_invoked, 1);
    }

    #[test]
    fn test_generate_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.txt");

        let result = GenerationManager::new()
            .generate(request(dir.path().join("absent.mustache"), output.clone()));

        assert!(matches!(
            result,
            Err(GenerationError::Template(TemplateError::ReadFailed { .. }))
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_generate_render_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("broken.mustache");
        let output = dir.path().join("out.txt");
        fs::write(&template, "{{owner}} {{#camel}}unclosed").unwrap();

        let result = GenerationManager::new().generate(request(template, output.clone()));

        assert!(matches!(
            result,
            Err(GenerationError::Template(TemplateError::InvalidSyntax { .. }))
        ));
        assert!(!output.exists());
    }
}
