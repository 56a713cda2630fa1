// Render a template file against the generator context

use std::collections::BTreeMap;
use std::path::PathBuf;

use stencil_config::{load_context_file, ConfigManager, GeneratorConfig, DEFAULT_ENV_PREFIX};
use stencil_generation::{
    Case, ContextBuilder, GenerateRequest, GenerationManager, GenerationReport, OutputTarget,
    RenderContext, Value,
};
use tracing::debug;

use super::Command;
use crate::error::{CliError, CliResult};
use crate::output::{self, OutputStyle};

/// Render one template to stdout or a file
#[derive(Debug, Clone)]
pub struct RenderCommand {
    template: PathBuf,
    output: Option<PathBuf>,
    provider: Option<String>,
    resources: Vec<String>,
    owner: Option<String>,
    context_file: Option<PathBuf>,
    config_path: Option<PathBuf>,
    env_prefix: String,
    no_escape: bool,
    strict: bool,
    extended_helpers: bool,
}

impl RenderCommand {
    pub fn new(template: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
            output: None,
            provider: None,
            resources: Vec::new(),
            owner: None,
            context_file: None,
            config_path: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            no_escape: false,
            strict: false,
            extended_helpers: false,
        }
    }

    /// Write to a file instead of stdout
    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    /// Override the configured provider name
    pub fn with_provider(mut self, provider: Option<String>) -> Self {
        self.provider = provider;
        self
    }

    /// Override the configured resources; an empty list keeps the configured ones
    pub fn with_resources(mut self, resources: Vec<String>) -> Self {
        self.resources = resources;
        self
    }

    /// Override the configured owner
    pub fn with_owner(mut self, owner: Option<String>) -> Self {
        self.owner = owner;
        self
    }

    /// Merge a JSON or YAML data file into the context
    pub fn with_context_file(mut self, path: Option<PathBuf>) -> Self {
        self.context_file = path;
        self
    }

    /// Read configuration from this file
    pub fn with_config(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Read configuration overrides from environment variables with this prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn with_no_escape(mut self, no_escape: bool) -> Self {
        self.no_escape = no_escape;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_extended_helpers(mut self, extended_helpers: bool) -> Self {
        self.extended_helpers = extended_helpers;
        self
    }

    /// Load the configuration and apply command-line overrides
    pub fn resolve_config(&self) -> CliResult<GeneratorConfig> {
        let manager = match &self.config_path {
            Some(path) => ConfigManager::with_path(path.clone()),
            None => ConfigManager::new(),
        };
        let mut config = manager.with_env_prefix(self.env_prefix.clone()).load()?;

        if let Some(provider) = &self.provider {
            config.provider.name = provider.clone();
        }
        if !self.resources.is_empty() {
            config.provider.resources = self.resources.clone();
        }
        if let Some(owner) = &self.owner {
            config.owner = owner.clone();
        }
        if self.no_escape {
            config.escape_html = false;
        }
        if self.strict {
            config.strict = true;
        }
        if self.extended_helpers {
            config.extended_helpers = true;
        }

        Ok(config)
    }

    /// Build the render context for a resolved configuration
    pub fn build_context(&self, config: &GeneratorConfig) -> CliResult<RenderContext> {
        let mut builder = ContextBuilder::new();

        if let Some(path) = &self.context_file {
            let data = load_context_file(path)?;
            if let Value::Map(fields) = Value::from(data) {
                warn_shadowed_keys(&fields, config.extended_helpers);
                builder = builder.with_values(fields);
            }
        }

        Ok(builder
            .provider(config.provider.name.clone())
            .resources(config.provider.resources.clone())
            .owner(config.owner.clone())
            .with_extended_helpers(config.extended_helpers)
            .build())
    }

    /// Run the full read, render and write pipeline
    pub fn run(&self) -> CliResult<GenerationReport> {
        let config = self.resolve_config()?;
        debug!(?config, "Resolved generator configuration");

        let context = self.build_context(&config)?;
        let output = match &self.output {
            Some(path) => OutputTarget::File(path.clone()),
            None => OutputTarget::Stdout,
        };

        let request = GenerateRequest {
            template: self.template.clone(),
            output,
            context,
            options: config.render_options(),
        };

        GenerationManager::new()
            .generate(request)
            .map_err(CliError::from)
    }
}

fn warn_shadowed_keys(fields: &BTreeMap<String, Value>, extended_helpers: bool) {
    let helpers = Case::CORE
        .iter()
        .chain(Case::EXTENDED.iter().filter(|_| extended_helpers));
    for case in helpers {
        if fields.contains_key(case.helper_name()) {
            output::print_warning(&format!(
                "Context key '{}' is shadowed by the built-in helper of the same name",
                case.helper_name()
            ));
        }
    }
}

impl Command for RenderCommand {
    fn execute(&self) -> CliResult<()> {
        let report = self.run()?;

        if let OutputTarget::File(path) = &report.target {
            let style = OutputStyle::default();
            output::print_success(&format!(
                "Wrote {} bytes to {}",
                report.bytes_written,
                style.code(&path.display().to_string())
            ));
        }

        Ok(())
    }
}
