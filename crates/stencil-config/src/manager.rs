//! Configuration manager implementation

use std::fs;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use tracing::debug;

use crate::{
    error::{ConfigError, Result},
    types::GeneratorConfig,
};

/// Default environment variable prefix
pub const DEFAULT_ENV_PREFIX: &str = "STENCIL";

/// Configuration manager
///
/// Sources are layered in order: built-in defaults, the config file (when one
/// is configured), then environment variables. Nested keys use a double
/// underscore in the environment, e.g. `STENCIL_PROVIDER__NAME`, and
/// `STENCIL_PROVIDER__RESOURCES` takes a comma-separated list.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Create a new configuration manager reading only the environment
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }

    /// Create with custom config path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }

    /// Use a different environment prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// The configured file path, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Load the layered configuration
    pub fn load(&self) -> Result<GeneratorConfig> {
        let mut builder = Config::builder();

        if let Some(path) = &self.config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            debug!(path = %path.display(), "Loading config file");
            builder = builder.add_source(File::from(path.as_path()));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("provider.resources")
                .try_parsing(true),
        );

        let config: GeneratorConfig = builder.build()?.try_deserialize()?;
        debug!(
            provider = %config.provider.name,
            resources = config.provider.resources.len(),
            "Configuration loaded"
        );
        Ok(config)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a context data file
///
/// Files ending in `.json` are parsed as JSON, anything else as YAML. The
/// document must be a mapping; its keys become top-level context names.
pub fn load_context_file(path: &Path) -> Result<serde_json::Value> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(serde_json::Value::Object(Default::default()));
    }

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let value: serde_json::Value = if is_json {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };

    match value {
        serde_json::Value::Object(_) => Ok(value),
        serde_json::Value::Null => Ok(serde_json::Value::Object(Default::default())),
        other => Err(ConfigError::Parse(format!(
            "{}: context data must be a mapping, found {}",
            path.display(),
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "a mapping",
    }
}
