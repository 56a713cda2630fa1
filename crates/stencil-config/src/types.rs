//! Generator configuration types

use serde::{Deserialize, Serialize};
use stencil_generation::{EscapeMode, RenderOptions};

/// Main generator configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Provider whose resources are rendered
    pub provider: ProviderConfig,
    /// Owner name exposed to templates
    pub owner: String,
    /// HTML-escape interpolated variables
    pub escape_html: bool,
    /// Treat missing names as errors
    pub strict: bool,
    /// Register the supplementary case helpers
    pub extended_helpers: bool,
}

/// Provider section of the configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ProviderConfig {
    /// Provider display name
    pub name: String,
    /// Resource identifiers, in template order
    pub resources: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            owner: String::new(),
            escape_html: true,
            strict: false,
            extended_helpers: false,
        }
    }
}

impl GeneratorConfig {
    /// Renderer options implied by this configuration
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            escape: if self.escape_html {
                EscapeMode::Html
            } else {
                EscapeMode::None
            },
            strict: self.strict,
        }
    }
}
