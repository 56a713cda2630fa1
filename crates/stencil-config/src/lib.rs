//! Stencil Configuration
//!
//! Loads the generator configuration from an optional config file layered
//! under `STENCIL_`-prefixed environment variables, and reads context data
//! files (JSON or YAML) that are merged into the render context.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::{load_context_file, ConfigManager, DEFAULT_ENV_PREFIX};
pub use types::{GeneratorConfig, ProviderConfig};
