//! Template engine module for code generation
//!
//! Provides template parsing, rendering, the render context and its
//! section helpers.

pub mod context;
pub mod engine;
pub mod error;
pub mod lambda;
pub mod loader;
pub mod parser;

// Re-export public API
pub use context::{build_context, ContextBuilder, RenderContext, Value};
pub use engine::{escape_html, TemplateEngine};
pub use error::TemplateError;
pub use lambda::{from_fn, CaseLambda, FnLambda, Lambda};
pub use loader::TemplateLoader;
pub use parser::{ParsedTemplate, TemplateElement, TemplateParser};
