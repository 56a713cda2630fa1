#![warn(missing_docs)]

//! Template generation for stencil
//!
//! Renders logic-less (Mustache-style) templates against a render context
//! made of plain data and section helpers. The standard helpers re-case
//! identifiers (`capitalize`, `camel`, `snake`), which is how resource and
//! schema definitions are produced from a provider's resource list.

pub mod case;
pub mod error;
pub mod generation_manager;
pub mod models;
pub mod output_writer;
pub mod templates;

// Re-export public API
pub use case::{split_words, to_camel_case, to_snake_case, to_title_case, Case};
pub use error::GenerationError;
pub use generation_manager::{GenerateRequest, GenerationManager};
pub use models::{EscapeMode, GenerationReport, OutputTarget, RenderOptions, RenderResult};
pub use output_writer::OutputWriter;
pub use templates::{
    build_context, from_fn, CaseLambda, ContextBuilder, Lambda, ParsedTemplate, RenderContext,
    TemplateElement, TemplateEngine, TemplateError, TemplateLoader, TemplateParser, Value,
};
