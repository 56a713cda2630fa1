//! Section helpers ("lambdas")
//!
//! A helper receives the unrendered text of its section together with a
//! callback that renders that text against the current context. The helper
//! renders first and post-processes second, so it only ever sees resolved
//! text.

use std::fmt;

use tracing::trace;

use crate::case::Case;
use crate::templates::error::TemplateError;

/// A helper invoked for `{{#name}}...{{/name}}` sections
pub trait Lambda: Send + Sync {
    /// Produce the section output from its raw text.
    ///
    /// `render` resolves template syntax in the text it is given. Errors it
    /// returns must be passed back to the caller.
    fn apply(
        &self,
        raw: &str,
        render: &mut dyn FnMut(&str) -> Result<String, TemplateError>,
    ) -> Result<String, TemplateError>;
}

/// Helper that renders its section and re-cases the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseLambda {
    case: Case,
}

impl CaseLambda {
    /// Create a helper for the given casing
    pub fn new(case: Case) -> Self {
        Self { case }
    }

    /// The casing this helper applies
    pub fn case(&self) -> Case {
        self.case
    }
}

impl Lambda for CaseLambda {
    fn apply(
        &self,
        raw: &str,
        render: &mut dyn FnMut(&str) -> Result<String, TemplateError>,
    ) -> Result<String, TemplateError> {
        let rendered = render(raw)?;
        let transformed = self.case.apply(&rendered);
        trace!(case = %self.case, input = %rendered, output = %transformed, "Applied case helper");
        Ok(transformed)
    }
}

/// Helper backed by a closure
pub struct FnLambda<F> {
    func: F,
}

impl<F> Lambda for FnLambda<F>
where
    F: Fn(&str, &mut dyn FnMut(&str) -> Result<String, TemplateError>) -> Result<String, TemplateError>
        + Send
        + Sync,
{
    fn apply(
        &self,
        raw: &str,
        render: &mut dyn FnMut(&str) -> Result<String, TemplateError>,
    ) -> Result<String, TemplateError> {
        (self.func)(raw, render)
    }
}

impl<F> fmt::Debug for FnLambda<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnLambda")
    }
}

/// Wrap a closure as a section helper
pub fn from_fn<F>(func: F) -> FnLambda<F>
where
    F: Fn(&str, &mut dyn FnMut(&str) -> Result<String, TemplateError>) -> Result<String, TemplateError>
        + Send
        + Sync,
{
    FnLambda { func }
}
