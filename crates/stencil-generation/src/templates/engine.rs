//! Template engine for rendering templates against a render context
//!
//! Provides rendering with support for:
//! - Variable interpolation with HTML escaping
//! - Sections over lists, maps and truthy values
//! - Inverted sections
//! - Helper sections, which render their content before post-processing it

use tracing::debug;

use crate::models::{EscapeMode, RenderOptions, RenderResult};
use crate::templates::{
    context::{RenderContext, Value},
    error::TemplateError,
    parser::{ParsedTemplate, TemplateElement, TemplateParser},
};

/// Template engine for rendering logic-less templates
#[derive(Debug, Clone, Default)]
pub struct TemplateEngine {
    options: RenderOptions,
}

#[derive(Default)]
struct RenderState {
    lambdas_invoked: usize,
}

impl TemplateEngine {
    /// Create a new template engine with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new template engine with custom options
    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Options used by this engine
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render template source against a context
    ///
    /// The output is only returned once the whole template rendered; any
    /// error discards everything produced so far.
    pub fn render(
        &self,
        template_content: &str,
        context: &RenderContext,
    ) -> Result<RenderResult, TemplateError> {
        let parsed = TemplateParser::parse(template_content)?;
        self.render_parsed(&parsed, context)
    }

    /// Render an already parsed template against a context
    pub fn render_parsed(
        &self,
        template: &ParsedTemplate,
        context: &RenderContext,
    ) -> Result<RenderResult, TemplateError> {
        let mut state = RenderState::default();
        let mut stack = vec![context.root()];
        let content = self.render_elements(&template.elements, &mut stack, &mut state)?;

        debug!(
            bytes = content.len(),
            lambdas = state.lambdas_invoked,
            "Rendered template"
        );

        Ok(RenderResult {
            content,
            lambdas_invoked: state.lambdas_invoked,
        })
    }

    /// Render template elements recursively
    fn render_elements<'a>(
        &self,
        elements: &[TemplateElement],
        stack: &mut Vec<&'a Value>,
        state: &mut RenderState,
    ) -> Result<String, TemplateError> {
        let mut result = String::new();

        for element in elements {
            match element {
                TemplateElement::Text(text) => result.push_str(text),
                TemplateElement::Variable { name, escaped } => {
                    let rendered = self.render_variable(name, *escaped, stack)?;
                    result.push_str(&rendered);
                }
                TemplateElement::Section {
                    name,
                    inverted: true,
                    children,
                    ..
                } => {
                    let rendered = self.render_inverted(name, children, stack, state)?;
                    result.push_str(&rendered);
                }
                TemplateElement::Section {
                    name,
                    inverted: false,
                    children,
                    raw,
                } => {
                    let rendered = self.render_section(name, children, raw, stack, state)?;
                    result.push_str(&rendered);
                }
            }
        }

        Ok(result)
    }

    fn render_variable(
        &self,
        name: &str,
        escaped: bool,
        stack: &[&Value],
    ) -> Result<String, TemplateError> {
        match lookup(name, stack) {
            None if self.options.strict => Err(TemplateError::MissingVariable(name.to_string())),
            None => Ok(String::new()),
            Some(Value::Lambda(_)) => Err(TemplateError::RenderError(format!(
                "Helper '{}' can only be used as a section: {{{{#{}}}}}...{{{{/{}}}}}",
                name, name, name
            ))),
            Some(value) => {
                let text = value.to_text();
                if escaped && self.options.escape == EscapeMode::Html {
                    Ok(escape_html(&text))
                } else {
                    Ok(text)
                }
            }
        }
    }

    fn render_section<'a>(
        &self,
        name: &str,
        children: &[TemplateElement],
        raw: &str,
        stack: &mut Vec<&'a Value>,
        state: &mut RenderState,
    ) -> Result<String, TemplateError> {
        let value = match lookup(name, stack) {
            Some(value) => value,
            None if self.options.strict => {
                return Err(TemplateError::MissingVariable(name.to_string()));
            }
            None => return Ok(String::new()),
        };

        match value {
            Value::Lambda(lambda) => {
                state.lambdas_invoked += 1;
                debug!(helper = name, "Invoking helper section");
                let mut render_inner = |text: &str| -> Result<String, TemplateError> {
                    let parsed = TemplateParser::parse(text)?;
                    self.render_elements(&parsed.elements, stack, state)
                };
                lambda.apply(raw, &mut render_inner)
            }
            Value::List(items) => {
                let mut result = String::new();
                for item in items {
                    stack.push(item);
                    let rendered = self.render_elements(children, stack, state);
                    stack.pop();
                    result.push_str(&rendered?);
                }
                Ok(result)
            }
            value if value.is_truthy() => {
                stack.push(value);
                let rendered = self.render_elements(children, stack, state);
                stack.pop();
                rendered
            }
            _ => Ok(String::new()),
        }
    }

    fn render_inverted<'a>(
        &self,
        name: &str,
        children: &[TemplateElement],
        stack: &mut Vec<&'a Value>,
        state: &mut RenderState,
    ) -> Result<String, TemplateError> {
        match lookup(name, stack) {
            Some(value) if value.is_truthy() => Ok(String::new()),
            None if self.options.strict => Err(TemplateError::MissingVariable(name.to_string())),
            _ => self.render_elements(children, stack, state),
        }
    }
}

/// Resolve a possibly dotted name against the context stack.
///
/// The first segment is searched from the innermost frame outwards; the
/// remaining segments descend from whatever it resolved to.
fn lookup<'a>(name: &str, stack: &[&'a Value]) -> Option<&'a Value> {
    if name == "." {
        return stack.last().copied();
    }

    let mut segments = name.split('.');
    let first = segments.next()?;
    let mut current = stack
        .iter()
        .rev()
        .copied()
        .find_map(|frame| frame.get(first))?;
    for segment in segments {
        current = current.get(segment)?;
    }

    Some(current)
}

/// Escape characters that are significant in HTML
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '/' => escaped.push_str("&#x2F;"),
            '`' => escaped.push_str("&#x60;"),
            '=' => escaped.push_str("&#x3D;"),
            other => escaped.push(other),
        }
    }
    escaped
}
