//! Render context: the data and helpers a template is rendered against

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::case::Case;
use crate::templates::error::TemplateError;
use crate::templates::lambda::{CaseLambda, Lambda};

/// A node of the render context tree
#[derive(Clone, Default)]
pub enum Value {
    /// Absent value
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Number
    Number(f64),
    /// String
    String(String),
    /// Ordered list
    List(Vec<Value>),
    /// Named fields
    Map(BTreeMap<String, Value>),
    /// Section helper
    Lambda(Arc<dyn Lambda>),
}

impl Value {
    /// Look up a field of a map value
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(fields) => fields.get(key),
            _ => None,
        }
    }

    /// Whether a section over this value renders its content
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(flag) => *flag,
            Value::Number(number) => *number != 0.0 && !number.is_nan(),
            Value::String(text) => !text.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(_) | Value::Lambda(_) => true,
        }
    }

    /// Text used when the value is interpolated
    pub fn to_text(&self) -> String {
        match self {
            Value::Null | Value::Map(_) | Value::Lambda(_) => String::new(),
            Value::Bool(flag) => flag.to_string(),
            Value::Number(number) => format_number(*number),
            Value::String(text) => text.clone(),
            Value::List(items) => items
                .iter()
                .map(Value::to_text)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Wrap a helper as a value
    pub fn lambda(lambda: impl Lambda + 'static) -> Self {
        Value::Lambda(Arc::new(lambda))
    }
}

fn format_number(number: f64) -> String {
    if number.is_finite() && number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(flag) => f.debug_tuple("Bool").field(flag).finish(),
            Value::Number(number) => f.debug_tuple("Number").field(number).finish(),
            Value::String(text) => f.debug_tuple("String").field(text).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Map(fields) => f.debug_tuple("Map").field(fields).finish(),
            Value::Lambda(_) => f.write_str("Lambda(..)"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Value::Map(fields)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(flag) => Value::Bool(flag),
            serde_json::Value::Number(number) => Value::Number(number.as_f64().unwrap_or_default()),
            serde_json::Value::String(text) => Value::String(text),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::Map(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Root of the tree a template is rendered against
///
/// Built once per render and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RenderContext {
    root: Value,
}

impl RenderContext {
    /// Create a context from top-level fields
    pub fn new(fields: BTreeMap<String, Value>) -> Self {
        Self {
            root: Value::Map(fields),
        }
    }

    /// Create a context from a JSON object
    pub fn from_json(value: serde_json::Value) -> Result<Self, TemplateError> {
        match Value::from(value) {
            Value::Map(fields) => Ok(Self::new(fields)),
            other => Err(TemplateError::RenderError(format!(
                "Context data must be an object, found {:?}",
                other
            ))),
        }
    }

    /// Root value of the tree
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Look up a top-level field
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.root.get(name)
    }
}

/// Assemble the standard generator context.
///
/// `provider` holds `{ name, resources }`, `owner` holds the owner name, and
/// `capitalize`, `camel` and `snake` hold the case helpers. Inputs are taken
/// as they are.
pub fn build_context<I, S>(
    provider_name: impl Into<String>,
    resources: I,
    owner: impl Into<String>,
) -> RenderContext
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ContextBuilder::new()
        .provider(provider_name)
        .resources(resources)
        .owner(owner)
        .build()
}

/// Builder for render contexts carrying more than the standard fields
#[derive(Debug, Default)]
pub struct ContextBuilder {
    provider_name: Option<String>,
    resources: Option<Vec<String>>,
    owner: Option<String>,
    values: BTreeMap<String, Value>,
    extended_helpers: bool,
}

impl ContextBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the provider name
    pub fn provider(mut self, name: impl Into<String>) -> Self {
        self.provider_name = Some(name.into());
        self
    }

    /// Set the resource identifiers, keeping their order
    pub fn resources<I, S>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources = Some(resources.into_iter().map(Into::into).collect());
        self
    }

    /// Set the owner name
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Add an arbitrary top-level value
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Add every field of a map as a top-level value
    pub fn with_values(mut self, values: BTreeMap<String, Value>) -> Self {
        self.values.extend(values);
        self
    }

    /// Register a custom section helper
    pub fn with_lambda(mut self, name: impl Into<String>, lambda: impl Lambda + 'static) -> Self {
        self.values.insert(name.into(), Value::lambda(lambda));
        self
    }

    /// Also register the pascal, kebab, shouty, upper and lower helpers
    pub fn with_extended_helpers(mut self, enabled: bool) -> Self {
        self.extended_helpers = enabled;
        self
    }

    /// Finish the context
    ///
    /// Provider fields are merged into any `provider` map supplied through
    /// [`ContextBuilder::with_value`]. The case helpers replace values of
    /// the same name.
    pub fn build(self) -> RenderContext {
        let extended = self.extended_helpers;
        let mut fields = self.values;

        if self.provider_name.is_some() || self.resources.is_some() {
            let mut provider = match fields.remove("provider") {
                Some(Value::Map(existing)) => existing,
                _ => BTreeMap::new(),
            };
            if let Some(name) = self.provider_name {
                provider.insert("name".to_string(), Value::String(name));
            }
            if let Some(resources) = self.resources {
                provider.insert("resources".to_string(), Value::from(resources));
            }
            fields.insert("provider".to_string(), Value::Map(provider));
        }

        if let Some(owner) = self.owner {
            fields.insert("owner".to_string(), Value::String(owner));
        }

        let helpers = Case::CORE
            .iter()
            .chain(Case::EXTENDED.iter().filter(|_| extended));
        for case in helpers {
            fields.insert(
                case.helper_name().to_string(),
                Value::lambda(CaseLambda::new(*case)),
            );
        }

        RenderContext::new(fields)
    }
}
