//! Logic-less template substitution
//!
//! Supported syntax:
//! - `{{name}}`, `{{{name}}}`, `{{& name}}` – variable (never escaped)
//! - `{{#name}}...{{/name}}` – section: repeated per list element, rendered once
//!   with a map or truthy scalar in scope, omitted when falsy
//! - `{{^name}}...{{/name}}` – inverted section
//! - `{{> name}}` – partial, resolved from the caller's partial set
//! - `{{! comment}}`
//!
//! Dotted names (`{{user.name}}`) and the implicit iterator `{{.}}` are
//! supported. A variable that is absent from every scope is an error rather
//! than an empty substitution.

mod parser;
mod render;

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{PromptError, Result};
use parser::Node;
use render::Renderer;

/// Named partial templates
pub type Partials = BTreeMap<String, String>;

/// A parsed template, reusable across renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self> {
        Ok(Self {
            nodes: parser::parse(source)?,
        })
    }

    pub fn render(&self, variables: &Map<String, Value>, partials: &Partials) -> Result<String> {
        let root = Value::Object(variables.clone());
        self.render_value(&root, partials)
    }

    /// Render with an arbitrary root scope
    pub fn render_value(&self, root: &Value, partials: &Partials) -> Result<String> {
        let mut out = String::new();
        Renderer::new(root, partials).render(&self.nodes, &mut out)?;
        Ok(out)
    }
}

/// Parse and render `source` in one step
pub fn render(source: &str, variables: &Map<String, Value>, partials: &Partials) -> Result<String> {
    Template::parse(source)?.render(variables, partials)
}

/// Top-level variable values must be strings, numbers, booleans, lists or maps
pub fn validate_variables(variables: &Map<String, Value>) -> Result<()> {
    match variables.iter().find(|(_, value)| value.is_null()) {
        Some((key, _)) => Err(PromptError::InvalidInput(format!(
            "Invalid value for key '{key}': null is not allowed"
        ))),
        None => Ok(()),
    }
}
