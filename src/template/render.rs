//! Rendering of parsed templates against a JSON context stack

use serde_json::Value;

use super::Partials;
use super::parser::{Node, parse};
use crate::error::{PromptError, Result};

const MAX_PARTIAL_DEPTH: usize = 32;

pub(crate) struct Renderer<'a> {
    partials: &'a Partials,
    stack: Vec<&'a Value>,
    depth: usize,
}

impl<'a> Renderer<'a> {
    pub(crate) fn new(root: &'a Value, partials: &'a Partials) -> Self {
        Self {
            partials,
            stack: vec![root],
            depth: 0,
        }
    }

    pub(crate) fn render(&mut self, nodes: &[Node], out: &mut String) -> Result<()> {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Variable(name) => {
                    let value = self.lookup(name).ok_or_else(|| {
                        PromptError::template(format!(
                            "Missing variable '{name}' referenced by template"
                        ))
                    })?;
                    write_value(value, out);
                }
                Node::Section {
                    name,
                    inverted,
                    children,
                } => {
                    let value = self.lookup(name);
                    if *inverted {
                        if !value.is_some_and(is_truthy) {
                            self.render(children, out)?;
                        }
                        continue;
                    }
                    match value {
                        Some(Value::Array(items)) => {
                            for item in items {
                                self.stack.push(item);
                                let result = self.render(children, out);
                                self.stack.pop();
                                result?;
                            }
                        }
                        Some(value) if is_truthy(value) => {
                            self.stack.push(value);
                            let result = self.render(children, out);
                            self.stack.pop();
                            result?;
                        }
                        _ => {}
                    }
                }
                Node::Partial(name) => self.render_partial(name, out)?,
            }
        }
        Ok(())
    }

    fn render_partial(&mut self, name: &str, out: &mut String) -> Result<()> {
        let source = self.partials.get(name).ok_or_else(|| {
            PromptError::template(format!("Unresolved partial '{name}'"))
        })?;
        if self.depth >= MAX_PARTIAL_DEPTH {
            return Err(PromptError::template(format!(
                "Partial '{name}' exceeds the maximum nesting depth of {MAX_PARTIAL_DEPTH}"
            )));
        }
        let nodes = parse(source)?;
        self.depth += 1;
        let result = self.render(&nodes, out);
        self.depth -= 1;
        result
    }

    /// Resolve `name` against the context stack, innermost scope first.
    /// Dotted names resolve their first segment on the stack and the rest
    /// by descending into that value.
    fn lookup(&self, name: &str) -> Option<&'a Value> {
        if name == "." {
            return self.stack.last().copied();
        }
        let mut segments = name.split('.');
        let first = segments.next()?;
        let mut value = self
            .stack
            .iter()
            .rev()
            .copied()
            .find_map(|scope| scope.as_object().and_then(|map| map.get(first)))?;
        for segment in segments {
            value = match value {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(value)
    }
}

/// Falsy values: null, false, empty string, empty list
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Number(_) | Value::Object(_) => true,
    }
}

/// Scalars render in their natural form; lists and maps render as JSON
fn write_value(value: &Value, out: &mut String) {
    match value {
        Value::Null => {}
        Value::String(s) => out.push_str(s),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::Array(_) | Value::Object(_) => out.push_str(&value.to_string()),
    }
}
