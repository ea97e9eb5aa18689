//! Tool definition types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Provider-independent function definition attached to a template
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolSchema {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// JSON-schema object describing the function parameters
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl ToolSchema {
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// Tool with an empty parameter object
    pub fn without_parameters(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, Map::new())
    }

    /// Parameters as a JSON value
    pub fn parameters_value(&self) -> Value {
        Value::Object(self.parameters.clone())
    }

    /// A schema without a name cannot be called by any provider
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
    }
}
