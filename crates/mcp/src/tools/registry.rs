// Tool trait, registry and JSON Schema helpers

use crate::protocol::{CallToolResult, ToolSchema};
use anyhow::Result;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with arguments already checked against its schema
    async fn execute(&self, arguments: Value) -> Result<CallToolResult>;
}

/// Tool registry for managing available tools
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Register a tool
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let schema = tool.schema();
        self.tools.insert(schema.name, tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// List all tool schemas, sorted by name
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.tools.values().map(|t| t.schema()).collect()
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a set of arguments does not fit a tool's input schema
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArgumentError {
    #[error("arguments must be a JSON object")]
    NotAnObject,

    #[error("missing required argument '{0}'")]
    Missing(String),

    #[error("argument '{0}' must not be empty")]
    Blank(String),

    #[error("argument '{name}' must be of type {expected}")]
    WrongType { name: String, expected: String },

    #[error("argument '{name}' must be one of: {allowed}")]
    NotAllowed { name: String, allowed: String },

    #[error("argument '{name}' must be at least {minimum}")]
    BelowMinimum { name: String, minimum: f64 },

    #[error("unknown argument '{0}'")]
    Unknown(String),
}

/// Check `arguments` against an object schema built with these helpers.
///
/// Absent arguments count as `{}`. Optional properties set to `null` are
/// treated as absent. Required string properties must not be blank.
pub fn validate_arguments(schema: &Value, arguments: &Value) -> Result<(), ArgumentError> {
    let empty = Map::new();
    let arguments = match arguments {
        Value::Null => &empty,
        Value::Object(map) => map,
        _ => return Err(ArgumentError::NotAnObject),
    };

    let properties = schema
        .get("properties")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    for name in &required {
        match arguments.get(*name) {
            None | Some(Value::Null) => return Err(ArgumentError::Missing(name.to_string())),
            Some(Value::String(s)) if s.trim().is_empty() => {
                return Err(ArgumentError::Blank(name.to_string()))
            }
            Some(_) => {}
        }
    }

    for (name, value) in arguments {
        let Some(property) = properties.get(name) else {
            return Err(ArgumentError::Unknown(name.clone()));
        };
        if value.is_null() && !required.contains(&name.as_str()) {
            continue;
        }
        check_value(name, property, value)?;
    }

    Ok(())
}

fn check_value(name: &str, property: &Value, value: &Value) -> Result<(), ArgumentError> {
    let expected = property.get("type").and_then(Value::as_str).unwrap_or("");

    let type_ok = match expected {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        _ => true,
    };
    if !type_ok {
        return Err(ArgumentError::WrongType {
            name: name.to_string(),
            expected: expected.to_string(),
        });
    }

    if let Some(allowed) = property.get("enum").and_then(Value::as_array) {
        if !allowed.contains(value) {
            let allowed: Vec<String> = allowed.iter().map(Value::to_string).collect();
            return Err(ArgumentError::NotAllowed {
                name: name.to_string(),
                allowed: allowed.join(", "),
            });
        }
    }

    if let (Some(minimum), Some(n)) = (
        property.get("minimum").and_then(Value::as_f64),
        value.as_f64(),
    ) {
        if n < minimum {
            return Err(ArgumentError::BelowMinimum {
                name: name.to_string(),
                minimum,
            });
        }
    }

    if let (Some(items), Some(elements)) = (property.get("items"), value.as_array()) {
        for element in elements {
            check_value(&format!("{}[]", name), items, element)?;
        }
    }

    Ok(())
}

// Helper functions for creating tool schemas

pub fn json_schema_object(properties: Value, required: Vec<&str>) -> Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}

pub fn json_schema_string(description: &str) -> Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_enum(values: &[&str], description: &str) -> Value {
    serde_json::json!({
        "type": "string",
        "enum": values,
        "description": description
    })
}

pub fn json_schema_integer(minimum: i64, description: &str) -> Value {
    serde_json::json!({
        "type": "integer",
        "minimum": minimum,
        "description": description
    })
}

pub fn json_schema_boolean(description: &str) -> Value {
    serde_json::json!({
        "type": "boolean",
        "description": description
    })
}

pub fn json_schema_array(items: Value, description: &str) -> Value {
    serde_json::json!({
        "type": "array",
        "items": items,
        "description": description
    })
}
