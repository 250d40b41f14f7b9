//! Declarative tool parameter schemas and argument validation.

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::types::{McpError, McpResult, ToolDefinition};

/// JSON type accepted for a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
    /// An integer `>= 0`; rendered as `integer` with `minimum: 0`.
    NonNegativeInteger,
    Number,
    Boolean,
}

impl ParamKind {
    /// JSON Schema `type` keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Integer | ParamKind::NonNegativeInteger => "integer",
            ParamKind::Number => "number",
            ParamKind::Boolean => "boolean",
        }
    }

    fn schema(self, description: &str) -> Value {
        let mut schema = json!({ "type": self.as_str(), "description": description });
        if self == ParamKind::NonNegativeInteger {
            schema["minimum"] = json!(0);
        }
        schema
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            ParamKind::String => value.is_string(),
            ParamKind::Integer => value.is_i64() || value.is_u64(),
            ParamKind::NonNegativeInteger => value.is_u64(),
            ParamKind::Number => value.is_number(),
            ParamKind::Boolean => value.is_boolean(),
        }
    }
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamKind::NonNegativeInteger => f.write_str("non-negative integer"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// One named parameter of a tool.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    pub required: bool,
    pub description: String,
}

impl ParamSpec {
    pub fn required(name: &str, kind: ParamKind, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: true,
            description: description.to_string(),
        }
    }

    pub fn optional(name: &str, kind: ParamKind, description: &str) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind, description)
        }
    }
}

/// Name, description and parameter schema of a tool.
#[derive(Debug, Clone)]
pub struct OperationDescriptor {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
}

impl OperationDescriptor {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    fn spec(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Render as an MCP tool definition with a JSON Schema `inputSchema`.
    pub fn to_definition(&self) -> ToolDefinition {
        let mut properties = Map::new();
        for p in &self.params {
            properties.insert(p.name.clone(), p.kind.schema(&p.description));
        }
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        ToolDefinition {
            name: self.name.clone(),
            description: Some(self.description.clone()),
            input_schema: json!({
                "type": "object",
                "properties": properties,
                "required": required,
                "additionalProperties": false,
            }),
        }
    }

    /// Check raw tool arguments against the schema.
    ///
    /// Absent or `null` arguments count as an empty object. Optional
    /// parameters given `null` are dropped.
    pub fn validate(&self, raw: Option<Value>) -> McpResult<ValidatedArgs> {
        let mut args = match raw {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(McpError::validation(
                    "arguments",
                    format!("expected object, got {}", json_type(&other)),
                ))
            }
        };

        if let Some(unknown) = args.keys().find(|k| self.spec(k).is_none()) {
            return Err(McpError::validation(unknown.as_str(), "unknown parameter"));
        }

        args.retain(|_, v| !v.is_null());

        for spec in &self.params {
            match args.get(&spec.name) {
                None if spec.required => {
                    return Err(McpError::validation(
                        spec.name.as_str(),
                        "required parameter missing",
                    ))
                }
                None => {}
                Some(value) if !spec.kind.accepts(value) => {
                    return Err(McpError::validation(
                        spec.name.as_str(),
                        format!("expected {}, got {}", spec.kind, json_type(value)),
                    ))
                }
                Some(_) => {}
            }
        }

        Ok(ValidatedArgs(args))
    }
}

/// Arguments that passed schema validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedArgs(Map<String, Value>);

impl ValidatedArgs {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Convert into a tool's typed parameter struct.
    pub fn into_params<T: DeserializeOwned>(self) -> McpResult<T> {
        serde_json::from_value(Value::Object(self.0))
            .map_err(|e| McpError::validation("arguments", e.to_string()))
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
