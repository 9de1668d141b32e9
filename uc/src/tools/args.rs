//! Parameter declarations and argument coercion
//!
//! Models send arguments as loosely-typed JSON. Each tool declares its
//! parameters once; [`ToolArgs::coerce`] turns the raw JSON into values of the
//! declared types before the tool runs.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use super::ToolError;

/// Semantic type of a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Float,
    String,
}

impl ParamType {
    fn json_type(self) -> &'static str {
        match self {
            ParamType::Float => "number",
            ParamType::String => "string",
        }
    }
}

/// A declared tool parameter (all parameters are required)
#[derive(Debug, Clone, Copy)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamType,
    pub description: &'static str,
}

impl Param {
    pub const fn float(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: ParamType::Float,
            description,
        }
    }

    pub const fn string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: ParamType::String,
            description,
        }
    }
}

/// Build the JSON Schema object advertised to the model
pub(crate) fn schema_for(params: &[Param]) -> Value {
    let properties: serde_json::Map<String, Value> = params
        .iter()
        .map(|p| {
            (
                p.name.to_string(),
                serde_json::json!({ "type": p.kind.json_type(), "description": p.description }),
            )
        })
        .collect();
    let required: Vec<&str> = params.iter().map(|p| p.name).collect();

    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// A coerced argument value
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Float(f64),
    Text(String),
}

/// Arguments of one tool call, coerced to the declared parameter types
#[derive(Debug, Clone, Default)]
pub struct ToolArgs {
    values: HashMap<&'static str, ArgValue>,
}

impl ToolArgs {
    /// Coerce raw JSON arguments against the declared parameters
    ///
    /// Floats accept JSON numbers or numeric strings; strings accept JSON
    /// strings only. Undeclared keys are ignored.
    pub fn coerce(params: &[Param], input: &Value) -> Result<Self, ToolError> {
        debug!(param_count = params.len(), "ToolArgs::coerce: called");
        let object = input.as_object().ok_or_else(|| ToolError::InvalidArgument {
            name: "arguments".to_string(),
            reason: "expected a JSON object".to_string(),
        })?;

        let mut values = HashMap::with_capacity(params.len());
        for param in params {
            let raw = match object.get(param.name) {
                Some(Value::Null) | None => return Err(ToolError::MissingArgument(param.name.to_string())),
                Some(raw) => raw,
            };
            let value = match param.kind {
                ParamType::Float => ArgValue::Float(coerce_float(param.name, raw)?),
                ParamType::String => ArgValue::Text(coerce_string(param.name, raw)?),
            };
            values.insert(param.name, value);
        }

        Ok(Self { values })
    }

    /// Fetch a float argument
    pub fn float(&self, name: &str) -> Result<f64, ToolError> {
        match self.values.get(name) {
            Some(ArgValue::Float(v)) => Ok(*v),
            Some(ArgValue::Text(_)) => Err(ToolError::InvalidArgument {
                name: name.to_string(),
                reason: "expected a number".to_string(),
            }),
            None => Err(ToolError::MissingArgument(name.to_string())),
        }
    }

    /// Fetch a string argument
    pub fn text(&self, name: &str) -> Result<&str, ToolError> {
        match self.values.get(name) {
            Some(ArgValue::Text(s)) => Ok(s),
            Some(ArgValue::Float(_)) => Err(ToolError::InvalidArgument {
                name: name.to_string(),
                reason: "expected a string".to_string(),
            }),
            None => Err(ToolError::MissingArgument(name.to_string())),
        }
    }
}

fn coerce_float(name: &str, raw: &Value) -> Result<f64, ToolError> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).ok_or_else(|| ToolError::InvalidArgument {
        name: name.to_string(),
        reason: format!("expected a number, got {}", raw),
    })
}

fn coerce_string(name: &str, raw: &Value) -> Result<String, ToolError> {
    match raw {
        Value::String(s) => Ok(s.clone()),
        other => Err(ToolError::InvalidArgument {
            name: name.to_string(),
            reason: format!("expected a string, got {}", other),
        }),
    }
}
