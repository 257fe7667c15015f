// crates/shared/src/schemas/mod.rs
use serde::Serialize;
use serde_json::{json, Value};

use crate::ToolError;

#[derive(Debug, Clone)]
pub struct ToolSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Vec<ParameterSchema>,
}

#[derive(Debug, Clone)]
pub struct ParameterSchema {
    pub name: &'static str,
    pub type_name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

#[derive(Serialize, Clone, Debug)]
pub struct Tool {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionDefinition,
}

#[derive(Serialize, Clone, Debug)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolSchema {
    pub fn to_tool(&self) -> Tool {
        let mut properties = json!({});
        let mut required = vec![];

        for param in &self.parameters {
            properties[param.name] = json!({
                "type": param.type_name,
                "description": param.description
            });
            if param.required {
                required.push(param.name);
            }
        }

        Tool {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: self.name.to_string(),
                description: self.description.to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": properties,
                    "required": required
                }),
            },
        }
    }

    /// Check an argument mapping against the declared parameters.
    ///
    /// Unknown extra keys are tolerated; the model sometimes adds them.
    pub fn validate(&self, args: &Value) -> Result<(), ToolError> {
        let Some(map) = args.as_object() else {
            return Err(ToolError::invalid(self.name, "arguments must be a JSON object"));
        };

        for param in &self.parameters {
            match map.get(param.name) {
                None | Some(Value::Null) if param.required => {
                    return Err(ToolError::invalid(
                        self.name,
                        format!("missing required parameter '{}'", param.name),
                    ));
                }
                None | Some(Value::Null) => {}
                Some(value) if !param.accepts(value) => {
                    return Err(ToolError::invalid(
                        self.name,
                        format!("parameter '{}' must be of type {}", param.name, param.type_name),
                    ));
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

impl ParameterSchema {
    pub fn accepts(&self, value: &Value) -> bool {
        match self.type_name {
            "number" => value.is_number(),
            "integer" => value.is_i64() || value.is_u64(),
            "string" => value.is_string(),
            "boolean" => value.is_boolean(),
            "array" => value.is_array(),
            "object" => value.is_object(),
            _ => true,
        }
    }
}

/// Read a numeric argument that `validate` has already checked.
pub fn number_arg(tool: &str, args: &Value, name: &str) -> Result<f64, ToolError> {
    args[name]
        .as_f64()
        .ok_or_else(|| ToolError::invalid(tool, format!("parameter '{}' must be a number", name)))
}

pub fn string_arg<'a>(tool: &str, args: &'a Value, name: &str) -> Result<&'a str, ToolError> {
    args[name]
        .as_str()
        .ok_or_else(|| ToolError::invalid(tool, format!("parameter '{}' must be a string", name)))
}
