pub mod agent;
pub mod config;
pub mod logging;
pub mod provider;
pub mod ui;

use serde::{Deserialize, Serialize};

pub use agent::{Agent, RunResult};
pub use provider::{ChatCompletionsModel, GeminiProvider, Model, ModelProvider, ResponseMessage};

/// One entry of the conversation sent to the model, in chat-completions shape.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Message {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ToolCall {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default = "function_type")]
    pub call_type: String,
    pub function: FunctionCall,
}

/// `arguments` is the JSON-encoded argument object exactly as the model produced it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

fn function_type() -> String {
    "function".to_string()
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self::text("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::text("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::text("assistant", content)
    }

    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: "tool".to_string(),
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.into()),
        }
    }

    fn text(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            call_type: function_type(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }

    /// Decode the argument string. An empty string means no arguments.
    pub fn parsed_arguments(&self) -> serde_json::Result<serde_json::Value> {
        let raw = self.function.arguments.trim();
        if raw.is_empty() {
            return Ok(serde_json::json!({}));
        }
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tool_message_carries_call_id() {
        let value = serde_json::to_value(Message::tool("call_1", "15.0")).unwrap();
        assert_eq!(value, json!({"role": "tool", "content": "15.0", "tool_call_id": "call_1"}));
    }

    #[test]
    fn user_message_omits_empty_fields() {
        let value = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(value, json!({"role": "user", "content": "hi"}));
    }

    #[test]
    fn tool_call_defaults_missing_id_and_type() {
        let call: ToolCall =
            serde_json::from_value(json!({"function": {"name": "add", "arguments": "{\"a\":1,\"b\":2}"}}))
                .unwrap();
        assert_eq!(call.id, "");
        assert_eq!(call.call_type, "function");
        assert_eq!(call.parsed_arguments().unwrap(), json!({"a": 1, "b": 2}));
    }

    #[test]
    fn empty_arguments_decode_to_empty_object() {
        let call = ToolCall::new("c", "list", "  ");
        assert_eq!(call.parsed_arguments().unwrap(), json!({}));
        assert!(ToolCall::new("c", "add", "{oops").parsed_arguments().is_err());
    }
}
