use serde::{Deserialize, Serialize};

/// One step of an agent run, in the order it happened.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunItem {
    ToolCall {
        tool: String,
        args: serde_json::Value,
    },
    ToolResult {
        tool: String,
        output: String,
        is_error: bool,
    },
    MessageOutput {
        content: String,
    },
}

impl RunItem {
    pub fn is_error(&self) -> bool {
        matches!(self, RunItem::ToolResult { is_error: true, .. })
    }
}
