use std::sync::Arc;

use anyhow::{anyhow, Result};
use conduit_shared::{RunItem, ToolError, ToolRegistry};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::DEFAULT_MAX_TURNS;
use crate::provider::{Model, ResponseMessage};
use crate::{Message, ToolCall};

/// A hosted model plus the tools it may call and the instructions it runs under.
pub struct Agent {
    name: String,
    instructions: String,
    model: Arc<dyn Model>,
    tools: ToolRegistry,
    max_turns: usize,
}

/// Outcome of one user query.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub final_output: String,
    pub new_items: Vec<RunItem>,
    /// Number of model calls the run took.
    pub turns: usize,
}

enum Turn {
    AwaitingModelResponse,
    ToolExecutionNeeded(Vec<ToolCall>),
    FinalAnswerReady(String),
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        instructions: impl Into<String>,
        model: Arc<dyn Model>,
        tools: ToolRegistry,
    ) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            model,
            tools,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn model(&self) -> &Arc<dyn Model> {
        &self.model
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Run one query to completion: call the model, execute any tools it asks
    /// for, feed the results back, and stop at the first reply without tool calls.
    pub async fn run(&self, input: &str) -> Result<RunResult> {
        let tools = self.tools.get_tools();
        let mut messages = vec![Message::system(self.instructions.trim()), Message::user(input)];
        let mut new_items = Vec::new();
        let mut turns = 0;
        let mut turn = Turn::AwaitingModelResponse;

        loop {
            turn = match turn {
                Turn::AwaitingModelResponse => {
                    if turns == self.max_turns {
                        return Err(anyhow!(
                            "{} exceeded the maximum of {} turns without a final answer",
                            self.name,
                            self.max_turns
                        ));
                    }
                    turns += 1;

                    let response = self.model.complete(&messages, &tools).await?;
                    messages.push(response.to_message());
                    next_turn(response, &mut new_items)
                }
                Turn::ToolExecutionNeeded(calls) => {
                    for call in calls {
                        let message = self.execute_tool_call(&call, &mut new_items).await;
                        messages.push(message);
                    }
                    Turn::AwaitingModelResponse
                }
                Turn::FinalAnswerReady(final_output) => {
                    return Ok(RunResult {
                        final_output,
                        new_items,
                        turns,
                    });
                }
            };
        }
    }

    /// Execute one requested call. Failures become the tool's reply so the
    /// model can explain them; they never abort the run.
    async fn execute_tool_call(&self, call: &ToolCall, items: &mut Vec<RunItem>) -> Message {
        let tool = &call.function.name;

        let outcome = match call.parsed_arguments() {
            Ok(args) => {
                info!("[Calling tool: {} with args: {}]", tool, args);
                items.push(RunItem::ToolCall {
                    tool: tool.clone(),
                    args: args.clone(),
                });
                self.tools.use_tool(tool, &args).await
            }
            Err(e) => {
                items.push(RunItem::ToolCall {
                    tool: tool.clone(),
                    args: Value::String(call.function.arguments.clone()),
                });
                Err(ToolError::invalid(tool.as_str(), format!("arguments are not valid JSON: {}", e)))
            }
        };

        let (output, is_error) = match outcome {
            Ok(value) => (value.to_string(), false),
            Err(e) => {
                if matches!(e, ToolError::UnknownTool(_)) {
                    warn!("model requested undeclared tool '{}'", tool);
                } else {
                    warn!("tool '{}' failed: {}", tool, e);
                }
                (format!("Error: {}", e), true)
            }
        };

        info!("[Tool result: {}]", output);
        items.push(RunItem::ToolResult {
            tool: tool.clone(),
            output: output.clone(),
            is_error,
        });

        Message::tool(call.id.clone(), output)
    }
}

fn next_turn(response: ResponseMessage, items: &mut Vec<RunItem>) -> Turn {
    let content = response.content.unwrap_or_default();
    if !content.trim().is_empty() {
        items.push(RunItem::MessageOutput {
            content: content.clone(),
        });
    }

    match response.tool_calls {
        Some(calls) if !calls.is_empty() => Turn::ToolExecutionNeeded(calls),
        _ => Turn::FinalAnswerReady(content),
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("model", &self.model.name())
            .field("tools", &self.tools)
            .field("max_turns", &self.max_turns)
            .finish()
    }
}
