use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::schemas::{Tool, ToolSchema};
use crate::{BoxFuture, ToolError};

/// A group of related tools. Implemented through `register_toolbelt!`.
pub trait Toolbelt: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn schemas(&self) -> Vec<ToolSchema>;
    fn call<'a>(&'a self, tool: &'a str, args: &'a Value)
        -> BoxFuture<'a, Result<Value, ToolError>>;
}

/// The fixed set of tools an agent may offer the model.
///
/// Built once at startup and read-only afterwards.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    toolbelts: Vec<Arc<dyn Toolbelt>>,
    schemas: Vec<ToolSchema>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every tool of `toolbelt`. Tool names must be unique across the registry.
    pub fn register(mut self, toolbelt: impl Toolbelt + 'static) -> Result<Self, ToolError> {
        let toolbelt: Arc<dyn Toolbelt> = Arc::new(toolbelt);
        let slot = self.toolbelts.len();

        for schema in toolbelt.schemas() {
            if self.index.insert(schema.name, slot).is_some() {
                return Err(ToolError::DuplicateTool(schema.name.to_string()));
            }
            self.schemas.push(schema);
        }

        self.toolbelts.push(toolbelt);
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn toolbelt_names(&self) -> Vec<&'static str> {
        self.toolbelts.iter().map(|t| t.name()).collect()
    }

    /// One line per toolbelt: its name, description and tool names.
    pub fn describe(&self) -> Vec<String> {
        self.toolbelts
            .iter()
            .map(|t| {
                let tools: Vec<_> = t.schemas().iter().map(|s| s.name).collect();
                format!("{}: {} ({})", t.name(), t.description(), tools.join(", "))
            })
            .collect()
    }

    /// Validate `args` against the tool's schema, then run it.
    pub async fn use_tool(&self, name: &str, args: &Value) -> Result<Value, ToolError> {
        let slot = *self
            .index
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        self.get_tool_schema(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?
            .validate(args)?;

        self.toolbelts[slot].call(name, args).await
    }

    pub fn get_tools(&self) -> Vec<Tool> {
        self.schemas.iter().map(|s| s.to_tool()).collect()
    }

    pub fn get_tool_schema(&self, name: &str) -> Option<&ToolSchema> {
        self.schemas.iter().find(|s| s.name == name)
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("toolbelts", &self.toolbelt_names())
            .field("tools", &self.schemas.iter().map(|s| s.name).collect::<Vec<_>>())
            .finish()
    }
}
