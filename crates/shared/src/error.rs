use thiserror::Error;

/// Failure raised by a tool or by the registry while dispatching to one.
///
/// The `Display` text is what the model sees, so every variant carries a
/// message a user could read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// Arguments did not match the declared parameter schema.
    #[error("invalid arguments for '{tool}': {reason}")]
    InvalidArguments { tool: String, reason: String },

    /// Input was well-formed but outside the tool's domain.
    #[error("{0}")]
    Domain(String),

    /// A remote resource could not be reached or returned unusable data.
    #[error("failed to fetch data: {0}")]
    Fetch(String),

    #[error("tool '{0}' is not declared")]
    UnknownTool(String),

    #[error("tool '{0}' is declared more than once")]
    DuplicateTool(String),
}

impl ToolError {
    pub fn invalid(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain(message.into())
    }

    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }
}
