pub mod error;
pub mod events;
pub mod macros;
pub mod registry;
pub mod schemas;
pub mod toolbelts;

pub use error::ToolError;
pub use events::RunItem;
pub use futures_util::future::BoxFuture;
pub use registry::{ToolRegistry, Toolbelt};
pub use schemas::{FunctionDefinition, ParameterSchema, Tool, ToolSchema};
