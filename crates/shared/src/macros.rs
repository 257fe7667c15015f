// crates/shared/src/macros.rs

/// Declare the tools a toolbelt struct exposes and implement [`Toolbelt`] for it.
///
/// Each entry maps a tool name to an `async fn(&self, &Value) -> Result<Value, ToolError>`
/// method on the struct. Every declared parameter is required.
///
/// [`Toolbelt`]: crate::registry::Toolbelt
#[macro_export]
macro_rules! register_toolbelt {
    (
        $toolbelt_type:ident {
            description: $toolbelt_desc:literal,
            tools: {
                $(
                    $name:literal => $method:ident {
                        description: $desc:literal,
                        params: [$($param_name:literal: $param_type:literal => $param_desc:literal),* $(,)?]
                    }
                ),* $(,)?
            }
        }
    ) => {
        impl $crate::registry::Toolbelt for $toolbelt_type {
            fn name(&self) -> &'static str {
                stringify!($toolbelt_type)
            }

            fn description(&self) -> &'static str {
                $toolbelt_desc
            }

            fn schemas(&self) -> Vec<$crate::schemas::ToolSchema> {
                vec![
                    $(
                        $crate::schemas::ToolSchema {
                            name: $name,
                            description: $desc,
                            parameters: vec![
                                $(
                                    $crate::schemas::ParameterSchema {
                                        name: $param_name,
                                        type_name: $param_type,
                                        description: $param_desc,
                                        required: true,
                                    }
                                ),*
                            ],
                        }
                    ),*
                ]
            }

            fn call<'a>(
                &'a self,
                tool: &'a str,
                args: &'a serde_json::Value,
            ) -> $crate::BoxFuture<'a, Result<serde_json::Value, $crate::ToolError>> {
                match tool {
                    $($name => Box::pin(self.$method(args)),)*
                    other => {
                        let other = other.to_string();
                        Box::pin(async move { Err($crate::ToolError::UnknownTool(other)) })
                    }
                }
            }
        }
    };
}
