use serde_json::{json, Value};
use tracing::info;

use crate::schemas::number_arg;
use crate::{register_toolbelt, ToolError};

/// Pure arithmetic. Results are plain JSON numbers.
#[derive(Debug, Default, Clone, Copy)]
pub struct Calculator;

register_toolbelt! {
    Calculator {
        description: "Basic arithmetic, powers and roots",
        tools: {
            "add" => add {
                description: "Add two numbers. Returns the sum of a and b.",
                params: [
                    "a": "number" => "First number",
                    "b": "number" => "Second number"
                ]
            },
            "subtract" => subtract {
                description: "Subtract two numbers. Returns the difference a - b.",
                params: [
                    "a": "number" => "First number",
                    "b": "number" => "Second number"
                ]
            },
            "multiply" => multiply {
                description: "Multiply two numbers. Returns the product of a and b.",
                params: [
                    "a": "number" => "First number",
                    "b": "number" => "Second number"
                ]
            },
            "divide" => divide {
                description: "Divide two numbers. Returns the quotient a / b, or an error when dividing by zero.",
                params: [
                    "a": "number" => "Numerator",
                    "b": "number" => "Denominator"
                ]
            },
            "square" => square {
                description: "Return the square of a number.",
                params: ["n": "number" => "Number to square"]
            },
            "cube" => cube {
                description: "Return the cube of a number.",
                params: ["n": "number" => "Number to cube"]
            },
            "sqrt" => sqrt {
                description: "Return the square root of a number. Negative numbers are rejected.",
                params: ["n": "number" => "Number to find the square root of"]
            },
            "power" => power {
                description: "Raise a number to a power. Returns base raised to the power of exponent.",
                params: [
                    "base": "number" => "Base number",
                    "exponent": "number" => "Exponent"
                ]
            }
        }
    }
}

impl Calculator {
    async fn add(&self, args: &Value) -> Result<Value, ToolError> {
        let (a, b) = pair("add", args, "a", "b")?;
        info!("Adding numbers: {} + {}", a, b);
        number(a + b)
    }

    async fn subtract(&self, args: &Value) -> Result<Value, ToolError> {
        let (a, b) = pair("subtract", args, "a", "b")?;
        info!("Subtracting numbers: {} - {}", a, b);
        number(a - b)
    }

    async fn multiply(&self, args: &Value) -> Result<Value, ToolError> {
        let (a, b) = pair("multiply", args, "a", "b")?;
        info!("Multiplying numbers: {} * {}", a, b);
        number(a * b)
    }

    async fn divide(&self, args: &Value) -> Result<Value, ToolError> {
        let (a, b) = pair("divide", args, "a", "b")?;
        info!("Dividing numbers: {} / {}", a, b);
        if b == 0.0 {
            return Err(ToolError::domain("cannot divide by zero"));
        }
        number(a / b)
    }

    async fn square(&self, args: &Value) -> Result<Value, ToolError> {
        let n = number_arg("square", args, "n")?;
        info!("Squaring number: {}", n);
        number(n * n)
    }

    async fn cube(&self, args: &Value) -> Result<Value, ToolError> {
        let n = number_arg("cube", args, "n")?;
        info!("Cubing number: {}", n);
        number(n * n * n)
    }

    async fn sqrt(&self, args: &Value) -> Result<Value, ToolError> {
        let n = number_arg("sqrt", args, "n")?;
        info!("Calculating square root of: {}", n);
        if n < 0.0 {
            return Err(ToolError::domain(
                "negative numbers do not have real square roots",
            ));
        }
        number(n.sqrt())
    }

    async fn power(&self, args: &Value) -> Result<Value, ToolError> {
        let (base, exponent) = pair("power", args, "base", "exponent")?;
        info!("Calculating power: {} ^ {}", base, exponent);
        number(base.powf(exponent))
    }
}

fn pair(tool: &str, args: &Value, first: &str, second: &str) -> Result<(f64, f64), ToolError> {
    Ok((number_arg(tool, args, first)?, number_arg(tool, args, second)?))
}

// JSON has no representation for NaN or infinity.
fn number(value: f64) -> Result<Value, ToolError> {
    if value.is_finite() {
        Ok(json!(value))
    } else {
        Err(ToolError::domain(format!(
            "result is not a representable number ({})",
            value
        )))
    }
}
