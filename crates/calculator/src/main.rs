use std::io;

use anyhow::{anyhow, Result};
use conduit_engine::config::ModelConfig;
use conduit_engine::ui::{self, Frontend};
use conduit_engine::{logging, Agent, GeminiProvider, Message, Model, ModelProvider, ResponseMessage};
use conduit_shared::toolbelts::Calculator;
use conduit_shared::ToolRegistry;
use tracing::info;

const INSTRUCTIONS: &str = "\
You're the Math God Agent, a savage calculator that can handle everything from 2 + 2 \
to square roots, powers, and complex arithmetic. You know when to call tools for \
calculations and when to explain results in simple language. Also explain how you \
do it step by step.";

/// Subcommand for the raw tool-calling check.
const CHECK_COMMAND: &str = "probe";
/// Model the raw tool-calling check talks to unless one is named.
const CHECK_MODEL: &str = "gemini-1.5-flash";

const FRONTEND: Frontend = Frontend {
    greeting: "🤖 Math God Agent is ready to assist you with your calculations!",
    prompt: "Ask me anything (or type 'exit' to quit): ",
    farewell: "👋 Bye bye nerd 🤓",
    answer_label: "🧠 Agent Answer:",
    error_label: "🧠 Error processing query:",
    show_thought_process: true,
    echo_query: false,
};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let tools = ToolRegistry::new().register(Calculator)?;

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("chat");

    if matches!(command, "help" | "--help" | "-h") {
        print_usage(&tools);
        return Ok(());
    }

    let config = ModelConfig::from_env()?;
    let provider = GeminiProvider::new(&config)?;
    info!(model = %config.model, tools = tools.len(), "starting Math God Agent");

    if command == CHECK_COMMAND {
        let model = provider.get_model(Some(check_model(&args)));
        let reply = check_tool_calling(model.as_ref(), &tools).await?;
        println!("{}", serde_json::to_string_pretty(&reply)?);
        return Ok(());
    }

    let agent = Agent::new("Math God Agent", INSTRUCTIONS, provider.get_model(None), tools)
        .with_max_turns(config.max_turns);

    match command {
        "chat" => {
            ui::interactive_chat(&agent, &FRONTEND, io::stdin().lock(), io::stdout()).await?;
        }
        _ => {
            // Treat everything else as a single question
            let message = args[1..].join(" ");
            ui::single_message(&agent, &FRONTEND, &message, io::stdout()).await?;
        }
    }

    Ok(())
}

fn check_model(args: &[String]) -> &str {
    args.get(2).map(String::as_str).unwrap_or(CHECK_MODEL)
}

/// One raw request offering only `add`, returned as the model sent it.
async fn check_tool_calling(model: &dyn Model, tools: &ToolRegistry) -> Result<ResponseMessage> {
    let add = tools
        .get_tool_schema("add")
        .ok_or_else(|| anyhow!("add tool is not registered"))?
        .to_tool();

    model.complete(&[Message::user("What is 5 + 10?")], &[add]).await
}

fn print_usage(tools: &ToolRegistry) {
    println!("math-god - arithmetic agent backed by Gemini");
    println!("\nUsage:");
    println!("  math-god                  Start interactive chat");
    println!("  math-god \"what is 2^10\"   Ask a single question");
    println!("  math-god probe [model]    Send one raw tool-calling request and print the reply");
    println!("                            (model defaults to {})", CHECK_MODEL);
    println!("\nTools:");
    for line in tools.describe() {
        println!("  {}", line);
    }
    println!("\nEnvironment:");
    println!("  GEMINI_API_KEY            Required");
    println!("  GEMINI_MODEL              Model name (default gemini-2.0-flash)");
    println!("  AGENT_MAX_TURNS           Model calls allowed per question (default 10)");
}
