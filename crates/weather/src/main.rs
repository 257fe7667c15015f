use std::io;

use anyhow::Result;
use conduit_engine::config::{ModelConfig, WeatherConfig};
use conduit_engine::ui::{self, Frontend};
use conduit_engine::{logging, Agent, GeminiProvider, ModelProvider};
use conduit_shared::toolbelts::Weather;
use conduit_shared::ToolRegistry;
use tracing::info;

const INSTRUCTIONS: &str = "\
You're a Weather Agent that fetches current weather data for any location using the \
provided tool. For weather queries, call the get_current_weather tool and explain the \
results clearly with emojis! 🌦️ If the query is unrelated to weather, respond with a \
friendly message explaining you can only handle weather requests.";

const FRONTEND: Frontend = Frontend {
    greeting: "🌞 Weather Agent is ready to fetch weather data! 🌧️",
    prompt: "Ask about the weather or 'exit': ",
    farewell: "👋 Stay dry! 😎",
    answer_label: "🌍 Agent Answer:",
    error_label: "🌍 Error processing query:",
    show_thought_process: false,
    echo_query: true,
};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("chat");

    if matches!(command, "help" | "--help" | "-h") {
        print_usage();
        return Ok(());
    }

    // Both keys are checked before anything else runs.
    let model_config = ModelConfig::from_env()?;
    let weather_config = WeatherConfig::from_env()?;

    let provider = GeminiProvider::new(&model_config)?;
    let weather = Weather::new(
        weather_config.api_key,
        weather_config.base_url,
        weather_config.timeout,
    )?;
    let tools = ToolRegistry::new().register(weather)?;
    info!(model = %model_config.model, tools = ?tools.describe(), "starting Weather Agent");

    let agent = Agent::new("Weather Agent", INSTRUCTIONS, provider.get_model(None), tools)
        .with_max_turns(model_config.max_turns);

    match command {
        "chat" => {
            ui::interactive_chat(&agent, &FRONTEND, io::stdin().lock(), io::stdout()).await?;
        }
        _ => {
            let message = args[1..].join(" ");
            ui::single_message(&agent, &FRONTEND, &message, io::stdout()).await?;
        }
    }

    Ok(())
}

fn print_usage() {
    println!("weather-agent - current weather through Gemini and OpenWeatherMap");
    println!("\nUsage:");
    println!("  weather-agent                         Start interactive chat");
    println!("  weather-agent \"weather in Lisbon?\"    Ask a single question");
    println!("\nEnvironment:");
    println!("  GEMINI_API_KEY                        Required");
    println!("  WEATHER_API_KEY                       Required (OpenWeatherMap)");
    println!("  WEATHER_TIMEOUT_SECS                  Weather request timeout (default 10)");
}
