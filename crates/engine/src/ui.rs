use std::io::{BufRead, Write};

use anyhow::Result;
use conduit_shared::RunItem;
use tracing::error;

use crate::agent::{Agent, RunResult};

/// The words a program greets, prompts and answers with.
#[derive(Debug, Clone, Copy)]
pub struct Frontend {
    pub greeting: &'static str,
    pub prompt: &'static str,
    pub farewell: &'static str,
    pub answer_label: &'static str,
    pub error_label: &'static str,
    /// Print the tool calls and results that led to the answer.
    pub show_thought_process: bool,
    /// Echo each query before running it.
    pub echo_query: bool,
}

/// `exit` in any letter case, ignoring surrounding whitespace.
pub fn is_exit_command(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("exit")
}

/// Prompt loop: runs until the exit command or end of input.
///
/// A failed query is reported and the loop carries on.
pub async fn interactive_chat<R: BufRead, W: Write>(
    agent: &Agent,
    frontend: &Frontend,
    mut input: R,
    mut out: W,
) -> Result<()> {
    writeln!(out, "\n{}", frontend.greeting)?;

    loop {
        writeln!(out, "\n{}", frontend.prompt)?;
        out.flush()?;

        // Bytes, not `read_line`: one undecodable line must not end the session.
        let mut buf = Vec::new();
        if input.read_until(b'\n', &mut buf)? == 0 {
            writeln!(out, "{}", frontend.farewell)?;
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        if is_exit_command(&line) {
            writeln!(out, "{}", frontend.farewell)?;
            break;
        }

        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        answer(agent, frontend, query, &mut out).await?;
    }

    Ok(())
}

/// Run one query and print the answer.
pub async fn single_message<W: Write>(
    agent: &Agent,
    frontend: &Frontend,
    message: &str,
    mut out: W,
) -> Result<()> {
    answer(agent, frontend, message.trim(), &mut out).await
}

async fn answer<W: Write>(agent: &Agent, frontend: &Frontend, query: &str, out: &mut W) -> Result<()> {
    if frontend.echo_query {
        writeln!(out, "Processing query...⏱️: {}", query)?;
    }

    match agent.run(query).await {
        Ok(result) => print_result(frontend, &result, out)?,
        Err(e) => {
            error!("query failed: {:#}", e);
            writeln!(out, "{} {:#}", frontend.error_label, e)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn print_result<W: Write>(frontend: &Frontend, result: &RunResult, out: &mut W) -> Result<()> {
    writeln!(out, "{} {}", frontend.answer_label, result.final_output)?;

    if frontend.show_thought_process {
        writeln!(out, "🔍 Agent Thought Process:")?;
        if result.new_items.is_empty() {
            writeln!(out, "   (answered directly)")?;
        }
        for item in &result.new_items {
            print_item(item, out)?;
        }
    }

    Ok(())
}

fn print_item<W: Write>(item: &RunItem, out: &mut W) -> Result<()> {
    match item {
        RunItem::ToolCall { tool, args } => writeln!(out, "🔧 Calling: {} {}", tool, args)?,
        RunItem::ToolResult { output, is_error: false, .. } => writeln!(out, "   ✓ {}", output)?,
        RunItem::ToolResult { output, is_error: true, .. } => writeln!(out, "   ❌ {}", output)?,
        RunItem::MessageOutput { content } => writeln!(out, "💬 {}", content.trim())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_command_ignores_case_and_whitespace() {
        for input in ["exit", "EXIT", "  Exit\n", "\teXiT  "] {
            assert!(is_exit_command(input), "{:?}", input);
        }
        for input in ["exit now", "quit", "", "ex it", "exits"] {
            assert!(!is_exit_command(input), "{:?}", input);
        }
    }

    #[test]
    fn thought_process_lists_each_item() {
        let result = RunResult {
            final_output: "15".to_string(),
            new_items: vec![
                RunItem::ToolCall {
                    tool: "add".to_string(),
                    args: serde_json::json!({"a": 5, "b": 10}),
                },
                RunItem::ToolResult {
                    tool: "add".to_string(),
                    output: "15.0".to_string(),
                    is_error: false,
                },
            ],
            turns: 2,
        };
        let frontend = Frontend {
            greeting: "",
            prompt: "",
            farewell: "",
            answer_label: "Answer:",
            error_label: "Error:",
            show_thought_process: true,
            echo_query: false,
        };

        let mut out = Vec::new();
        print_result(&frontend, &result, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Answer: 15\n"));
        assert!(text.contains("🔧 Calling: add {\"a\":5,\"b\":10}"));
        assert!(text.contains("   ✓ 15.0"));
    }
}
