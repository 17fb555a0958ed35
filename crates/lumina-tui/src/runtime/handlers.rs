//! Effect handler implementations.
//!
//! Handlers are pure async functions that return a `UiEvent`; the runtime
//! owns spawning and delivery through the inbox.

use lumina_core::assistant::{GeminiClient, GeminiConfig};
use lumina_core::config::Config;

use crate::events::UiEvent;

/// Asks the assistant a word problem and reports the outcome.
///
/// Failures are folded into the reply event; the reducer decides how to
/// present them.
pub async fn ask_assistant(config: Config, request: u64, question: String) -> UiEvent {
    let result = solve(&config, &question).await.map_err(|e| format!("{e:#}"));
    UiEvent::AssistantReply { request, result }
}

async fn solve(config: &Config, question: &str) -> anyhow::Result<String> {
    let gemini = GeminiConfig::from_config(config)?;
    let client = GeminiClient::new(gemini);
    client.solve_word_problem(question).await
}
