//! Ask command handler.

use anyhow::{Context, Result};
use lumina_core::assistant::{GeminiClient, GeminiConfig};
use lumina_core::config::Config;

pub async fn run(question: &str, config: &Config) -> Result<()> {
    let gemini = GeminiConfig::from_config(config)?;
    let client = GeminiClient::new(gemini);

    let answer = client
        .solve_word_problem(question)
        .await
        .context("ask assistant")?;
    println!("{answer}");
    Ok(())
}
