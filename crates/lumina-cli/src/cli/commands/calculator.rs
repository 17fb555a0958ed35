//! Interactive calculator command handler.

use anyhow::{Context, Result};
use lumina_core::config::Config;

pub async fn run(config: &Config) -> Result<()> {
    lumina_tui::run_calculator(config)
        .await
        .context("interactive calculator failed")
}
