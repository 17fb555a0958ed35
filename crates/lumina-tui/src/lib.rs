//! Full-screen TUI implementation for Lumina.

pub mod effects;
pub mod events;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
use lumina_core::config::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive calculator.
///
/// # Errors
/// Returns an error when stderr is not a terminal or the TUI fails.
pub async fn run_calculator(config: &Config) -> Result<()> {
    // The calculator requires a terminal to render the TUI
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The calculator requires a terminal.\n\
             Use `lumina eval '...'` for non-interactive evaluation."
        );
    }

    // Print pre-TUI info to stderr (will be replaced by alternate screen)
    let mut err = stderr();
    writeln!(err, "Lumina Calculator")?;
    writeln!(err, "Assistant model: {}", config.model)?;
    err.flush()?;

    let mut runtime = TuiRuntime::new(config.clone())?;
    runtime.run()?;

    // Print goodbye after TUI exits (terminal restored)
    writeln!(stderr(), "Goodbye!")?;

    Ok(())
}
