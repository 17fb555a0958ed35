//! Eval command handler.

use anyhow::{Context, Result};
use lumina_core::eval;

pub fn run(expression: &str) -> Result<()> {
    let value = eval::evaluate(expression)
        .with_context(|| format!("evaluate '{expression}'"))?;
    println!("{}", eval::format_grouped(value));
    Ok(())
}
