//! CLI command handlers.

pub mod ask;
pub mod calculator;
pub mod config;
pub mod eval;
