//! Core Lumina library (expression engine, keypad, history, assistant, config).

pub mod assistant;
pub mod config;
pub mod eval;
pub mod history;
pub mod keypad;
