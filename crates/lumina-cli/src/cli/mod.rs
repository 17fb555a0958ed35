//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use lumina_core::config;

mod commands;

#[derive(Parser)]
#[command(name = "lumina")]
#[command(version)]
#[command(about = "Terminal calculator with history and a math assistant")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Evaluate an expression and print the result
    Eval {
        /// The expression to evaluate
        #[arg(value_name = "EXPRESSION")]
        expression: String,
    },

    /// Ask the math assistant a word problem
    Ask {
        /// The question to ask
        #[arg(value_name = "QUESTION")]
        question: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    // default to the interactive calculator
    let Some(command) = cli.command else {
        return commands::calculator::run(&config).await;
    };

    match command {
        Commands::Eval { expression } => commands::eval::run(&expression),
        Commands::Ask { question } => commands::ask::run(&question, &config).await,
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
