//! Configuration management for Lumina.
//!
//! Loads configuration from ${LUMINA_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod paths {
    //! Path resolution for Lumina configuration.
    //!
    //! LUMINA_HOME resolution order:
    //! 1. LUMINA_HOME environment variable (if set)
    //! 2. ~/.config/lumina (default)

    use std::path::PathBuf;

    /// Returns the Lumina home directory.
    ///
    /// Checks LUMINA_HOME env var first, falls back to ~/.config/lumina
    pub fn lumina_home() -> PathBuf {
        if let Ok(home) = std::env::var("LUMINA_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("lumina"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        lumina_home().join("config.toml")
    }

    /// Returns the user home directory, if known.
    pub fn home_dir() -> Option<PathBuf> {
        dirs::home_dir()
    }
}

/// Per-provider settings (keys, base URL overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiProviderConfig {
    /// API key; falls back to the GEMINI_API_KEY env var when unset.
    pub api_key: Option<String>,
    /// Base URL override; the GEMINI_BASE_URL env var takes precedence.
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub gemini: GeminiProviderConfig,
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model used for assistant queries.
    pub model: String,

    /// Maximum tokens in an assistant answer.
    pub max_output_tokens: u32,

    /// Sampling temperature for assistant answers.
    pub temperature: f64,

    /// Nucleus sampling parameter for assistant answers.
    pub top_p: f64,

    /// Provider configuration (API keys, base URLs).
    pub providers: ProvidersConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: Self::DEFAULT_MODEL.to_string(),
            max_output_tokens: Self::DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: Self::DEFAULT_TEMPERATURE,
            top_p: Self::DEFAULT_TOP_P,
            providers: ProvidersConfig::default(),
        }
    }
}

impl Config {
    const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
    const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 800;
    const DEFAULT_TEMPERATURE: f64 = 0.7;
    const DEFAULT_TOP_P: f64 = 0.95;

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the default config template to `path`, refusing to overwrite.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init_at(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

/// Template written by `lumina config init`. Commented lines show defaults.
pub fn default_config_template() -> &'static str {
    r#"# Lumina configuration

# Model used for assistant queries
model = "gemini-3-flash-preview"

# Maximum tokens in an assistant answer
# max_output_tokens = 800

# Sampling knobs for assistant answers
# temperature = 0.7
# top_p = 0.95

[providers.gemini]
# API key; the GEMINI_API_KEY env var is used when unset
# api_key = ""
# Base URL override; the GEMINI_BASE_URL env var takes precedence
# base_url = ""
"#
}
