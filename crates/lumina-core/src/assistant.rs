//! Math assistant: message data model and the Gemini API client.
//!
//! The external boundary is a single non-streaming `generateContent` call.
//! Transport and service failures surface as errors; the caller substitutes
//! the fixed apology message and never retries.

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::config::Config;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Standard User-Agent header for Lumina API requests.
pub const USER_AGENT: &str = concat!("lumina/", env!("CARGO_PKG_VERSION"));

/// Greeting shown as the transcript's first assistant message.
pub const GREETING: &str = "Hello! I'm your Lumina math assistant. Need help with a complex \
                            word problem or a mathematical concept? Just ask!";

/// Fixed apology appended when a completion call fails.
pub const APOLOGY: &str = "Sorry, I ran into an error processing that. Please try again.";

/// Fallback when the service responds successfully but with no text.
const NO_ANSWER: &str = "I couldn't generate a solution at this moment.";

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One transcript message. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantMessage {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
}

impl AssistantMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// ============================================================================
// Config resolution helpers
// ============================================================================

/// Resolves an API key with precedence: config > env.
///
/// # Errors
/// Returns an error when neither source provides a key.
pub fn resolve_api_key(config_api_key: Option<&str>, env_var: &str) -> Result<String> {
    if let Some(key) = config_api_key {
        let trimmed = key.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }

    std::env::var(env_var).context(format!(
        "No API key available. Set {env_var} or api_key in [providers.gemini]."
    ))
}

/// Resolves a base URL with precedence: env > config > default.
///
/// # Errors
/// Returns an error if an override is not a well-formed URL.
pub fn resolve_base_url(
    config_base_url: Option<&str>,
    env_var: &str,
    default_url: &str,
) -> Result<String> {
    if let Ok(env_url) = std::env::var(env_var) {
        let trimmed = env_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    if let Some(config_url) = config_base_url {
        let trimmed = config_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.to_string());
        }
    }

    Ok(default_url.to_string())
}

fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid Gemini base URL: {url}"))?;
    Ok(())
}

// ============================================================================
// Gemini client
// ============================================================================

/// Gemini API configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_output_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
}

impl GeminiConfig {
    /// Builds the API configuration from the app config and environment.
    ///
    /// Authentication resolution order:
    /// 1. `api_key` in `[providers.gemini]`
    /// 2. `GEMINI_API_KEY` environment variable
    ///
    /// # Errors
    /// Returns an error if no API key is available or the base URL is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = resolve_api_key(config.providers.gemini.api_key.as_deref(), "GEMINI_API_KEY")?;
        let base_url = resolve_base_url(
            config.providers.gemini.base_url.as_deref(),
            "GEMINI_BASE_URL",
            DEFAULT_BASE_URL,
        )?;

        Ok(Self {
            api_key,
            base_url,
            model: config.model.clone(),
            max_output_tokens: config.max_output_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
        })
    }
}

/// Gemini client.
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Sends a natural-language math question and returns the answer text.
    ///
    /// # Errors
    /// Returns an error on transport failure, a non-success status, or an
    /// unparsable response body.
    pub async fn solve_word_problem(&self, question: &str) -> Result<String> {
        let request = build_generate_content_request(question, &self.config);
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let response = self
            .http
            .post(&url)
            .headers(build_headers(&self.config.api_key))
            .json(&request)
            .send()
            .await
            .context("Failed to reach the Gemini API")?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            anyhow::bail!("Gemini API error {}: {body}", status.as_u16());
        }

        let value: Value = serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse Gemini response JSON: {body}"))?;
        Ok(parse_generate_content_response(&value).unwrap_or_else(|| NO_ANSWER.to_string()))
    }
}

/// Wraps the raw question in the math-tutor instruction template.
fn build_prompt(question: &str) -> String {
    format!(
        "You are a helpful math assistant inside a calculator app. \
         The user has asked the following: \"{question}\". \
         Solve the problem step-by-step. Keep the explanation concise and professional. \
         Use Markdown formatting for readability. \
         If the input is not a math or logic problem, politely redirect them."
    )
}

fn build_generate_content_request(question: &str, config: &GeminiConfig) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{
                "text": build_prompt(question)
            }]
        }],
        "generationConfig": {
            "temperature": config.temperature,
            "topP": config.top_p,
            "maxOutputTokens": config.max_output_tokens,
        }
    })
}

/// Extracts answer text from a `generateContent` response.
///
/// Joins the text parts of the first candidate; returns `None` when the
/// response carries no usable text.
fn parse_generate_content_response(value: &Value) -> Option<String> {
    let parts = value
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let texts: Vec<&str> = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .filter(|text| !text.trim().is_empty())
        .collect();

    if texts.is_empty() {
        None
    } else {
        Some(texts.join("\n"))
    }
}

fn build_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "x-goog-api-key",
        HeaderValue::from_str(api_key).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    headers.insert("accept", HeaderValue::from_static("application/json"));
    headers.insert("content-type", HeaderValue::from_static("application/json"));
    headers.insert("user-agent", HeaderValue::from_static(USER_AGENT));
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(base_url: &str) -> GeminiConfig {
        GeminiConfig {
            api_key: "test-api-key".to_string(),
            base_url: base_url.to_string(),
            model: "gemini-3-flash-preview".to_string(),
            max_output_tokens: 800,
            temperature: 0.7,
            top_p: 0.95,
        }
    }

    #[test]
    fn prompt_embeds_the_question() {
        let prompt = build_prompt("what is 2 + 2?");
        assert!(prompt.contains("\"what is 2 + 2?\""));
        assert!(prompt.contains("math assistant"));
    }

    #[test]
    fn request_carries_generation_config() {
        let request = build_generate_content_request("q", &test_config("https://example.com"));
        assert_eq!(request["generationConfig"]["temperature"], json!(0.7));
        assert_eq!(request["generationConfig"]["topP"], json!(0.95));
        assert_eq!(request["generationConfig"]["maxOutputTokens"], json!(800));
        assert_eq!(request["contents"][0]["role"], json!("user"));
    }

    #[test]
    fn parse_response_joins_text_parts() {
        let value = json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Step 1." },
                        { "text": "Step 2." }
                    ]
                }
            }]
        });
        assert_eq!(
            parse_generate_content_response(&value).as_deref(),
            Some("Step 1.\nStep 2.")
        );
    }

    #[test]
    fn parse_response_without_text_is_none() {
        assert!(parse_generate_content_response(&json!({})).is_none());
        let blank = json!({
            "candidates": [{ "content": { "parts": [{ "text": "  " }] } }]
        });
        assert!(parse_generate_content_response(&blank).is_none());
    }

    #[test]
    fn api_key_prefers_config_value() {
        let key = resolve_api_key(Some("  configured  "), "LUMINA_UNSET_TEST_VAR").unwrap();
        assert_eq!(key, "configured");
    }

    #[test]
    fn blank_config_key_falls_through() {
        assert!(resolve_api_key(Some("   "), "LUMINA_UNSET_TEST_VAR").is_err());
    }

    #[test]
    fn base_url_rejects_garbage() {
        assert!(resolve_base_url(Some("not a url"), "LUMINA_UNSET_TEST_VAR", "d").is_err());
    }

    #[tokio::test]
    async fn solve_word_problem_returns_answer_text() {
        use wiremock::matchers::{header, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-3-flash-preview:generateContent"))
            .and(header("x-goog-api-key", "test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "The answer is 4." }] }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(test_config(&server.uri()));
        let answer = client.solve_word_problem("what is 2 + 2?").await.unwrap();
        assert_eq!(answer, "The answer is 4.");
    }

    #[tokio::test]
    async fn solve_word_problem_surfaces_http_errors() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = GeminiClient::new(test_config(&server.uri()));
        let err = client.solve_word_problem("q").await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn empty_candidates_fall_back_to_stock_text() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let client = GeminiClient::new(test_config(&server.uri()));
        let answer = client.solve_word_problem("q").await.unwrap();
        assert_eq!(answer, NO_ANSWER);
    }
}
