use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test(flavor = "multi_thread")]
async fn test_ask_prints_answer_from_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-3-flash-preview:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": { "temperature": 0.7, "topP": 0.95, "maxOutputTokens": 800 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Twelve apples." }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let uri = server.uri();

    tokio::task::spawn_blocking(move || {
        cargo_bin_cmd!("lumina")
            .env("LUMINA_HOME", dir.path())
            .env("GEMINI_API_KEY", "test-key")
            .env("GEMINI_BASE_URL", &uri)
            .args(["ask", "I have 3 bags of 4 apples, how many in total?"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Twelve apples."));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ask_fails_on_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let uri = server.uri();

    tokio::task::spawn_blocking(move || {
        cargo_bin_cmd!("lumina")
            .env("LUMINA_HOME", dir.path())
            .env("GEMINI_API_KEY", "test-key")
            .env("GEMINI_BASE_URL", &uri)
            .args(["ask", "2+2?"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Gemini API error 500"));
    })
    .await
    .unwrap();
}

#[test]
fn test_ask_without_api_key_fails() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("lumina")
        .env("LUMINA_HOME", dir.path())
        .env_remove("GEMINI_API_KEY")
        .args(["ask", "2+2?"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API key available"));
}
