//! # HTTP Provider Integration Tests / HTTP 提供者集成测试
//!
//! Runs the DeepL and chat-completions providers against a local fake
//! server and checks the requests they send and how replies are decoded.
//!
//! 针对本地伪服务器运行 DeepL 与对话补全提供者，检查其发送的请求及响应的解码方式。

mod common;

use common::catalog;
use locale_sync::config::ReviewSettings;
use locale_sync::core::provider::{ProviderError, ReviewProvider, TranslationProvider};
use locale_sync::providers::{DeepLProvider, OpenAiProvider};
use serde_json::Value;
use std::io::Read;
use std::thread::JoinHandle;
use std::time::Duration;
use tiny_http::{Header, Response, Server};

/// What the fake server saw.
struct Captured {
    authorization: Option<String>,
    body: Value,
}

/// Serves one request with `status` and `reply`, then stops.
fn serve_once(status: u16, reply: &str) -> (String, JoinHandle<Captured>) {
    let server = Server::http("127.0.0.1:0").expect("http server");
    let addr = server.server_addr().to_ip().expect("ip listener");
    let reply = reply.to_string();
    let handle = std::thread::spawn(move || {
        let mut request = server.recv().expect("request");
        let authorization = request
            .headers()
            .iter()
            .find(|h| h.field.equiv("Authorization"))
            .map(|h| h.value.to_string());
        let mut raw = String::new();
        request.as_reader().read_to_string(&mut raw).expect("body");
        let response = Response::from_string(reply)
            .with_status_code(status)
            .with_header(Header::from_bytes("Content-Type", "application/json").unwrap());
        request.respond(response).expect("respond");
        Captured {
            authorization,
            body: serde_json::from_str(&raw).unwrap_or(Value::Null),
        }
    });
    (format!("http://{addr}/v1"), handle)
}

fn review_settings(endpoint: &str) -> ReviewSettings {
    ReviewSettings {
        endpoint: endpoint.to_string(),
        timeout_secs: 5,
        ..ReviewSettings::default()
    }
}

fn chat_reply(content: &str) -> String {
    serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
    .to_string()
}

#[cfg(test)]
mod deepl_tests {
    use super::*;

    #[tokio::test]
    async fn test_translate_sends_key_and_language_codes() {
        let (url, handle) = serve_once(200, r#"{"translations":[{"text":"Inicio"}]}"#);
        let provider =
            DeepLProvider::new("secret:fx", Some(&url), Duration::from_secs(5)).unwrap();

        let translated = provider.translate("Home", "en", "es").await.unwrap();
        assert_eq!(translated, "Inicio");

        let captured = handle.join().expect("server thread");
        assert_eq!(captured.authorization.as_deref(), Some("DeepL-Auth-Key secret:fx"));
        assert_eq!(captured.body["text"][0], "Home");
        assert_eq!(captured.body["source_lang"], "EN");
        assert_eq!(captured.body["target_lang"], "ES");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let (url, handle) = serve_once(456, r#"{"message":"Quota exceeded"}"#);
        let provider = DeepLProvider::new("secret", Some(&url), Duration::from_secs(5)).unwrap();

        let err = provider.translate("Home", "en", "de").await.unwrap_err();
        match err {
            ProviderError::Status { status, body } => {
                assert_eq!(status, 456);
                assert!(body.contains("Quota exceeded"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        handle.join().expect("server thread");
    }

    #[tokio::test]
    async fn test_empty_translation_list_is_an_error() {
        let (url, handle) = serve_once(200, r#"{"translations":[]}"#);
        let provider = DeepLProvider::new("secret", Some(&url), Duration::from_secs(5)).unwrap();

        let err = provider.translate("Home", "en", "fr").await.unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse));
        handle.join().expect("server thread");
    }

    #[test]
    fn test_endpoint_follows_key_tier() {
        let free = DeepLProvider::new("abc:fx", None, Duration::from_secs(1)).unwrap();
        let pro = DeepLProvider::new("abc", None, Duration::from_secs(1)).unwrap();
        assert!(free.endpoint().contains("api-free.deepl.com"));
        assert!(pro.endpoint().starts_with("https://api.deepl.com"));
    }
}

#[cfg(test)]
mod chat_tests {
    use super::*;

    #[tokio::test]
    async fn test_review_parses_fenced_reply() {
        let (url, handle) = serve_once(200, &chat_reply("```json\n{\"nav-home\": \"Inicio\"}\n```"));
        let provider =
            OpenAiProvider::new("sk-test", &review_settings(&url), "A cooking app.").unwrap();

        let subset = catalog(r#"{"nav-home": "Inico"}"#);
        let reviewed = provider.review(&subset, "es").await.unwrap();
        assert_eq!(reviewed, catalog(r#"{"nav-home": "Inicio"}"#));

        let captured = handle.join().expect("server thread");
        assert_eq!(captured.authorization.as_deref(), Some("Bearer sk-test"));
        assert_eq!(captured.body["model"], "gpt-4o-mini");
        let prompt = captured.body["messages"][1]["content"].as_str().unwrap();
        assert!(prompt.starts_with("A cooking app."));
        assert!(prompt.contains("TARGET LANGUAGE: es"));
        assert!(prompt.contains("\"nav-home\": \"Inico\""));
    }

    #[tokio::test]
    async fn test_review_rejects_non_json_reply() {
        let (url, handle) = serve_once(200, &chat_reply("I could not review this."));
        let provider = OpenAiProvider::new("sk-test", &review_settings(&url), "").unwrap();

        let err = provider.review(&catalog(r#"{"a": "b"}"#), "it").await.unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
        handle.join().expect("server thread");
    }

    #[tokio::test]
    async fn test_review_surfaces_http_errors() {
        let (url, handle) = serve_once(401, r#"{"error":"invalid key"}"#);
        let provider = OpenAiProvider::new("sk-bad", &review_settings(&url), "").unwrap();

        let err = provider.review(&catalog(r#"{"a": "b"}"#), "fr").await.unwrap_err();
        assert!(matches!(err, ProviderError::Status { status: 401, .. }));
        handle.join().expect("server thread");
    }

    #[tokio::test]
    async fn test_translate_returns_trimmed_text() {
        let (url, handle) = serve_once(200, &chat_reply("  Bonjour \n"));
        let provider = OpenAiProvider::new("sk-test", &review_settings(&url), "").unwrap();

        let translated = TranslationProvider::translate(&provider, "Hello", "en", "fr")
            .await
            .unwrap();
        assert_eq!(translated, "Bonjour");

        let captured = handle.join().expect("server thread");
        let prompt = captured.body["messages"][1]["content"].as_str().unwrap();
        assert!(prompt.contains("from en-US to fr-FR"));
    }
}
