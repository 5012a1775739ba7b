//! # Chat Completions Provider / 对话补全提供者
//!
//! Talks to an OpenAI-compatible `/chat/completions` endpoint. It reviews a
//! whole subset in one request and can also translate single strings.
//!
//! 与兼容 OpenAI 的 `/chat/completions` 端点通信。它可在一次请求中审校整个子集，
//! 也可以翻译单个字符串。

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::core::catalog::Catalog;
use crate::core::config::ReviewSettings;
use crate::core::lang::region_tag;
use crate::core::provider::{
    ProviderError, ReviewProvider, TranslationProvider, parse_review_payload,
};
use crate::infra::t;
use crate::providers::read_error_body;

/// Environment variable holding the API key.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

const REVIEW_SYSTEM_PROMPT: &str = "You are an expert translator. Return only corrected JSON.";
const TRANSLATE_SYSTEM_PROMPT: &str =
    "You are an expert translator. Return only the translated text, without quotes or notes.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f64,
    context: String,
}

impl OpenAiProvider {
    /// Builds a provider from explicit settings.
    ///
    /// # Arguments
    /// * `api_key` - Bearer token sent with every request
    /// * `settings` - Model, temperature, endpoint and timeout
    /// * `context` - Free text prepended to every review prompt
    pub fn new(
        api_key: impl Into<String>,
        settings: &ReviewSettings,
        context: &str,
    ) -> Result<Self, ProviderError> {
        Self::with_timeout(
            api_key,
            settings,
            context,
            Duration::from_secs(settings.timeout_secs),
        )
    }

    pub fn with_timeout(
        api_key: impl Into<String>,
        settings: &ReviewSettings,
        context: &str,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: settings.endpoint.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            context: context.trim().to_string(),
        })
    }

    /// Reads the API key from `OPENAI_API_KEY`. A missing key is a setup error.
    /// 从 `OPENAI_API_KEY` 读取 API 密钥。缺少密钥属于初始化错误。
    pub fn from_env(settings: &ReviewSettings, context: &str) -> anyhow::Result<Self> {
        let api_key = api_key_from_env()?;
        Ok(Self::new(api_key, settings, context)?)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) {
        self.endpoint = endpoint.into();
    }

    /// The user prompt sent for reviewing `subset` in `target`.
    pub fn review_prompt(&self, subset: &Catalog, target: &str) -> Result<String, ProviderError> {
        let payload = subset
            .to_pretty_json()
            .map_err(|e| ProviderError::MalformedResponse(format!("{e:#}")))?;
        Ok(format!(
            "{}\n\nTARGET LANGUAGE: {}\n\nPlease review and correct these translations. Return ONLY the corrected JSON:\n\n{}\n",
            self.context, target, payload
        ))
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: read_error_body(response).await,
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(ProviderError::EmptyResponse)
    }
}

impl ReviewProvider for OpenAiProvider {
    fn name(&self) -> &str {
        &self.model
    }

    async fn review(&self, subset: &Catalog, target: &str) -> Result<Catalog, ProviderError> {
        let prompt = self.review_prompt(subset, target)?;
        let content = self.complete(REVIEW_SYSTEM_PROMPT, &prompt).await?;
        parse_review_payload(&content)
    }
}

impl TranslationProvider for OpenAiProvider {
    fn name(&self) -> &str {
        &self.model
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        let prompt = format!(
            "Translate the following text from {} to {}:\n\n{}",
            region_tag(source),
            region_tag(target),
            text
        );
        self.complete(TRANSLATE_SYSTEM_PROMPT, &prompt).await
    }
}

fn api_key_from_env() -> anyhow::Result<String> {
    env::var(OPENAI_API_KEY_VAR)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| anyhow!(t!("setup.missing_env", var = OPENAI_API_KEY_VAR).to_string()))
}

/// Like [`OpenAiProvider::from_env`] but with the per-string timeout and
/// endpoint override of the translation settings.
pub(crate) fn translator_from_env(
    settings: &ReviewSettings,
    endpoint: Option<&str>,
    timeout: Duration,
) -> anyhow::Result<OpenAiProvider> {
    let api_key = api_key_from_env()?;
    let mut provider = OpenAiProvider::with_timeout(api_key, settings, "", timeout)?;
    if let Some(endpoint) = endpoint {
        provider.set_endpoint(endpoint);
    }
    Ok(provider)
}
