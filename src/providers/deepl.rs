//! # DeepL Provider / DeepL 提供者
//!
//! Machine translation through the DeepL v2 `translate` endpoint, one string
//! per request.
//!
//! 通过 DeepL v2 `translate` 端点进行机器翻译，每次请求一个字符串。

use anyhow::anyhow;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::core::lang::base_code;
use crate::core::provider::{ProviderError, TranslationProvider};
use crate::infra::t;
use crate::providers::read_error_body;

/// Environment variable holding the authentication key.
pub const DEEPL_AUTH_KEY_VAR: &str = "DEEPL_AUTH_KEY";
pub const DEEPL_FREE_ENDPOINT: &str = "https://api-free.deepl.com/v2/translate";
pub const DEEPL_PRO_ENDPOINT: &str = "https://api.deepl.com/v2/translate";

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: [&'a str; 1],
    source_lang: String,
    target_lang: String,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(default)]
    translations: Vec<TranslatedText>,
}

#[derive(Debug, Deserialize)]
struct TranslatedText {
    text: String,
}

#[derive(Debug, Clone)]
pub struct DeepLProvider {
    client: reqwest::Client,
    auth_key: String,
    endpoint: String,
}

impl DeepLProvider {
    /// Builds a provider. Without an explicit endpoint, free-tier keys
    /// (ending in `:fx`) use the free API host and all others the pro host.
    ///
    /// 构建提供者。未指定端点时，免费密钥（以 `:fx` 结尾）使用免费 API 主机，
    /// 其他密钥使用专业版主机。
    pub fn new(
        auth_key: impl Into<String>,
        endpoint: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let auth_key = auth_key.into();
        let endpoint = match endpoint {
            Some(endpoint) => endpoint.to_string(),
            None if auth_key.ends_with(":fx") => DEEPL_FREE_ENDPOINT.to_string(),
            None => DEEPL_PRO_ENDPOINT.to_string(),
        };
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            auth_key,
            endpoint,
        })
    }

    /// Reads the key from `DEEPL_AUTH_KEY`. A missing key is a setup error.
    pub fn from_env(endpoint: Option<&str>, timeout: Duration) -> anyhow::Result<Self> {
        let auth_key = env::var(DEEPL_AUTH_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow!(t!("setup.missing_env", var = DEEPL_AUTH_KEY_VAR).to_string()))?;
        Ok(Self::new(auth_key, endpoint, timeout)?)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl TranslationProvider for DeepLProvider {
    fn name(&self) -> &str {
        "DeepL"
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        let request = TranslateRequest {
            text: [text],
            source_lang: source_code(source),
            target_lang: target_code(target),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("DeepL-Auth-Key {}", self.auth_key))
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

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
        body.translations
            .into_iter()
            .next()
            .map(|translation| translation.text)
            .ok_or(ProviderError::EmptyResponse)
    }
}

/// DeepL source languages carry no region: `pt-BR` → `PT`.
pub fn source_code(code: &str) -> String {
    base_code(code).to_uppercase()
}

/// DeepL requires a variant for English and Portuguese targets; a region in
/// `code` is kept for those, otherwise `EN-US` and `PT-PT` are used.
pub fn target_code(code: &str) -> String {
    let base = base_code(code).to_lowercase();
    let has_region = base.len() < code.len();
    match base.as_str() {
        "en" | "pt" if has_region => code.replace('_', "-").to_uppercase(),
        "en" => "EN-US".to_string(),
        "pt" => "PT-PT".to_string(),
        _ => base.to_uppercase(),
    }
}
