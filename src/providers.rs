//! # Providers Module / 提供者模块
//!
//! Concrete review and translation backends, and [`AnyTranslator`], which
//! picks the per-string backend named in the configuration at run time.
//!
//! 具体的审校与翻译后端，以及在运行时根据配置选择逐字符串后端的 [`AnyTranslator`]。

pub mod deepl;
pub mod openai;

use std::time::Duration;

use crate::core::config::{SyncConfig, TranslatorKind};
use crate::core::provider::{ProviderError, TranslationProvider};

pub use deepl::DeepLProvider;
pub use openai::OpenAiProvider;

const MAX_ERROR_BODY_CHARS: usize = 500;

/// The translation backend selected by `[translation] provider`.
/// 由 `[translation] provider` 选定的翻译后端。
#[derive(Debug, Clone)]
pub enum AnyTranslator {
    DeepL(DeepLProvider),
    OpenAi(OpenAiProvider),
}

impl AnyTranslator {
    /// Builds the configured backend with credentials from the environment.
    /// Fails before any file is touched when the credentials are missing.
    ///
    /// 使用环境变量中的凭据构建配置的后端。缺少凭据时在触及任何文件之前失败。
    pub fn from_env(config: &SyncConfig) -> anyhow::Result<Self> {
        let settings = &config.translation;
        let timeout = Duration::from_millis(settings.timeout_ms);
        let endpoint = settings.endpoint.as_deref();
        match settings.provider {
            TranslatorKind::Deepl => Ok(Self::DeepL(DeepLProvider::from_env(endpoint, timeout)?)),
            TranslatorKind::Openai => Ok(Self::OpenAi(openai::translator_from_env(
                &config.review,
                endpoint,
                timeout,
            )?)),
        }
    }
}

impl TranslationProvider for AnyTranslator {
    fn name(&self) -> &str {
        match self {
            AnyTranslator::DeepL(provider) => TranslationProvider::name(provider),
            AnyTranslator::OpenAi(provider) => TranslationProvider::name(provider),
        }
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ProviderError> {
        match self {
            AnyTranslator::DeepL(provider) => provider.translate(text, source, target).await,
            AnyTranslator::OpenAi(provider) => provider.translate(text, source, target).await,
        }
    }
}

/// Reads an error response body for diagnostics, cut to a readable length.
pub(crate) async fn read_error_body(response: reqwest::Response) -> String {
    let body = response.text().await.unwrap_or_default();
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(MAX_ERROR_BODY_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
