//! # Provider Capability Module / 提供者能力模块
//!
//! The review and translation capabilities the engine consumes, and the
//! caller-side policy around them:
//!
//! - a per-string failure never aborts the batch, the original text is kept
//! - lists are translated element by element
//! - the `multilingual-typed` value is never sent anywhere
//! - a review response must carry a JSON object, possibly inside a fenced
//!   code block, or the whole batch fails
//!
//! 引擎所使用的审校与翻译能力，以及调用方围绕它们的策略：
//! 单个字符串失败不会中止批次而是保留原文；列表逐元素翻译；
//! `multilingual-typed` 的值从不外发；审校响应必须包含 JSON 对象（可位于代码块中），
//! 否则整个批次失败。

use colored::*;
use serde_json::Value;
use std::future::Future;
use thiserror::Error;

use crate::core::catalog::{Catalog, MULTILINGUAL_KEY};
use crate::core::lang::region_tag;
use crate::infra::rate_limit::RateLimiter;
use crate::infra::t;

/// Why a provider call failed.
/// 提供者调用失败的原因。
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("provider returned no content")]
    EmptyResponse,
}

/// Translates one string at a time. Calls share no state besides whatever
/// rate limiting the caller applies.
///
/// 每次翻译一个字符串。除调用方施加的限流外，各次调用之间不共享状态。
pub trait TranslationProvider {
    /// Short backend name used in progress output.
    fn name(&self) -> &str;

    fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send;
}

/// Reviews a whole subset in one call and returns the corrected mapping.
///
/// 一次调用审校整个子集并返回修正后的映射。
pub trait ReviewProvider {
    fn name(&self) -> &str;

    fn review(
        &self,
        subset: &Catalog,
        target: &str,
    ) -> impl Future<Output = Result<Catalog, ProviderError>> + Send;
}

/// Returns the text between the first code fence and the last one, without
/// the fence's info string. Only a fence that starts a line counts, so
/// backticks inside a value are left alone. Text without a fence is returned
/// trimmed.
///
/// 返回第一个代码围栏与最后一个围栏之间的文本（去掉围栏的信息字符串）。
/// 只有位于行首的围栏才会被识别，值中的反引号保持不变。
/// 没有围栏的文本去除首尾空白后原样返回。
pub fn unwrap_fenced_payload(content: &str) -> &str {
    let trimmed = content.trim();
    let mut fences = line_start_fences(trimmed);
    let Some(open) = fences.next() else {
        return trimmed;
    };
    let close = fences.last().unwrap_or(trimmed.len());
    trimmed[open + 3..close]
        .trim_start_matches(|c: char| c.is_ascii_alphanumeric())
        .trim()
}

/// Byte offsets of every "```" that only has whitespace before it on its line.
fn line_start_fences(text: &str) -> impl Iterator<Item = usize> + '_ {
    text.match_indices("```")
        .map(|(i, _)| i)
        .filter(move |&i| {
            text[..i]
                .rsplit('\n')
                .next()
                .is_some_and(|prefix| prefix.trim().is_empty())
        })
}

/// Parses a review response into a catalog. A reply that is already a JSON
/// object is taken as is; otherwise a fenced block is unwrapped first.
pub fn parse_review_payload(content: &str) -> Result<Catalog, ProviderError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }
    if let Ok(catalog) = Catalog::from_json_str(trimmed) {
        return Ok(catalog);
    }
    let payload = unwrap_fenced_payload(trimmed);
    if payload.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }
    Catalog::from_json_str(payload).map_err(|e| ProviderError::MalformedResponse(format!("{e:#}")))
}

/// One source → target translation pass over individual values.
/// Every call goes through the rate limiter and falls back to the original
/// text when the provider fails.
///
/// 针对单个值的一次源语言 → 目标语言翻译过程。
/// 每次调用都经过限流器，提供者失败时回退为原文。
pub struct TranslationJob<'a, P, L> {
    provider: &'a P,
    limiter: &'a L,
    source: &'a str,
    target: &'a str,
}

impl<'a, P, L> TranslationJob<'a, P, L>
where
    P: TranslationProvider,
    L: RateLimiter,
{
    pub fn new(provider: &'a P, limiter: &'a L, source: &'a str, target: &'a str) -> Self {
        Self {
            provider,
            limiter,
            source,
            target,
        }
    }

    /// Translates a catalog value. Strings are translated, lists element-wise
    /// (non-string elements kept), and anything else, as well as the
    /// `multilingual-typed` entry, is copied as is.
    ///
    /// 翻译一个目录值。字符串直接翻译，列表逐元素翻译（非字符串元素保留），
    /// 其他类型以及 `multilingual-typed` 条目按原样复制。
    pub async fn translate_value(&self, key: &str, value: &Value) -> Value {
        if key == MULTILINGUAL_KEY {
            return value.clone();
        }
        match value {
            Value::String(text) => Value::String(self.translate_text(key, text).await),
            Value::Array(items) => {
                let mut translated = Vec::with_capacity(items.len());
                for item in items {
                    let item = match item {
                        Value::String(text) => Value::String(self.translate_text(key, text).await),
                        other => other.clone(),
                    };
                    translated.push(item);
                }
                Value::Array(translated)
            }
            other => other.clone(),
        }
    }

    /// Translates one string, returning `text` unchanged if the provider fails.
    pub async fn translate_text(&self, key: &str, text: &str) -> String {
        self.limiter.acquire().await;
        println!(
            "    {}",
            t!(
                "translate.translating_text",
                text = text,
                source = region_tag(self.source),
                target = region_tag(self.target)
            )
            .dimmed()
        );
        match self.provider.translate(text, self.source, self.target).await {
            Ok(translated) => translated,
            Err(e) => {
                eprintln!(
                    "{}",
                    t!(
                        "translate.fallback",
                        lang = self.target,
                        field = key,
                        text = preview(text),
                        error = e
                    )
                    .yellow()
                );
                text.to_string()
            }
        }
    }
}

/// First 30 characters of `text`, for warnings.
fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(30).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
