//! Language code helpers.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static REGION_TAGS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("en", "en-US"),
        ("es", "es-ES"),
        ("it", "it-IT"),
        ("fr", "fr-FR"),
        ("de", "de-DE"),
        ("pt", "pt-PT"),
        ("ja", "ja-JP"),
        ("zh", "zh-CN"),
        ("ar", "ar-SA"),
        ("ru", "ru-RU"),
    ])
});

/// Expands a bare language code to a regional tag (`es` → `es-ES`).
/// Unknown codes become `xx-XX`; codes that already carry a region
/// (`pt-BR`, `zh_CN`) are kept.
///
/// 将裸语言代码扩展为带地区的标签（`es` → `es-ES`）。
/// 未知代码变为 `xx-XX`；已带地区的代码保持不变。
pub fn region_tag(code: &str) -> String {
    if code.contains(['-', '_']) {
        return code.to_string();
    }
    REGION_TAGS
        .get(code)
        .map(|tag| tag.to_string())
        .unwrap_or_else(|| format!("{}-{}", code, code.to_uppercase()))
}

/// The language part of a code: `pt-BR` → `pt`.
pub fn base_code(code: &str) -> &str {
    code.split(['-', '_']).next().unwrap_or(code)
}
