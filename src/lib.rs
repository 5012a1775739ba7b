//! # Locale Sync Library / Locale Sync 库
//!
//! This library keeps a multilingual JSON text catalog in sync across a
//! review and translation cycle: important keys are extracted for review,
//! corrections are merged back behind backups, and missing keys are filled in
//! by a translation provider without touching reviewed entries.
//!
//! 此库让多语言 JSON 文本目录在审校与翻译周期中保持同步：
//! 提取重要键以供审校，在备份保护下合并修正，并由翻译提供者补全缺失键，
//! 同时不触碰已审校的条目。
//!
//! ## Modules / 模块
//!
//! - `core` - Catalog model and synchronization engine
//! - `infra` - Storage, backups, atomic writes and rate limiting
//! - `providers` - Review and translation backends
//! - `reporting` - Console progress and summaries
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 目录模型和同步引擎
//! - `infra` - 存储、备份、原子写入和限流
//! - `providers` - 审校与翻译后端
//! - `reporting` - 控制台进度和摘要
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod providers;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::catalog;
pub use crate::core::config;
pub use crate::core::orchestrator;

/// Initializes the application's internationalization (i18n) based on the system locale.
///
/// This function detects the user's system locale and sets the appropriate
/// language for the application's user interface. It attempts to match the full
/// locale (e.g., "zh-CN"), then just the language code (e.g., "en"), and
/// finally falls back to the default language ("en").
pub fn init() {
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    set_ui_locale(&locale);
}

/// Sets the language of the tool's own messages, falling back from the full
/// locale to its language part and finally to "en".
pub fn set_ui_locale(locale: &str) {
    let available_locales = rust_i18n::available_locales!();

    let lang = if available_locales.contains(&locale) {
        locale
    } else {
        locale
            .split(['-', '_'])
            .next()
            .filter(|lang_code| available_locales.contains(lang_code))
            .unwrap_or("en")
    };

    rust_i18n::set_locale(lang);
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
